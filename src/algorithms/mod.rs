//! Implementation of search algorithms.
//!
//! These algorithms can do path-finding on generic search problems. All but
//! RBFS share the loop in [`best_first`] and only differ in how they order
//! their frontier.

pub mod astar;
pub mod best_first;
pub mod bfs;
pub mod dfs;
pub mod gbfs;
pub mod rbfs;
pub mod ucs;
