//! Implementation of search spaces and problems.
//!
//! These expose a generic search space so we can do pathfinding against a
//! generic graph-like API where from a given state we can find the states it
//! leads to and what it costs to get there.

pub mod graph;
pub mod parser;
pub mod random;
