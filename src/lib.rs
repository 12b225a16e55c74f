use shadow_rs::shadow;

shadow!(build);

// Internals
// ---------
pub mod config;
pub mod cost;
pub mod errors;
pub mod float_cost;
pub mod frontier;
pub mod heap_primitives;

// Search space and problems
// -------------------------
pub mod heuristic;
pub mod problem;
pub mod search;
pub mod space;

// Problems
// --------
pub mod problems;

// Algorithms
// ----------
pub mod algorithms;
pub mod method;

// Output
// ------
pub mod report;
