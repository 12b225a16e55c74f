use thiserror::Error;

/// Error produced when a search aborts.
///
/// Not finding a path is not an error, see
/// [`SearchResult::failure`](crate::search::SearchResult::failure).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Node '{0}' has no coordinate, the heuristic can't be computed")]
    MissingCoordinate(String),

    #[error("Expansion limit exhausted after {0} expansions")]
    ExpansionLimitExhausted(usize),

    #[error("Recursion limit of {limit} frames exceeded")]
    RecursionLimitExceeded { limit: usize },
}

/// Result when a search might abort.
pub type Result<T> = std::result::Result<T, SearchError>;
