//! Knobs shared by every search.

/// Default cap on the number of RBFS frames alive at once.
pub const DEFAULT_MAX_DEPTH: usize = 100_000;
/// Default heuristic weight for Weighted A*.
pub const DEFAULT_HEURISTIC_WEIGHT: f64 = 1.5;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SearchConfig {
    /// Aborts a search after this many expansions.
    pub max_expansions: Option<usize>,
    /// Maximum number of frames RBFS keeps on its stack.
    pub max_depth: usize,
    /// `w` in `f = g + w·h`.
    pub heuristic_weight: f64,
}

impl SearchConfig {
    #[must_use]
    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    #[must_use]
    pub fn with_heuristic_weight(mut self, weight: f64) -> Self {
        self.heuristic_weight = weight;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_expansions: None,
            max_depth: DEFAULT_MAX_DEPTH,
            heuristic_weight: DEFAULT_HEURISTIC_WEIGHT,
        }
    }
}
