//! What it takes to travel an edge, or a whole path.

use num_traits::SaturatingAdd;
use num_traits::Zero;
use num_traits::bounds::UpperBounded;

/// A totally ordered, non-negative cost.
///
/// `max_value()` stands for "unreachable" and never shows up on a valid path.
pub trait Cost:
    Copy
    + std::fmt::Debug
    + std::fmt::Display
    + Eq
    + Ord
    + SaturatingAdd
    + UpperBounded
    + Zero
    + std::ops::Add<Self, Output = Self>
{
    #[inline(always)]
    fn valid(&self) -> bool {
        *self != Self::max_value()
    }

    /// Multiplies the cost by a real factor, as used for weighting heuristics.
    fn scale(&self, factor: f64) -> Self;
}
