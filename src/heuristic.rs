use std::cmp::min;

use derive_more::Display;

use crate::errors::Result;
use crate::space::Cost;
use crate::space::Space;
use crate::space::State;

/// A point in the plane.
#[derive(Copy, Clone, Debug, Display, PartialEq, Default)]
#[display("({x},{y})")]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance.
    ///
    /// ```
    /// use pathsearch::heuristic::Coordinate;
    /// let a = Coordinate::new(2.0, 2.0);
    /// let b = Coordinate::new(6.0, 5.0);
    /// assert_eq!(a.distance(&b), 5.0);
    /// ```
    #[inline(always)]
    pub fn distance(&self, other: &Coordinate) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A cost-to-go estimate between two States of a Space.
pub trait Heuristic<Sp, St, C>: std::fmt::Debug
where
    Sp: Space<St, C>,
    St: State,
    C: Cost,
{
    fn h(space: &Sp, s: &St, goal: &St) -> Result<C>;

    /// Estimate to the closest goal.
    ///
    /// Every goal is consulted, so a goal the heuristic can't handle fails the
    /// estimate even when another goal is closer.
    fn estimate(space: &Sp, s: &St, goals: &[St]) -> Result<C> {
        let mut h = C::max_value();
        for g in goals {
            h = min(h, Self::h(space, s, g)?);
        }
        Ok(h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric() {
        let a = Coordinate::new(-1.0, 4.0);
        let b = Coordinate::new(3.0, 1.0);
        assert_eq!(a.distance(&b), b.distance(&a));
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn display() {
        assert_eq!(Coordinate::new(1.0, 2.5).to_string(), "(1,2.5)");
    }
}
