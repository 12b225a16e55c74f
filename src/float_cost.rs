//! Real-valued edge costs.

use derive_more::Display;
use num_traits::SaturatingAdd;
use num_traits::Zero;
use num_traits::bounds::UpperBounded;
use ordered_float::OrderedFloat;

use crate::cost::Cost;

/// An `f64` cost with a total order. Infinity means unreachable.
#[derive(Copy, Clone, Default, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
#[display("{_0}")]
pub struct FloatCost(OrderedFloat<f64>);

impl FloatCost {
    pub fn new(f: f64) -> Self {
        Self(OrderedFloat(f))
    }

    #[inline(always)]
    pub fn infinity() -> Self {
        Self(OrderedFloat(f64::INFINITY))
    }

    #[inline(always)]
    pub fn into_inner(self) -> f64 {
        self.0.0
    }
}

impl Cost for FloatCost {
    fn scale(&self, factor: f64) -> Self {
        // inf * 0 is NaN, keep unreachable unreachable.
        if !self.valid() {
            return *self;
        }
        Self::new(self.into_inner() * factor)
    }
}

impl std::ops::Add for FloatCost {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

/// Float addition already saturates at infinity.
impl SaturatingAdd for FloatCost {
    fn saturating_add(&self, rhs: &Self) -> Self {
        *self + *rhs
    }
}

impl Zero for FloatCost {
    #[inline(always)]
    fn is_zero(&self) -> bool {
        self.0.0 == 0.0
    }
    #[inline(always)]
    fn zero() -> Self {
        Self::new(0.0)
    }
}

impl UpperBounded for FloatCost {
    fn max_value() -> Self {
        Self::infinity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order() {
        assert!(FloatCost::zero().is_zero());
        assert!(FloatCost::new(0.0) <= FloatCost::new(0.0));
        assert!(FloatCost::new(1.5) < FloatCost::new(2.0));
        assert!(FloatCost::new(1e300) < FloatCost::infinity());
    }

    #[test]
    fn sum() {
        let f = FloatCost::new(1.0) + FloatCost::new(1.5);
        assert_eq!(f, FloatCost::new(2.5));
        assert!(f.valid());
        let f = f.saturating_add(&FloatCost::infinity());
        assert_eq!(f, FloatCost::max_value());
        assert!(!f.valid());
    }

    #[test]
    fn scale() {
        assert_eq!(FloatCost::new(2.0).scale(1.5), FloatCost::new(3.0));
        assert_eq!(FloatCost::new(2.0).scale(0.0), FloatCost::zero());
        assert_eq!(FloatCost::infinity().scale(0.0), FloatCost::infinity());
    }

    #[test]
    fn display() {
        assert_eq!(FloatCost::new(2.5).to_string(), "2.5");
        assert_eq!(FloatCost::new(10.0).to_string(), "10");
    }
}
