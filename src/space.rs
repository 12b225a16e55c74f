use std::fmt::Debug;
use std::fmt::Display;
use std::hash::Hash;

use smallvec::SmallVec;

pub use crate::cost::Cost;

/// A node in a search space.
///
/// States are ordered so that expansion order and tie-breaking never depend on
/// hashing or insertion order.
pub trait State: Clone + Debug + Display + PartialEq + Eq + Hash + PartialOrd + Ord {}

/// The successors of a State along with the cost of reaching them.
pub type Neighbours<St, C> = SmallVec<[(St, C); 8]>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path<St, C>
where
    St: State,
    C: Cost,
{
    pub states: Vec<St>,
    pub cost: C,
}

impl<St, C> Path<St, C>
where
    St: State,
    C: Cost,
{
    #[inline(always)]
    pub fn new_from_start(start: St) -> Self {
        Self {
            states: vec![start],
            cost: C::zero(),
        }
    }

    #[inline(always)]
    pub fn empty() -> Self {
        Self {
            states: vec![],
            cost: C::zero(),
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of edges travelled.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.states.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<&St> {
        self.states.first()
    }

    pub fn end(&self) -> Option<&St> {
        self.states.last()
    }

    /// Runs sanity checks
    #[inline(always)]
    pub fn seems_valid(&self) -> bool {
        self.cost.valid() && (!self.is_empty() || self.cost == C::zero())
    }

    #[inline(always)]
    pub fn append(&mut self, s: St, c: C) {
        self.states.push(s);
        self.cost = self.cost.saturating_add(&c);
    }

    /// Reverses the Path.
    ///
    /// Useful when naturally reconstructing paths in reverse.
    pub fn reverse(&mut self) {
        self.states.reverse();
    }
}

impl<St, C> std::fmt::Display for Path<St, C>
where
    St: State,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (i, s) in self.states.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{s}")?;
        }
        Ok(())
    }
}

pub trait Space<St, C>: std::fmt::Debug
where
    St: State,
    C: Cost,
{
    /// Expands a State.
    ///
    /// Successors come out in the order the space stores them. Searches sort
    /// them before use.
    fn neighbours(&self, s: &St) -> Neighbours<St, C>;

    /// Whether the State is part of the space.
    fn contains(&self, s: &St) -> bool;

    /// Checks that every step of the Path is an edge and that the Path cost
    /// can be produced by the edges between each pair.
    ///
    /// Parallel edges make the exact cost ambiguous, so the cost only needs to
    /// fall between the cheapest and the most expensive choice.
    fn valid_path(&self, p: &Path<St, C>) -> bool {
        if p.is_empty() {
            // Empty paths are fine
            return p.cost == C::zero();
        }

        let mut cheapest = C::zero();
        let mut priciest = C::zero();
        for step in p.states.windows(2) {
            let (from, to) = (&step[0], &step[1]);
            let costs: Neighbours<St, C> = self
                .neighbours(from)
                .into_iter()
                .filter(|(s, _)| s == to)
                .collect();
            let (Some(min), Some(max)) = (
                costs.iter().map(|(_, c)| *c).min(),
                costs.iter().map(|(_, c)| *c).max(),
            ) else {
                return false;
            };
            cheapest = cheapest.saturating_add(&min);
            priciest = priciest.saturating_add(&max);
        }
        cheapest <= p.cost && p.cost <= priciest
    }
}
