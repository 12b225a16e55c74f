//! Greedy best-first search.

use std::marker::PhantomData;

use crate::algorithms::best_first::BestFirstSearch;
use crate::algorithms::best_first::OrderingPolicy;
use crate::config::SearchConfig;
use crate::errors::Result;
use crate::frontier::HeapFrontier;
use crate::heuristic::Heuristic;
use crate::problem::Problem;
use crate::search::SearchResult;
use crate::space::Cost;
use crate::space::Space;
use crate::space::State;

/// Expands the node that looks closest to a goal, ignoring what it took to
/// get there.
///
/// Doesn't remember costs, so a node may sit in the frontier several times
/// until it gets expanded.
#[derive(Debug)]
pub struct GreedyBestFirst<H> {
    _phantom_heuristic: PhantomData<H>,
}

impl<H> GreedyBestFirst<H> {
    pub fn new() -> Self {
        Self {
            _phantom_heuristic: PhantomData,
        }
    }
}

impl<H> Default for GreedyBestFirst<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H, Sp, St, C> OrderingPolicy<Sp, St, C> for GreedyBestFirst<H>
where
    H: Heuristic<Sp, St, C>,
    Sp: Space<St, C>,
    St: State,
    C: Cost,
{
    type Key = C;
    type Frontier = HeapFrontier<C, St>;

    const NAME: &'static str = "GBFS";
    const CLOSE_ON_DISCOVERY: bool = false;
    const TRACKS_BEST_G: bool = false;

    #[inline(always)]
    fn key(&self, space: &Sp, goals: &[St], s: &St, _g: C) -> Result<C> {
        H::estimate(space, s, goals)
    }
}

pub fn greedy_best_first_search<H, P, Sp, St, C>(
    problem: &P,
    config: SearchConfig,
) -> Result<SearchResult<St, C>>
where
    H: Heuristic<Sp, St, C>,
    P: Problem<Sp, St, C>,
    Sp: Space<St, C>,
    St: State,
    C: Cost,
{
    BestFirstSearch::new(GreedyBestFirst::<H>::new(), problem, config).run()
}
