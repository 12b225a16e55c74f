//! Depth-first search.

use crate::algorithms::best_first::BestFirstSearch;
use crate::algorithms::best_first::OrderingPolicy;
use crate::config::SearchConfig;
use crate::errors::Result;
use crate::frontier::LifoFrontier;
use crate::problem::Problem;
use crate::search::SearchResult;
use crate::space::Cost;
use crate::space::Space;
use crate::space::State;

/// Expands the most recently discovered node first.
///
/// Neighbours are pushed in descending id order so the smallest one is
/// popped first. Nodes are closed as soon as they are discovered.
#[derive(Copy, Clone, Debug, Default)]
pub struct DepthFirst;

impl<Sp, St, C> OrderingPolicy<Sp, St, C> for DepthFirst
where
    Sp: Space<St, C>,
    St: State,
    C: Cost,
{
    type Key = ();
    type Frontier = LifoFrontier<St>;

    const NAME: &'static str = "DFS";
    const CLOSE_ON_DISCOVERY: bool = true;
    const TRACKS_BEST_G: bool = false;
    const REVERSED_PUSH: bool = true;

    #[inline(always)]
    fn key(&self, _space: &Sp, _goals: &[St], _s: &St, _g: C) -> Result<()> {
        Ok(())
    }
}

pub fn depth_first_search<P, Sp, St, C>(
    problem: &P,
    config: SearchConfig,
) -> Result<SearchResult<St, C>>
where
    P: Problem<Sp, St, C>,
    Sp: Space<St, C>,
    St: State,
    C: Cost,
{
    BestFirstSearch::new(DepthFirst, problem, config).run()
}
