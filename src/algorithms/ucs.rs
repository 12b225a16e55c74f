//! Uniform-cost search.

use crate::algorithms::best_first::BestFirstSearch;
use crate::algorithms::best_first::OrderingPolicy;
use crate::config::SearchConfig;
use crate::errors::Result;
use crate::frontier::HeapFrontier;
use crate::problem::Problem;
use crate::search::SearchResult;
use crate::space::Cost;
use crate::space::Space;
use crate::space::State;

/// Expands the cheapest node so far, as Dijkstra would.
#[derive(Copy, Clone, Debug, Default)]
pub struct UniformCost;

impl<Sp, St, C> OrderingPolicy<Sp, St, C> for UniformCost
where
    Sp: Space<St, C>,
    St: State,
    C: Cost,
{
    type Key = C;
    type Frontier = HeapFrontier<C, St>;

    const NAME: &'static str = "UCS";
    const CLOSE_ON_DISCOVERY: bool = false;
    const TRACKS_BEST_G: bool = true;

    #[inline(always)]
    fn key(&self, _space: &Sp, _goals: &[St], _s: &St, g: C) -> Result<C> {
        Ok(g)
    }
}

pub fn uniform_cost_search<P, Sp, St, C>(
    problem: &P,
    config: SearchConfig,
) -> Result<SearchResult<St, C>>
where
    P: Problem<Sp, St, C>,
    Sp: Space<St, C>,
    St: State,
    C: Cost,
{
    BestFirstSearch::new(UniformCost, problem, config).run()
}
