//! A* and Weighted A*.

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

/// Ranks nodes by `f = g + h`.
///
/// Returns cheapest paths as long as the heuristic never overestimates.
#[derive(Debug)]
pub struct AStar<H> {
    _phantom_heuristic: PhantomData<H>,
}

impl<H> AStar<H> {
    pub fn new() -> Self {
        Self {
            _phantom_heuristic: PhantomData,
        }
    }
}

impl<H> Default for AStar<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H, Sp, St, C> OrderingPolicy<Sp, St, C> for AStar<H>
where
    H: Heuristic<Sp, St, C>,
    Sp: Space<St, C>,
    St: State,
    C: Cost,
{
    type Key = C;
    type Frontier = HeapFrontier<C, St>;

    const NAME: &'static str = "A*";
    const CLOSE_ON_DISCOVERY: bool = false;
    const TRACKS_BEST_G: bool = true;

    #[inline(always)]
    fn key(&self, space: &Sp, goals: &[St], s: &St, g: C) -> Result<C> {
        Ok(g.saturating_add(&H::estimate(space, s, goals)?))
    }
}

/// Ranks nodes by `f = g + w·h`.
///
/// Weights above 1 trade optimality for fewer expansions. The cost of the
/// path found is at most `w` times the optimal one.
#[derive(Debug)]
pub struct WeightedAStar<H> {
    weight: f64,
    _phantom_heuristic: PhantomData<H>,
}

impl<H> WeightedAStar<H> {
    pub fn new(weight: f64) -> Self {
        debug_assert!(weight >= 0.0, "Negative weight {weight}");
        Self {
            weight,
            _phantom_heuristic: PhantomData,
        }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

impl<H, Sp, St, C> OrderingPolicy<Sp, St, C> for WeightedAStar<H>
where
    H: Heuristic<Sp, St, C>,
    Sp: Space<St, C>,
    St: State,
    C: Cost,
{
    type Key = C;
    type Frontier = HeapFrontier<C, St>;

    const NAME: &'static str = "WA*";
    const CLOSE_ON_DISCOVERY: bool = false;
    const TRACKS_BEST_G: bool = true;

    #[inline(always)]
    fn key(&self, space: &Sp, goals: &[St], s: &St, g: C) -> Result<C> {
        let h = H::estimate(space, s, goals)?;
        Ok(g.saturating_add(&h.scale(self.weight)))
    }
}

pub fn astar_search<H, P, Sp, St, C>(
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
    BestFirstSearch::new(AStar::<H>::new(), problem, config).run()
}

/// Weighted A* using [`SearchConfig::heuristic_weight`].
pub fn weighted_astar_search<H, P, Sp, St, C>(
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
    let policy = WeightedAStar::<H>::new(config.heuristic_weight);
    BestFirstSearch::new(policy, problem, config).run()
}

#[cfg(test)]
mod tests {
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::algorithms::best_first::tests::*;
    use crate::algorithms::ucs::uniform_cost_search;
    use crate::errors::SearchError;
    use crate::problems::graph::EuclideanDistance;
    use crate::problems::graph::GraphCost;
    use crate::problems::graph::GraphProblem;
    use crate::problems::graph::NodeId;
    use crate::problems::random::random_grid;

    fn astar(p: &GraphProblem) -> Result<SearchResult<NodeId, GraphCost>> {
        astar_search::<EuclideanDistance, _, _, _, _>(p, SearchConfig::default())
    }

    fn weighted(p: &GraphProblem, w: f64) -> Result<SearchResult<NodeId, GraphCost>> {
        let config = SearchConfig::default().with_heuristic_weight(w);
        weighted_astar_search::<EuclideanDistance, _, _, _, _>(p, config)
    }

    #[test]
    fn linear_chain() {
        let r = astar(&linear()).unwrap();
        assert_eq!(r.goal, Some(n(3)));
        assert_eq!(r.path.states, ids(&[1, 2, 3]));
        assert_eq!(r.path.cost, c(2.0));
        assert_eq!(r.expanded, 3);
    }

    #[test]
    fn disconnected_origin() {
        assert_eq!(astar(&disconnected()), Ok(SearchResult::failure(1)));
        assert_eq!(weighted(&disconnected(), 2.0), Ok(SearchResult::failure(1)));
    }

    #[test]
    fn ties_go_to_the_smaller_id() {
        let r = astar(&tie()).unwrap();
        assert_eq!(r.goal, Some(n(2)));
        assert_eq!(r.expanded, 2);
    }

    #[test]
    fn cheapest_path() {
        let r = astar(&detour()).unwrap();
        assert_eq!(r.path.states, ids(&[1, 2, 3, 4]));
        assert_eq!(r.path.cost, c(3.0));
    }

    #[test]
    fn missing_coordinates_abort() {
        assert_eq!(
            astar(&missing_coordinate()),
            Err(SearchError::MissingCoordinate("2".to_string()))
        );
        assert_eq!(
            weighted(&missing_coordinate(), 1.5),
            Err(SearchError::MissingCoordinate("2".to_string()))
        );
    }

    #[test]
    fn assignment_sample() {
        let r = astar(&assignment()).unwrap();
        assert_eq!(r.goal, Some(n(4)));
        assert_eq!(r.path.states, ids(&[2, 1, 4]));
        assert_eq!(r.path.cost, c(10.0));
        assert_eq!(r.expanded, 4);
    }

    #[test]
    fn unit_weight_is_astar() {
        let p = assignment();
        assert_eq!(weighted(&p, 1.0), astar(&p));
    }

    #[test]
    fn matches_uniform_cost_on_random_grids() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x5EED);
        let mut solved = 0;
        for _ in 0..20 {
            let p = random_grid(&mut rng, 12, 9, 2);
            let ucs = uniform_cost_search(&p, SearchConfig::default()).unwrap();
            let astar = astar(&p).unwrap();
            assert_eq!(ucs.is_success(), astar.is_success(), "{p}");
            if !ucs.is_success() {
                continue;
            }
            solved += 1;
            assert_eq!(ucs.path.cost, astar.path.cost, "{p}");
            assert!(p.space().valid_path(&astar.path));
            assert_eq!(astar.path.start(), Some(p.origin()));

            // Bounded suboptimality
            let w = weighted(&p, 2.0).unwrap();
            assert!(p.space().valid_path(&w.path));
            assert!(w.path.cost.into_inner() <= 2.0 * ucs.path.cost.into_inner());
        }
        assert!(solved > 0);
    }
}
