//! Breadth-first search.

use crate::algorithms::best_first::BestFirstSearch;
use crate::algorithms::best_first::OrderingPolicy;
use crate::config::SearchConfig;
use crate::errors::Result;
use crate::frontier::FifoFrontier;
use crate::problem::Problem;
use crate::search::SearchResult;
use crate::space::Cost;
use crate::space::Space;
use crate::space::State;

/// Expands nodes in the order they were discovered.
///
/// Finds paths with the fewest edges, whatever they cost.
#[derive(Copy, Clone, Debug, Default)]
pub struct BreadthFirst;

impl<Sp, St, C> OrderingPolicy<Sp, St, C> for BreadthFirst
where
    Sp: Space<St, C>,
    St: State,
    C: Cost,
{
    type Key = ();
    type Frontier = FifoFrontier<St>;

    const NAME: &'static str = "BFS";
    const CLOSE_ON_DISCOVERY: bool = true;
    const TRACKS_BEST_G: bool = false;

    #[inline(always)]
    fn key(&self, _space: &Sp, _goals: &[St], _s: &St, _g: C) -> Result<()> {
        Ok(())
    }
}

pub fn breadth_first_search<P, Sp, St, C>(
    problem: &P,
    config: SearchConfig,
) -> Result<SearchResult<St, C>>
where
    P: Problem<Sp, St, C>,
    Sp: Space<St, C>,
    St: State,
    C: Cost,
{
    BestFirstSearch::new(BreadthFirst, problem, config).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::best_first::tests::*;
    use crate::problems::graph::GraphCost;
    use crate::problems::graph::GraphProblem;
    use crate::problems::graph::NodeId;

    fn bfs(p: &GraphProblem) -> SearchResult<NodeId, GraphCost> {
        breadth_first_search(p, SearchConfig::default()).unwrap()
    }

    #[test]
    fn linear_chain() {
        let r = bfs(&linear());
        assert_eq!(r.goal, Some(n(3)));
        assert_eq!(r.path.states, ids(&[1, 2, 3]));
        assert_eq!(r.path.cost, c(2.0));
        assert_eq!(r.expanded, 3);
    }

    #[test]
    fn disconnected_origin() {
        let r = bfs(&disconnected());
        assert_eq!(r.goal, None);
        assert!(r.path.is_empty());
        assert_eq!(r.expanded, 1);
    }

    #[test]
    fn fewest_edges_over_cheapest() {
        let r = bfs(&detour());
        assert_eq!(r.path.states, ids(&[1, 4]));
        assert_eq!(r.path.cost, c(10.0));
        assert_eq!(r.expanded, 3);
    }

    #[test]
    fn ties_go_to_the_smaller_id() {
        let r = bfs(&tie());
        assert_eq!(r.goal, Some(n(2)));
        assert_eq!(r.expanded, 2);
    }

    #[test]
    fn ignores_coordinates() {
        let r = bfs(&missing_coordinate());
        assert_eq!(r.path.states, ids(&[1, 2, 3]));
    }

    #[test]
    fn assignment_sample() {
        let p = assignment();
        let r = bfs(&p);
        assert_eq!(r.goal, Some(n(4)));
        assert_eq!(r.path.states, ids(&[2, 1, 4]));
        assert_eq!(r.path.cost, c(10.0));
        assert_eq!(r.expanded, 4);
        assert!(p.space().valid_path(&r.path));
    }

    #[test]
    fn unsearchable_problems_expand_nothing() {
        let graph = linear().graph().clone();
        let p = GraphProblem::new(graph.clone(), n(9), ids(&[3]));
        assert_eq!(bfs(&p), SearchResult::failure(0));
        let p = GraphProblem::new(graph, n(1), vec![]);
        assert_eq!(bfs(&p), SearchResult::failure(0));
    }

    #[test]
    fn origin_goal() {
        let p = GraphProblem::new(linear().graph().clone(), n(2), ids(&[2]));
        let r = bfs(&p);
        assert_eq!(r.path.states, ids(&[2]));
        assert_eq!(r.path.cost, c(0.0));
        assert_eq!(r.expanded, 1);
    }

    #[test]
    fn ids_with_the_same_value_are_different_nodes() {
        let p = problem(indoc::indoc! {"
            Nodes:
            1: (0,0)
            07: (1,0)
            7: (2,0)
            Edges:
            (1,07): 1
            Origin:
            1
            Destinations:
            7
        "});
        assert_eq!(p.graph().num_nodes(), 3);
        assert_eq!(bfs(&p), SearchResult::failure(2));

        let p = problem(indoc::indoc! {"
            Edges:
            (001,002): 1
            Origin:
            001
            Destinations:
            002
        "});
        let r = bfs(&p);
        assert_eq!(r.path.states, [NodeId::from("001"), NodeId::from("002")]);
        assert_eq!(crate::report::Report::new(&r).to_string(), "002 2\n001 002");
    }
}
