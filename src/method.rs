//! Picks a search strategy by name.

use std::str::FromStr;

use derive_more::Display;
use thiserror::Error;

use crate::algorithms::astar::AStar;
use crate::algorithms::astar::WeightedAStar;
use crate::algorithms::best_first::BestFirstSearch;
use crate::algorithms::best_first::OrderingPolicy;
use crate::algorithms::bfs::BreadthFirst;
use crate::algorithms::dfs::DepthFirst;
use crate::algorithms::gbfs::GreedyBestFirst;
use crate::algorithms::rbfs::RecursiveBestFirstSearch;
use crate::algorithms::ucs::UniformCost;
use crate::config::SearchConfig;
use crate::errors::Result;
use crate::problems::graph::EuclideanDistance;
use crate::problems::graph::Graph;
use crate::problems::graph::GraphCost;
use crate::problems::graph::GraphProblem;
use crate::problems::graph::NodeId;
use crate::search::SearchResult;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MethodParseError {
    #[error("Unknown method '{0}'. Try one of {all}", all = Method::NAMES.join(", "))]
    UnknownMethod(String),
}

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum Method {
    #[display("DFS")]
    Dfs,
    #[display("BFS")]
    Bfs,
    #[display("GBFS")]
    Gbfs,
    #[display("AS")]
    AStar,
    /// Uniform-cost search.
    #[display("CUS1")]
    Ucs,
    /// Recursive best-first search.
    #[display("CUS2")]
    Rbfs,
    #[display("WASTAR")]
    WeightedAStar,
}

impl Method {
    pub const ALL: [Method; 7] = [
        Method::Dfs,
        Method::Bfs,
        Method::Gbfs,
        Method::AStar,
        Method::Ucs,
        Method::Rbfs,
        Method::WeightedAStar,
    ];

    const NAMES: [&'static str; 12] = [
        "DFS", "BFS", "GBFS", "AS", "ASTAR", "A*", "CUS1", "UCS", "CUS2", "RBFS", "WASTAR", "WA*",
    ];

    /// Whether the method needs node coordinates.
    pub fn is_informed(&self) -> bool {
        matches!(
            self,
            Method::Gbfs | Method::AStar | Method::Rbfs | Method::WeightedAStar
        )
    }

    pub fn search(
        &self,
        problem: &GraphProblem,
        config: SearchConfig,
    ) -> Result<SearchResult<NodeId, GraphCost>> {
        self.search_with_stats(problem, config, None)
    }

    /// Searches, then writes the memory used by the search to `stats`.
    pub fn search_with_stats(
        &self,
        problem: &GraphProblem,
        config: SearchConfig,
        stats: Option<&mut dyn std::io::Write>,
    ) -> Result<SearchResult<NodeId, GraphCost>> {
        log::info!("Running {self} on {:?}", problem.graph());
        match self {
            Method::Dfs => best_first(DepthFirst, problem, config, stats),
            Method::Bfs => best_first(BreadthFirst, problem, config, stats),
            Method::Gbfs => best_first(
                GreedyBestFirst::<EuclideanDistance>::new(),
                problem,
                config,
                stats,
            ),
            Method::AStar => best_first(AStar::<EuclideanDistance>::new(), problem, config, stats),
            Method::Ucs => best_first(UniformCost, problem, config, stats),
            Method::WeightedAStar => best_first(
                WeightedAStar::<EuclideanDistance>::new(config.heuristic_weight),
                problem,
                config,
                stats,
            ),
            Method::Rbfs => {
                let mut search =
                    RecursiveBestFirstSearch::<EuclideanDistance, _, _, _, _>::new(problem, config);
                let result = search.run();
                if let Some(out) = stats {
                    if let Err(e) = search.write_memory_stats(out) {
                        log::warn!("Couldn't write search stats: {e}");
                    }
                }
                result
            }
        }
    }
}

fn best_first<O>(
    policy: O,
    problem: &GraphProblem,
    config: SearchConfig,
    stats: Option<&mut dyn std::io::Write>,
) -> Result<SearchResult<NodeId, GraphCost>>
where
    O: OrderingPolicy<Graph, NodeId, GraphCost>,
{
    let mut search = BestFirstSearch::new(policy, problem, config);
    let result = search.run();
    if let Some(out) = stats {
        if let Err(e) = search.write_memory_stats(out) {
            log::warn!("Couldn't write search stats: {e}");
        }
    }
    result
}

impl FromStr for Method {
    type Err = MethodParseError;

    /// Case-insensitive.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DFS" => Ok(Method::Dfs),
            "BFS" => Ok(Method::Bfs),
            "GBFS" => Ok(Method::Gbfs),
            "AS" | "ASTAR" | "A*" => Ok(Method::AStar),
            "CUS1" | "UCS" => Ok(Method::Ucs),
            "CUS2" | "RBFS" => Ok(Method::Rbfs),
            "WASTAR" | "WA*" => Ok(Method::WeightedAStar),
            _ => Err(MethodParseError::UnknownMethod(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::errors::SearchError;
    use crate::problem::Problem;
    use crate::space::Space;

    fn sample() -> GraphProblem {
        GraphProblem::try_from(std::path::Path::new("data/problems/assignment.txt")).unwrap()
    }

    #[test]
    fn parse_names() {
        assert_eq!("dfs".parse(), Ok(Method::Dfs));
        assert_eq!("Bfs".parse(), Ok(Method::Bfs));
        assert_eq!("GBFS".parse(), Ok(Method::Gbfs));
        assert_eq!("as".parse(), Ok(Method::AStar));
        assert_eq!("AStar".parse(), Ok(Method::AStar));
        assert_eq!("a*".parse(), Ok(Method::AStar));
        assert_eq!("cus1".parse(), Ok(Method::Ucs));
        assert_eq!("ucs".parse(), Ok(Method::Ucs));
        assert_eq!("CUS2".parse(), Ok(Method::Rbfs));
        assert_eq!("rbfs".parse(), Ok(Method::Rbfs));
        assert_eq!("wa*".parse(), Ok(Method::WeightedAStar));
        assert_eq!(
            "IDA".parse::<Method>(),
            Err(MethodParseError::UnknownMethod("IDA".to_string()))
        );
        assert!(
            MethodParseError::UnknownMethod("x".to_string())
                .to_string()
                .contains("CUS2")
        );
    }

    #[test]
    fn every_listed_name_parses() {
        for name in Method::NAMES {
            assert!(name.parse::<Method>().is_ok(), "{name}");
            assert!(
                MethodParseError::UnknownMethod(String::new())
                    .to_string()
                    .contains(name),
                "{name}"
            );
        }
    }

    #[test]
    fn display_round_trips() {
        for m in Method::ALL {
            assert_eq!(m.to_string().parse(), Ok(m));
        }
    }

    #[test]
    fn every_method_solves_the_sample() {
        let p = sample();
        for m in Method::ALL {
            let r = m.search(&p, SearchConfig::default()).unwrap();
            assert!(r.is_success(), "{m}");
            assert!(p.is_goal(r.goal.as_ref().unwrap()), "{m}");
            assert_eq!(r.path.start(), Some(p.origin()), "{m}");
            assert!(p.space().valid_path(&r.path), "{m}");
            assert!(r.expanded > 0, "{m}");
        }
    }

    #[test]
    fn optimal_methods_agree() {
        let p = sample();
        for m in [Method::Ucs, Method::AStar, Method::Rbfs] {
            let r = m.search(&p, SearchConfig::default()).unwrap();
            assert_eq!(r.path.cost, GraphCost::new(10.0), "{m}");
        }
    }

    #[test]
    fn only_informed_methods_need_coordinates() {
        let p = GraphProblem::try_from(indoc! {"
            Edges:
            (1,2): 1
            Origin:
            1
            Destinations:
            2
        "})
        .unwrap();
        for m in Method::ALL {
            let r = m.search(&p, SearchConfig::default());
            if m.is_informed() {
                assert_eq!(
                    r,
                    Err(SearchError::MissingCoordinate("1".to_string())),
                    "{m}"
                );
            } else {
                assert_eq!(r.unwrap().path.len(), 1, "{m}");
            }
        }
    }

    #[test]
    fn writes_stats() {
        let p = sample();
        for m in Method::ALL {
            let mut out = Vec::new();
            m.search_with_stats(&p, SearchConfig::default(), Some(&mut out))
                .unwrap();
            let out = String::from_utf8(out).unwrap();
            assert!(out.contains("Expanded nodes"), "{m}: {out}");
        }
    }
}
