//! Reads [`GraphProblem`]s from their text description.
//!
//! ```text
//! Nodes:
//! 1: (4,1)
//! 2: (2,2)
//! Edges:
//! (1,2): 5
//! Origin:
//! 1
//! Destinations:
//! 2; 3
//! ```

use thiserror::Error;

use crate::heuristic::Coordinate;
use crate::problems::graph::Graph;
use crate::problems::graph::GraphBuilder;
use crate::problems::graph::GraphCost;
use crate::problems::graph::GraphProblem;
use crate::problems::graph::NodeId;

#[derive(Debug, Error)]
pub enum GraphParseError {
    #[error("Empty input")]
    EmptyInput,
    #[error("Line {line}: '{text}' appears before any section header")]
    OutsideSection { line: usize, text: String },
    #[error("Line {line}: invalid node '{text}', expected '<id>: (<x>,<y>)'")]
    InvalidNode { line: usize, text: String },
    #[error("Line {line}: invalid coordinate '{text}'")]
    InvalidCoordinate { line: usize, text: String },
    #[error("Line {line}: invalid edge '{text}', expected '(<from>,<to>): <cost>'")]
    InvalidEdge { line: usize, text: String },
    #[error("Line {line}: invalid cost '{text}', expected a non-negative number")]
    InvalidCost { line: usize, text: String },
    #[error("Line {line}: origin '{text}' given twice")]
    DuplicateOrigin { line: usize, text: String },
    #[error("No origin given")]
    MissingOrigin,
    #[error("No destinations given")]
    MissingDestinations,
    #[error("I/O error when loading '{p}': {e}")]
    IOError {
        p: std::path::PathBuf,
        e: std::io::Error,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Section {
    Nodes,
    Edges,
    Origin,
    Destinations,
}

impl Section {
    const HEADERS: [(&'static str, Section); 4] = [
        ("Nodes:", Section::Nodes),
        ("Edges:", Section::Edges),
        ("Origin:", Section::Origin),
        ("Destinations:", Section::Destinations),
    ];

    /// Splits a header line into its Section and whatever follows the header.
    fn from_header(line: &str) -> Option<(Section, &str)> {
        Self::HEADERS.iter().find_map(|(header, section)| {
            line.strip_prefix(header).map(|rest| (*section, rest.trim()))
        })
    }
}

#[derive(Default)]
struct ProblemParser {
    builder: GraphBuilder,
    origin: Option<NodeId>,
    goals: Vec<NodeId>,
}

impl ProblemParser {
    fn line(&mut self, section: Section, line: usize, text: &str) -> Result<(), GraphParseError> {
        match section {
            Section::Nodes => {
                let (id, coordinate) = parse_node(line, text)?;
                self.builder = std::mem::take(&mut self.builder).node(id, Some(coordinate));
            }
            Section::Edges => {
                let (from, to, cost) = parse_edge(line, text)?;
                self.builder = std::mem::take(&mut self.builder).edge(from, to, cost);
            }
            Section::Origin => {
                if self.origin.is_some() {
                    return Err(GraphParseError::DuplicateOrigin {
                        line,
                        text: text.to_string(),
                    });
                }
                self.origin = Some(NodeId::from(text));
            }
            Section::Destinations => {
                self.goals.extend(
                    text.split(';')
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(NodeId::from),
                );
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<GraphProblem, GraphParseError> {
        let origin = self.origin.ok_or(GraphParseError::MissingOrigin)?;
        if self.goals.is_empty() {
            return Err(GraphParseError::MissingDestinations);
        }
        let graph: Graph = self.builder.build();
        Ok(GraphProblem::new(graph, origin, self.goals))
    }
}

fn parse_coordinate(line: usize, text: &str) -> Result<Coordinate, GraphParseError> {
    let invalid = || GraphParseError::InvalidCoordinate {
        line,
        text: text.to_string(),
    };
    let inner = text
        .trim()
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .ok_or_else(invalid)?;
    let (x, y) = inner.split_once(',').ok_or_else(invalid)?;
    let x: f64 = x.trim().parse().map_err(|_| invalid())?;
    let y: f64 = y.trim().parse().map_err(|_| invalid())?;
    if !x.is_finite() || !y.is_finite() {
        return Err(invalid());
    }
    Ok(Coordinate::new(x, y))
}

fn parse_node(line: usize, text: &str) -> Result<(NodeId, Coordinate), GraphParseError> {
    let (id, coordinate) = text
        .split_once(':')
        .filter(|(id, _)| !id.trim().is_empty())
        .ok_or_else(|| GraphParseError::InvalidNode {
            line,
            text: text.to_string(),
        })?;
    Ok((NodeId::from(id), parse_coordinate(line, coordinate)?))
}

fn parse_edge(line: usize, text: &str) -> Result<(NodeId, NodeId, GraphCost), GraphParseError> {
    let invalid = || GraphParseError::InvalidEdge {
        line,
        text: text.to_string(),
    };
    let (endpoints, cost) = text.rsplit_once(':').ok_or_else(invalid)?;
    let (from, to) = endpoints
        .trim()
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .and_then(|t| t.split_once(','))
        .ok_or_else(invalid)?;
    if from.trim().is_empty() || to.trim().is_empty() {
        return Err(invalid());
    }

    let cost = cost.trim();
    let invalid_cost = || GraphParseError::InvalidCost {
        line,
        text: cost.to_string(),
    };
    let c: f64 = cost.parse().map_err(|_| invalid_cost())?;
    if !c.is_finite() || c < 0.0 {
        return Err(invalid_cost());
    }

    Ok((NodeId::from(from), NodeId::from(to), GraphCost::new(c)))
}

impl std::convert::TryFrom<&str> for GraphProblem {
    type Error = GraphParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        if s.trim().is_empty() {
            return Err(GraphParseError::EmptyInput);
        }

        let mut parser = ProblemParser::default();
        let mut section: Option<Section> = None;

        for (i, line) in s.lines().enumerate() {
            let line_number = i + 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let text = match Section::from_header(line) {
                Some((new_section, rest)) => {
                    section = Some(new_section);
                    rest
                }
                None => line,
            };
            if text.is_empty() {
                continue;
            }

            match section {
                Some(section) => parser.line(section, line_number, text)?,
                None => {
                    return Err(GraphParseError::OutsideSection {
                        line: line_number,
                        text: text.to_string(),
                    });
                }
            }
        }

        let problem = parser.finish()?;
        log::debug!(
            "Parsed {:?} with {} goals",
            problem.graph(),
            crate::problem::Problem::goals(&problem).len()
        );
        Ok(problem)
    }
}

impl std::convert::TryFrom<&std::path::Path> for GraphProblem {
    type Error = GraphParseError;

    fn try_from(p: &std::path::Path) -> Result<Self, Self::Error> {
        let s = std::fs::read_to_string(p).map_err(|e| GraphParseError::IOError {
            p: p.to_path_buf(),
            e,
        })?;
        GraphProblem::try_from(s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::problem::Problem;
    use crate::space::Space;

    fn n(id: i64) -> NodeId {
        NodeId::numeric(id)
    }

    #[test]
    fn parse_problem() {
        let problem = GraphProblem::try_from(indoc! {"
            Nodes:
            1: (4,1)
            2: (2,2)
            3: (4,4)
            4: (6,3)

            Edges:
            (2,1): 4
            (3,1): 5
            (1,3): 5
            (2,3): 4.5
            (4,1): 6
            Origin:
            2
            Destinations:
            3; 4
        "})
        .unwrap();

        assert_eq!(problem.origin(), &n(2));
        assert_eq!(problem.goals(), &[n(3), n(4)]);
        let graph = problem.space();
        assert_eq!(graph.num_nodes(), 4);
        assert_eq!(graph.num_edges(), 5);
        assert_eq!(
            graph.edges(&n(2)),
            &[(n(1), GraphCost::new(4.0)), (n(3), GraphCost::new(4.5))]
        );
        assert_eq!(graph.coordinate(&n(4)), Some(Coordinate::new(6.0, 3.0)));
    }

    #[test]
    fn inline_headers_and_spacing() {
        let problem = GraphProblem::try_from(indoc! {"
            Nodes:
              A : ( 0.5 , -1 )
            B: (1,1)
            Edges:
            ( A , B ) : 2
            Origin: A
            Destinations: B;
            C
        "})
        .unwrap();

        assert_eq!(problem.origin(), &NodeId::from("A"));
        assert_eq!(problem.goals(), &[NodeId::from("B"), NodeId::from("C")]);
        assert_eq!(
            problem.space().coordinate(&NodeId::from("A")),
            Some(Coordinate::new(0.5, -1.0))
        );
        assert!(problem.space().contains(&NodeId::from("B")));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            GraphProblem::try_from("  \n "),
            Err(GraphParseError::EmptyInput)
        ));
        assert!(matches!(
            GraphProblem::try_from("1: (1,1)\nNodes:"),
            Err(GraphParseError::OutsideSection { line: 1, .. })
        ));
        assert!(matches!(
            GraphProblem::try_from("Nodes:\n1 (1,1)"),
            Err(GraphParseError::InvalidNode { line: 2, .. })
        ));
        assert!(matches!(
            GraphProblem::try_from("Nodes:\n1: (1;1)"),
            Err(GraphParseError::InvalidCoordinate { line: 2, .. })
        ));
        assert!(matches!(
            GraphProblem::try_from("Edges:\n(1,2) 3"),
            Err(GraphParseError::InvalidEdge { line: 2, .. })
        ));
        assert!(matches!(
            GraphProblem::try_from("Edges:\n(1,2): -3"),
            Err(GraphParseError::InvalidCost { line: 2, .. })
        ));
        assert!(matches!(
            GraphProblem::try_from("Edges:\n(1,2): x"),
            Err(GraphParseError::InvalidCost { line: 2, .. })
        ));
        assert!(matches!(
            GraphProblem::try_from("Origin:\n1\n2"),
            Err(GraphParseError::DuplicateOrigin { line: 3, .. })
        ));
        assert!(matches!(
            GraphProblem::try_from("Nodes:\n1: (1,1)\nDestinations:\n1"),
            Err(GraphParseError::MissingOrigin)
        ));
        assert!(matches!(
            GraphProblem::try_from("Origin:\n1\nDestinations:\n ; "),
            Err(GraphParseError::MissingDestinations)
        ));
    }

    #[test]
    fn missing_file() {
        let p = std::path::Path::new("data/problems/does-not-exist.txt");
        assert!(matches!(
            GraphProblem::try_from(p),
            Err(GraphParseError::IOError { .. })
        ));
    }

    #[test]
    fn sample_problems() {
        let mut parsed = 0;
        for path in glob::glob("data/problems/*.txt")
            .unwrap()
            .filter_map(std::result::Result::ok)
        {
            let problem = GraphProblem::try_from(path.as_path()).unwrap();
            assert!(problem.is_searchable(), "{path:?}");
            parsed += 1;
        }
        assert!(parsed > 0);
    }
}
