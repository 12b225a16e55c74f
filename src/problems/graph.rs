//! A weighted directed graph with optional node coordinates.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::str::FromStr;

use derive_more::Display;
use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;

use crate::errors::Result;
use crate::errors::SearchError;
use crate::float_cost::FloatCost;
use crate::heuristic::Coordinate;
use crate::heuristic::Heuristic;
use crate::problem::Problem;
use crate::space::Neighbours;
use crate::space::Space;
use crate::space::State;

const MAX_ELEMENTS_DISPLAYED: usize = 20;

pub type GraphCost = FloatCost;

/// A node identifier.
///
/// Ids are kept as written, so `07` and `7` are different nodes. Tokens that
/// look like integers sort by value, at any length, and before every other
/// token. The rest sort lexically.
///
/// ```
/// use pathsearch::problems::graph::NodeId;
/// assert!(NodeId::from("9") < NodeId::from("10"));
/// assert!(NodeId::from("10") < NodeId::from("A"));
/// assert!(NodeId::from("A") < NodeId::from("B"));
/// assert_ne!(NodeId::from("07"), NodeId::from("7"));
/// ```
#[derive(Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum NodeId {
    #[display("{_0}")]
    Numeric(String),
    #[display("{_0}")]
    Named(String),
}
impl State for NodeId {}

impl NodeId {
    pub fn numeric(n: i64) -> Self {
        NodeId::Numeric(n.to_string())
    }
}

fn is_integer(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Orders integer tokens by value without parsing them.
fn cmp_integers(a: &str, b: &str) -> Ordering {
    // (negative, magnitude without leading zeros)
    fn split(s: &str) -> (bool, &str) {
        let negative = s.starts_with('-');
        let magnitude = s.trim_start_matches(['+', '-']).trim_start_matches('0');
        (negative && !magnitude.is_empty(), magnitude)
    }
    let (a_neg, a_mag) = split(a);
    let (b_neg, b_mag) = split(b);
    let by_magnitude = a_mag.len().cmp(&b_mag.len()).then_with(|| a_mag.cmp(b_mag));
    match (a_neg, b_neg) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => by_magnitude,
        (true, true) => by_magnitude.reverse(),
    }
    .then_with(|| a.cmp(b))
}

impl Ord for NodeId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (NodeId::Numeric(a), NodeId::Numeric(b)) => cmp_integers(a, b),
            (NodeId::Numeric(_), NodeId::Named(_)) => Ordering::Less,
            (NodeId::Named(_), NodeId::Numeric(_)) => Ordering::Greater,
            (NodeId::Named(a), NodeId::Named(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for NodeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for NodeId {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        Ok(if is_integer(s) {
            NodeId::Numeric(s.to_string())
        } else {
            NodeId::Named(s.to_string())
        })
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(id) => id,
            Err(e) => match e {},
        }
    }
}

#[derive(Clone, Default)]
pub struct Graph {
    /// Outgoing edges in the order they were added.
    adjacency: FxHashMap<NodeId, Vec<(NodeId, GraphCost)>>,
    coordinates: FxHashMap<NodeId, Coordinate>,
    num_edges: usize,
}

impl Graph {
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    pub fn coordinate(&self, node: &NodeId) -> Option<Coordinate> {
        self.coordinates.get(node).copied()
    }

    /// Outgoing edges, as added.
    pub fn edges(&self, node: &NodeId) -> &[(NodeId, GraphCost)] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All nodes, sorted.
    pub fn nodes(&self) -> Vec<&NodeId> {
        let mut nodes: Vec<&NodeId> = self.adjacency.keys().collect();
        nodes.sort();
        nodes
    }

    pub fn num_nodes(&self) -> usize {
        self.adjacency.len()
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }
}

impl Space<NodeId, GraphCost> for Graph {
    #[inline(always)]
    fn neighbours(&self, s: &NodeId) -> Neighbours<NodeId, GraphCost> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("StateExpansion");

        self.edges(s).iter().cloned().collect()
    }

    #[inline(always)]
    fn contains(&self, s: &NodeId) -> bool {
        self.adjacency.contains_key(s)
    }
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Graph({} nodes, {} edges)", self.num_nodes(), self.num_edges())
    }
}

impl std::fmt::Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "Graph({} nodes, {} edges):", self.num_nodes(), self.num_edges())?;
        for node in self.nodes().into_iter().take(MAX_ELEMENTS_DISPLAYED) {
            match self.coordinate(node) {
                Some(c) => write!(f, "  {node}@{c} ->")?,
                None => write!(f, "  {node} ->")?,
            }
            for (to, cost) in self.edges(node).iter().take(MAX_ELEMENTS_DISPLAYED) {
                write!(f, " {to}:{cost}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Assembles a [`Graph`]. The graph can't change once built.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: Graph,
}

impl GraphBuilder {
    /// Declares a node. Declaring it again replaces its coordinate.
    #[must_use]
    pub fn node(mut self, id: NodeId, coordinate: Option<Coordinate>) -> Self {
        if let Some(c) = coordinate {
            self.graph.coordinates.insert(id.clone(), c);
        }
        self.graph.adjacency.entry(id).or_default();
        self
    }

    /// Adds a directed edge. Parallel edges and self-loops are kept.
    #[must_use]
    pub fn edge(mut self, from: NodeId, to: NodeId, cost: GraphCost) -> Self {
        debug_assert!(cost >= GraphCost::new(0.0));
        self.graph.adjacency.entry(from).or_default().push((to, cost));
        self.graph.num_edges += 1;
        self
    }

    pub fn build(self) -> Graph {
        self.graph
    }
}

/// A search request over a [`Graph`]: one origin and a set of destinations.
#[derive(Clone, Debug)]
pub struct GraphProblem {
    graph: Graph,
    origin: NodeId,
    goals: Vec<NodeId>,
    goal_set: FxHashSet<NodeId>,
}

impl GraphProblem {
    /// Goals keep their first-seen order, repeats are dropped.
    pub fn new<I>(graph: Graph, origin: NodeId, goals: I) -> Self
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut goal_set = FxHashSet::default();
        let mut unique_goals = vec![];
        for g in goals {
            if goal_set.insert(g.clone()) {
                unique_goals.push(g);
            }
        }
        Self {
            graph,
            origin,
            goals: unique_goals,
            goal_set,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }
}

impl Problem<Graph, NodeId, GraphCost> for GraphProblem {
    fn space(&self) -> &Graph {
        &self.graph
    }
    fn origin(&self) -> &NodeId {
        &self.origin
    }
    fn goals(&self) -> &[NodeId] {
        &self.goals
    }
    #[inline(always)]
    fn is_goal(&self, s: &NodeId) -> bool {
        self.goal_set.contains(s)
    }
}

impl std::fmt::Display for GraphProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let goals: Vec<String> = self
            .goals
            .iter()
            .take(MAX_ELEMENTS_DISPLAYED)
            .map(|g| g.to_string())
            .collect();
        writeln!(f, "GraphProblem (s:{}, g:[{}]):", self.origin, goals.join(", "))?;
        write!(f, "{}", self.graph)
    }
}

/// Straight-line distance between node coordinates.
///
/// Admissible whenever no edge is cheaper than the distance it covers.
#[derive(Debug)]
pub struct EuclideanDistance;

impl Heuristic<Graph, NodeId, GraphCost> for EuclideanDistance {
    #[inline(always)]
    fn h(graph: &Graph, a: &NodeId, b: &NodeId) -> Result<GraphCost> {
        let missing = |n: &NodeId| SearchError::MissingCoordinate(n.to_string());
        let a = graph.coordinate(a).ok_or_else(|| missing(a))?;
        let b = graph.coordinate(b).ok_or_else(|| missing(b))?;
        Ok(GraphCost::new(a.distance(&b)))
    }
}
