use std::fmt::Debug;

use crate::space::Cost;
use crate::space::Path;
use crate::space::State;

/// A reference to a `SearchTreeNode<St, C>`.
///
/// Indices grow with every push, so they also order nodes by discovery.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchTreeIndex {
    index: usize,
}

impl SearchTreeIndex {
    #[inline(always)]
    fn new(index: usize) -> Self {
        Self { index }
    }
}

/// A State reached through a particular parent.
///
/// Several nodes may hold the same State when a search re-reaches it, each
/// one remembering how it got there.
#[derive(Clone, Debug)]
pub struct SearchTreeNode<St, C>
where
    St: State,
    C: Cost,
{
    pub(crate) parent: Option<SearchTreeIndex>,
    pub(crate) state: St,
    /// Cost of the edge leading to this node.
    pub(crate) step: C,
    pub(crate) g: C,
}

impl<St, C> SearchTreeNode<St, C>
where
    St: State,
    C: Cost,
{
    pub fn new_root(s: St) -> Self {
        Self {
            parent: None,
            state: s,
            step: C::zero(),
            g: C::zero(),
        }
    }

    pub fn new(s: St, parent: SearchTreeIndex, step: C, g: C) -> Self {
        Self {
            parent: Some(parent),
            state: s,
            step,
            g,
        }
    }

    #[inline(always)]
    pub fn g(&self) -> C {
        self.g
    }
}

/// All the nodes a search generated.
///
/// Nodes are never removed, so an index stays valid for the lifetime of the
/// tree and following parents always terminates at a root.
pub struct SearchTree<St, C>
where
    St: State,
    C: Cost,
{
    nodes: Vec<SearchTreeNode<St, C>>,
}

impl<St, C> SearchTree<St, C>
where
    St: State,
    C: Cost,
{
    #[inline(always)]
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: vec![] }
    }

    #[inline(always)]
    pub fn push(&mut self, node: SearchTreeNode<St, C>) -> SearchTreeIndex {
        debug_assert!(node.parent.is_none_or(|p| p.index < self.nodes.len()));
        self.nodes.push(node);
        SearchTreeIndex::new(self.nodes.len() - 1)
    }

    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Rebuilds the Path from the root to the given node.
    #[must_use]
    pub fn path(&self, mut node_index: SearchTreeIndex) -> Path<St, C> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("PathReconstruction");

        let mut path = Path::<St, C>::new_from_start(self[node_index].state.clone());
        path.cost = self[node_index].step;

        while let Some(parent_index) = self[node_index].parent {
            debug_assert!(node_index != parent_index);
            let p = &self[parent_index];
            path.append(p.state.clone(), p.step);
            node_index = parent_index;
        }

        path.reverse();
        debug_assert!(path.seems_valid());
        path
    }
}

impl<St, C> Default for SearchTree<St, C>
where
    St: State,
    C: Cost,
{
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<St, C> std::ops::Index<SearchTreeIndex> for SearchTree<St, C>
where
    St: State,
    C: Cost,
{
    type Output = SearchTreeNode<St, C>;

    #[inline(always)]
    fn index(&self, index: SearchTreeIndex) -> &Self::Output {
        &self.nodes[index.index]
    }
}

impl<St, C> std::fmt::Debug for SearchTree<St, C>
where
    St: State,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "SearchTree{{({} nodes)}}", self.len())
    }
}

/// The outcome of a search.
///
/// Either a goal and the Path reaching it, or no goal and an empty Path. The
/// number of expansions is reported in both cases.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult<St, C>
where
    St: State,
    C: Cost,
{
    pub goal: Option<St>,
    pub path: Path<St, C>,
    pub expanded: usize,
}

impl<St, C> SearchResult<St, C>
where
    St: State,
    C: Cost,
{
    pub fn success(path: Path<St, C>, expanded: usize) -> Self {
        debug_assert!(!path.is_empty());
        Self {
            goal: path.end().cloned(),
            path,
            expanded,
        }
    }

    pub fn failure(expanded: usize) -> Self {
        Self {
            goal: None,
            path: Path::empty(),
            expanded,
        }
    }

    #[inline(always)]
    pub fn is_success(&self) -> bool {
        self.goal.is_some()
    }
}
