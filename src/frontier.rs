//! Containers for discovered but not yet expanded nodes.
//!
//! Every entry carries a [`Rank`] and the [`SearchTreeIndex`] of the node it
//! stands for, which is enough to rebuild the path that reached it.

use std::cmp::min;
use std::collections::VecDeque;
use std::fmt::Debug;

use crate::heap_primitives::min_index;
use crate::search::SearchTreeIndex;
use crate::space::State;

/// The ranking tuple for priority-based searches.
///
/// Entries are ordered by key first and by State next, so equal keys are
/// always resolved towards the smaller node id.
///
/// ```
/// use pathsearch::frontier::Rank;
/// assert!(Rank::new(1u32, 9u8) < Rank::new(2u32, 0u8));
/// assert!(Rank::new(1u32, 2u8) < Rank::new(1u32, 3u8));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rank<K, St> {
    pub key: K,
    pub state: St,
}

impl<K, St> Rank<K, St> {
    pub fn new(key: K, state: St) -> Self {
        Self { key, state }
    }
}

/// Ordered by rank, then by discovery. Duplicates of a State with the same key
/// pop in the order they were pushed.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrontierEntry<K, St> {
    pub rank: Rank<K, St>,
    /// The node in the search tree holding the path so far.
    pub node_index: SearchTreeIndex,
}

pub trait Frontier<K, St>: Default + Debug
where
    K: Ord + Clone + Debug,
    St: State,
{
    fn push(&mut self, key: K, state: St, node_index: SearchTreeIndex);
    fn pop(&mut self) -> Option<FrontierEntry<K, St>>;
    fn len(&self) -> usize;
    fn capacity(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First-in first-out. Keys are ignored.
#[derive(Debug)]
pub struct FifoFrontier<St> {
    queue: VecDeque<FrontierEntry<(), St>>,
}

impl<St> Default for FifoFrontier<St> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }
}

impl<St: State> Frontier<(), St> for FifoFrontier<St> {
    #[inline(always)]
    fn push(&mut self, key: (), state: St, node_index: SearchTreeIndex) {
        self.queue.push_back(FrontierEntry {
            rank: Rank::new(key, state),
            node_index,
        });
    }
    #[inline(always)]
    fn pop(&mut self) -> Option<FrontierEntry<(), St>> {
        self.queue.pop_front()
    }
    fn len(&self) -> usize {
        self.queue.len()
    }
    fn capacity(&self) -> usize {
        self.queue.capacity()
    }
}

/// Last-in first-out. Keys are ignored.
#[derive(Debug)]
pub struct LifoFrontier<St> {
    stack: Vec<FrontierEntry<(), St>>,
}

impl<St> Default for LifoFrontier<St> {
    fn default() -> Self {
        Self { stack: vec![] }
    }
}

impl<St: State> Frontier<(), St> for LifoFrontier<St> {
    #[inline(always)]
    fn push(&mut self, key: (), state: St, node_index: SearchTreeIndex) {
        self.stack.push(FrontierEntry {
            rank: Rank::new(key, state),
            node_index,
        });
    }
    #[inline(always)]
    fn pop(&mut self) -> Option<FrontierEntry<(), St>> {
        self.stack.pop()
    }
    fn len(&self) -> usize {
        self.stack.len()
    }
    fn capacity(&self) -> usize {
        self.stack.capacity()
    }
}

const HEAP_ARITY: usize = 8usize;
#[inline(always)]
#[must_use]
fn up(i: usize) -> usize {
    crate::heap_primitives::index_parent::<HEAP_ARITY>(i)
}
#[inline(always)]
#[must_use]
fn down_left(i: usize) -> usize {
    crate::heap_primitives::index_first_children::<HEAP_ARITY>(i)
}
#[inline(always)]
#[must_use]
fn down_right(i: usize) -> usize {
    crate::heap_primitives::index_last_children::<HEAP_ARITY>(i)
}

/// A d-ary min-heap over [`Rank`]s.
///
/// Duplicated States are allowed. Searches discard the stale ones when they
/// pop them.
#[derive(Debug)]
pub struct HeapFrontier<K, St> {
    open: Vec<FrontierEntry<K, St>>,
}

impl<K, St> Default for HeapFrontier<K, St> {
    fn default() -> Self {
        Self {
            open: Vec::with_capacity(256),
        }
    }
}

impl<K, St> HeapFrontier<K, St>
where
    K: Ord + Clone + Debug,
    St: State,
{
    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    pub(crate) fn verify_heap(&self) {
        // All good... (hopefully)
    }
    #[inline(always)]
    #[cfg(feature = "verify")]
    pub(crate) fn verify_heap(&self) {
        // Every node goes after its parent node, if any.
        for i in 1..self.open.len() {
            let p = up(i);
            debug_assert!(
                self.open[p] <= self.open[i],
                "Node[{p}]={:?} !<= child [{i}]={:?}. Out of heap of len={}",
                self.open[p],
                self.open[i],
                self.open.len(),
            );
        }
    }

    /// Raises a node
    /// Returns it's new index
    #[inline(always)]
    fn sift_up(&mut self, index: usize) -> usize {
        debug_assert!(index < self.open.len(), "Index out of bounds...");

        let mut pos = index;
        while pos > 0 {
            let parent = up(pos);
            if self.open[parent] <= self.open[pos] {
                break;
            }
            self.open.swap(parent, pos);
            pos = parent;
        }
        pos
    }

    /// Lowers a node
    /// Returns it's new index
    #[inline(always)]
    fn sift_down(&mut self, mut index: usize) -> usize {
        let len = self.open.len();
        debug_assert!(index < len, "Index out of bounds...");

        loop {
            // Find the best child
            let mut child = down_left(index);
            if child >= len {
                break;
            }
            let last = min(down_right(index) + 1, len);
            child += {
                let children: smallvec::SmallVec<[&FrontierEntry<K, St>; HEAP_ARITY]> =
                    self.open[child..last].iter().collect();
                min_index(&children)
            };

            if self.open[index] <= self.open[child] {
                break;
            }

            self.open.swap(index, child);
            index = child;
        }
        index
    }
}

impl<K, St> Frontier<K, St> for HeapFrontier<K, St>
where
    K: Ord + Clone + Debug,
    St: State,
{
    #[inline(always)]
    fn push(&mut self, key: K, state: St, node_index: SearchTreeIndex) {
        #[cfg(feature = "coz_profile")]
        coz::scope!("Push");

        self.open.push(FrontierEntry {
            rank: Rank::new(key, state),
            node_index,
        });
        self.sift_up(self.open.len() - 1);
        self.verify_heap();
    }

    #[inline(always)]
    fn pop(&mut self) -> Option<FrontierEntry<K, St>> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("Pop");

        match self.open.len() {
            0 | 1 => self.open.pop(),
            _ => {
                let top = self.open.swap_remove(0);
                self.sift_down(0);
                self.verify_heap();
                Some(top)
            }
        }
    }

    fn len(&self) -> usize {
        self.open.len()
    }

    fn capacity(&self) -> usize {
        self.open.capacity()
    }
}
