//! The expansion loop shared by every frontier-based search.
//!
//! Strategies only differ in their [`OrderingPolicy`]: the key they rank
//! nodes by, the frontier holding them, when nodes get closed, and whether a
//! cheaper way of reaching a node is required before pushing it again.

use std::fmt::Debug;
use std::marker::PhantomData;

use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;

use crate::config::SearchConfig;
use crate::errors::Result;
use crate::errors::SearchError;
use crate::frontier::Frontier;
use crate::frontier::FrontierEntry;
use crate::problem::Problem;
use crate::search::SearchResult;
use crate::search::SearchTree;
use crate::search::SearchTreeIndex;
use crate::search::SearchTreeNode;
use crate::space::Cost;
use crate::space::Neighbours;
use crate::space::Space;
use crate::space::State;

/// How a strategy orders and prunes its frontier.
pub trait OrderingPolicy<Sp, St, C>: Debug
where
    Sp: Space<St, C>,
    St: State,
    C: Cost,
{
    type Key: Ord + Clone + Debug;
    type Frontier: Frontier<Self::Key, St>;

    const NAME: &'static str;

    /// Close nodes when pushing them instead of when expanding them.
    ///
    /// Closing on discovery expands every reached node exactly once. Closing
    /// on expansion lets stale duplicates pile up in the frontier.
    const CLOSE_ON_DISCOVERY: bool;

    /// Only push a node again when reaching it more cheaply.
    const TRACKS_BEST_G: bool;

    /// Push neighbours in descending id order, so a LIFO pops them ascending.
    const REVERSED_PUSH: bool = false;

    /// Ranks a State reached at cost `g`.
    fn key(&self, space: &Sp, goals: &[St], s: &St, g: C) -> Result<Self::Key>;
}

#[derive(Debug)]
pub struct BestFirstSearch<'p, O, P, Sp, St, C>
where
    O: OrderingPolicy<Sp, St, C>,
    P: Problem<Sp, St, C>,
    Sp: Space<St, C>,
    St: State,
    C: Cost,
{
    policy: O,
    problem: &'p P,
    config: SearchConfig,

    /// Every node ever pushed. Frontier entries point into it.
    search_tree: SearchTree<St, C>,
    open: O::Frontier,
    closed: FxHashSet<St>,
    /// Cheapest known `g` per State, only kept by policies tracking it.
    best_g: FxHashMap<St, C>,
    expanded: usize,

    _phantom_space: PhantomData<Sp>,
}

impl<'p, O, P, Sp, St, C> BestFirstSearch<'p, O, P, Sp, St, C>
where
    O: OrderingPolicy<Sp, St, C>,
    P: Problem<Sp, St, C>,
    Sp: Space<St, C>,
    St: State,
    C: Cost,
{
    #[must_use]
    pub fn new(policy: O, problem: &'p P, config: SearchConfig) -> Self {
        Self {
            policy,
            problem,
            config,
            search_tree: SearchTree::new(),
            open: O::Frontier::default(),
            closed: FxHashSet::default(),
            best_g: FxHashMap::default(),
            expanded: 0,
            _phantom_space: PhantomData,
        }
    }

    /// Searches for the first goal the policy reaches.
    ///
    /// A missing origin or an empty goal list is a failure without
    /// expansions, not an error.
    pub fn run(&mut self) -> Result<SearchResult<St, C>> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("BestFirstSearch");

        let origin = self.problem.origin().clone();
        if !self.problem.is_searchable() {
            log::debug!(
                "{}: nothing to search from {origin} towards {} goals",
                O::NAME,
                self.problem.goals().len()
            );
            return Ok(SearchResult::failure(0));
        }
        log::debug!(
            "{}: searching from {origin} towards {} goals",
            O::NAME,
            self.problem.goals().len()
        );

        let key = self.key(&origin, C::zero())?;
        if O::CLOSE_ON_DISCOVERY {
            self.closed.insert(origin.clone());
        }
        if O::TRACKS_BEST_G {
            self.best_g.insert(origin.clone(), C::zero());
        }
        let root = self.search_tree.push(SearchTreeNode::new_root(origin.clone()));
        self.open.push(key, origin, root);

        while let Some(FrontierEntry { rank, node_index }) = self.open.pop() {
            let state = rank.state;

            if !O::CLOSE_ON_DISCOVERY && self.closed.contains(&state) {
                log::trace!("{}: skipping stale {state}", O::NAME);
                continue;
            }

            if self
                .config
                .max_expansions
                .is_some_and(|limit| self.expanded >= limit)
            {
                log::warn!(
                    "{}: giving up after {} expansions",
                    O::NAME,
                    self.expanded
                );
                return Err(SearchError::ExpansionLimitExhausted(self.expanded));
            }

            #[cfg(feature = "coz_profile")]
            coz::scope!("NodeExpansion");
            self.expanded += 1;
            log::trace!(
                "{}: expanding {state} (g={}, #{})",
                O::NAME,
                self.search_tree[node_index].g(),
                self.expanded
            );

            if self.problem.is_goal(&state) {
                #[cfg(feature = "coz_profile")]
                coz::progress!("GoalFound");
                let path = self.search_tree.path(node_index);
                log::debug!(
                    "{}: reached {state} at cost {} after {} expansions",
                    O::NAME,
                    path.cost,
                    self.expanded
                );
                return Ok(SearchResult::success(path, self.expanded));
            }

            if !O::CLOSE_ON_DISCOVERY {
                self.closed.insert(state.clone());
            }
            self.expand(&state, node_index)?;
        }

        log::debug!(
            "{}: frontier exhausted after {} expansions",
            O::NAME,
            self.expanded
        );
        Ok(SearchResult::failure(self.expanded))
    }

    /// Pushes the neighbours of an expanded node worth exploring.
    fn expand(&mut self, state: &St, node_index: SearchTreeIndex) -> Result<()> {
        let g = self.search_tree[node_index].g();

        let mut neighbours: Neighbours<St, C> = self.problem.space().neighbours(state);
        // Stable, so parallel edges keep their input order.
        if O::REVERSED_PUSH {
            neighbours.sort_by(|a, b| b.0.cmp(&a.0));
        } else {
            neighbours.sort_by(|a, b| a.0.cmp(&b.0));
        }

        for (s, step) in neighbours {
            #[cfg(feature = "coz_profile")]
            coz::scope!("ReachNode");

            if self.closed.contains(&s) {
                continue;
            }
            let new_g = g.saturating_add(&step);
            if O::TRACKS_BEST_G {
                match self.best_g.get(&s) {
                    Some(best) if *best <= new_g => continue,
                    _ => {
                        self.best_g.insert(s.clone(), new_g);
                    }
                }
            }
            if O::CLOSE_ON_DISCOVERY {
                self.closed.insert(s.clone());
            }

            let key = self.key(&s, new_g)?;
            let index = self
                .search_tree
                .push(SearchTreeNode::new(s.clone(), node_index, step, new_g));
            self.open.push(key, s, index);
        }
        Ok(())
    }

    #[inline(always)]
    fn key(&self, s: &St, g: C) -> Result<O::Key> {
        self.policy
            .key(self.problem.space(), self.problem.goals(), s, g)
            .inspect_err(|e| log::warn!("{}: {e}", O::NAME))
    }

    pub fn write_memory_stats<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        use size::Size;
        use std::mem::size_of;
        use thousands::Separable;

        writeln!(out, "{} Stats:", O::NAME)?;
        let s = size_of::<SearchTreeNode<St, C>>();
        let l = self.search_tree.len();
        writeln!(
            out,
            "  - |Nodes|:  {} ({})",
            l.separate_with_commas(),
            Size::from_bytes(l * s)
        )?;

        let s = size_of::<FrontierEntry<O::Key, St>>();
        let l = self.open.len();
        let c = self.open.capacity();
        writeln!(
            out,
            "  - |Open|:   {} ({})",
            l.separate_with_commas(),
            Size::from_bytes(l * s)
        )?;
        writeln!(
            out,
            "  - |Open|*:  {} ({})",
            c.separate_with_commas(),
            Size::from_bytes(c * s)
        )?;

        let s = size_of::<St>();
        let l = self.closed.len();
        writeln!(
            out,
            "  - |Closed|: {} ({})",
            l.separate_with_commas(),
            Size::from_bytes(l * s)
        )?;

        writeln!(
            out,
            "  - Expanded nodes: {}",
            self.expanded.separate_with_commas()
        )?;

        Ok(())
    }
}
