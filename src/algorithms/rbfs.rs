//! Recursive best-first search.
//!
//! The recursion lives in an explicit stack of [`Frame`]s instead of the call
//! stack, so its depth can be capped and deep problems can't overflow.
//!
//! Every frame remembers the f-values of its children. When the best child of
//! a frame is worse than the frame's limit the frame is dropped and its parent
//! learns that child's f-value, which lets the search backtrack to a sibling
//! and come back later if that sibling turns out to be worse.

use std::marker::PhantomData;

use rustc_hash::FxHashSet;

use crate::config::SearchConfig;
use crate::errors::Result;
use crate::errors::SearchError;
use crate::heuristic::Heuristic;
use crate::problem::Problem;
use crate::search::SearchResult;
use crate::space::Cost;
use crate::space::Neighbours;
use crate::space::Path;
use crate::space::Space;
use crate::space::State;

#[derive(Clone, Debug)]
struct Child<St, C> {
    state: St,
    g: C,
    /// Backed-up f-value. Grows when a subtree fails.
    f: C,
}

#[derive(Clone, Debug)]
struct Frame<St, C> {
    state: St,
    f_limit: C,
    children: Vec<Child<St, C>>,
    /// The child being explored by the frame right above this one.
    active: usize,
}

impl<St, C> Frame<St, C>
where
    St: State,
    C: Cost,
{
    /// Index of the best child and the f-value of the runner-up.
    fn best_two(&self) -> Option<(usize, C)> {
        let mut best: Option<usize> = None;
        let mut second = C::max_value();
        for (i, child) in self.children.iter().enumerate() {
            match best {
                None => best = Some(i),
                Some(b) => {
                    let current = &self.children[b];
                    if (&child.f, &child.state) < (&current.f, &current.state) {
                        second = current.f;
                        best = Some(i);
                    } else if child.f < second {
                        second = child.f;
                    }
                }
            }
        }
        best.map(|b| (b, second))
    }
}

#[derive(Debug)]
pub struct RecursiveBestFirstSearch<'p, H, P, Sp, St, C>
where
    H: Heuristic<Sp, St, C>,
    P: Problem<Sp, St, C>,
    Sp: Space<St, C>,
    St: State,
    C: Cost,
{
    problem: &'p P,
    config: SearchConfig,

    stack: Vec<Frame<St, C>>,
    /// States of every frame in the stack, to avoid walking in circles.
    on_path: FxHashSet<St>,
    expanded: usize,
    max_stack_len: usize,

    _phantom_heuristic: PhantomData<H>,
    _phantom_space: PhantomData<Sp>,
}

impl<'p, H, P, Sp, St, C> RecursiveBestFirstSearch<'p, H, P, Sp, St, C>
where
    H: Heuristic<Sp, St, C>,
    P: Problem<Sp, St, C>,
    Sp: Space<St, C>,
    St: State,
    C: Cost,
{
    const NAME: &'static str = "RBFS";

    #[must_use]
    pub fn new(problem: &'p P, config: SearchConfig) -> Self {
        Self {
            problem,
            config,
            stack: vec![],
            on_path: FxHashSet::default(),
            expanded: 0,
            max_stack_len: 0,
            _phantom_heuristic: PhantomData,
            _phantom_space: PhantomData,
        }
    }

    pub fn run(&mut self) -> Result<SearchResult<St, C>> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("RecursiveBestFirstSearch");

        let origin = self.problem.origin().clone();
        if !self.problem.is_searchable() {
            log::debug!(
                "{}: nothing to search from {origin} towards {} goals",
                Self::NAME,
                self.problem.goals().len()
            );
            return Ok(SearchResult::failure(0));
        }
        log::debug!(
            "{}: searching from {origin} towards {} goals",
            Self::NAME,
            self.problem.goals().len()
        );

        let h = self.h(&origin)?;
        if self.problem.is_goal(&origin) {
            return Ok(SearchResult::success(Path::new_from_start(origin), 0));
        }
        self.push_frame(origin, C::zero(), h, C::max_value())?;

        loop {
            let Some(frame) = self.stack.last_mut() else {
                break;
            };

            let backed_up = match frame.best_two() {
                None => C::max_value(),
                Some((best, second)) => {
                    let child = &frame.children[best];
                    if !child.f.valid() || child.f > frame.f_limit {
                        child.f
                    } else {
                        let child = child.clone();
                        let f_limit = std::cmp::min(frame.f_limit, second);
                        frame.active = best;

                        if self.problem.is_goal(&child.state) {
                            return Ok(self.success(child));
                        }
                        self.push_frame(child.state, child.g, child.f, f_limit)?;
                        continue;
                    }
                }
            };

            // Backtrack
            if let Some(frame) = self.stack.pop() {
                log::trace!("{}: leaving {} with f={backed_up}", Self::NAME, frame.state);
                self.on_path.remove(&frame.state);
            }
            if let Some(parent) = self.stack.last_mut() {
                parent.children[parent.active].f = backed_up;
            }
        }

        log::debug!(
            "{}: no path left after {} expansions",
            Self::NAME,
            self.expanded
        );
        Ok(SearchResult::failure(self.expanded))
    }

    /// Expands a State into a new frame on top of the stack.
    fn push_frame(&mut self, state: St, g: C, f: C, f_limit: C) -> Result<()> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("NodeExpansion");

        if self.stack.len() >= self.config.max_depth {
            log::warn!(
                "{}: {state} would go beyond {} frames",
                Self::NAME,
                self.config.max_depth
            );
            return Err(SearchError::RecursionLimitExceeded {
                limit: self.config.max_depth,
            });
        }
        if self
            .config
            .max_expansions
            .is_some_and(|limit| self.expanded >= limit)
        {
            log::warn!(
                "{}: giving up after {} expansions",
                Self::NAME,
                self.expanded
            );
            return Err(SearchError::ExpansionLimitExhausted(self.expanded));
        }

        self.expanded += 1;
        log::trace!(
            "{}: expanding {state} (g={g}, f={f}, limit={f_limit}, #{})",
            Self::NAME,
            self.expanded
        );
        self.on_path.insert(state.clone());

        let mut neighbours: Neighbours<St, C> = self.problem.space().neighbours(&state);
        neighbours.sort_by(|a, b| a.0.cmp(&b.0));

        let mut children = Vec::with_capacity(neighbours.len());
        for (s, step) in neighbours {
            if self.on_path.contains(&s) {
                continue;
            }
            let child_g = g.saturating_add(&step);
            let child_f = std::cmp::max(child_g.saturating_add(&self.h(&s)?), f);
            children.push(Child {
                state: s,
                g: child_g,
                f: child_f,
            });
        }

        self.stack.push(Frame {
            state,
            f_limit,
            children,
            active: 0,
        });
        self.max_stack_len = self.max_stack_len.max(self.stack.len());
        Ok(())
    }

    fn success(&self, goal: Child<St, C>) -> SearchResult<St, C> {
        #[cfg(feature = "coz_profile")]
        coz::progress!("GoalFound");

        let mut states: Vec<St> = self.stack.iter().map(|f| f.state.clone()).collect();
        states.push(goal.state);
        let path = Path {
            states,
            cost: goal.g,
        };
        log::debug!(
            "{}: reached {} at cost {} after {} expansions",
            Self::NAME,
            goal_name(&path),
            path.cost,
            self.expanded
        );
        SearchResult::success(path, self.expanded)
    }

    #[inline(always)]
    fn h(&self, s: &St) -> Result<C> {
        H::estimate(self.problem.space(), s, self.problem.goals())
            .inspect_err(|e| log::warn!("{}: {e}", Self::NAME))
    }

    pub fn write_memory_stats<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        use size::Size;
        use std::mem::size_of;
        use thousands::Separable;

        writeln!(out, "{} Stats:", Self::NAME)?;
        let s = size_of::<Frame<St, C>>();
        let l = self.max_stack_len;
        writeln!(
            out,
            "  - |Stack|*: {} ({} + children)",
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

fn goal_name<St: State, C: Cost>(path: &Path<St, C>) -> String {
    path.end().map(|s| s.to_string()).unwrap_or_default()
}

pub fn recursive_best_first_search<H, P, Sp, St, C>(
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
    RecursiveBestFirstSearch::<H, _, _, _, _>::new(problem, config).run()
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::algorithms::best_first::tests::*;
    use crate::algorithms::ucs::uniform_cost_search;
    use crate::problems::graph::EuclideanDistance;
    use crate::problems::graph::GraphCost;
    use crate::problems::graph::GraphProblem;
    use crate::problems::graph::NodeId;
    use crate::problems::random::random_grid;

    fn rbfs_with(p: &GraphProblem, config: SearchConfig) -> Result<SearchResult<NodeId, GraphCost>> {
        recursive_best_first_search::<EuclideanDistance, _, _, _, _>(p, config)
    }

    fn rbfs(p: &GraphProblem) -> Result<SearchResult<NodeId, GraphCost>> {
        rbfs_with(p, SearchConfig::default())
    }

    /// 1 -> 2 -> ... -> 10 along the x axis.
    fn long_chain() -> GraphProblem {
        let mut s = String::from("Nodes:\n");
        for i in 1..=10 {
            s.push_str(&format!("{i}: ({i},0)\n"));
        }
        s.push_str("Edges:\n");
        for i in 1..10 {
            s.push_str(&format!("({i},{}): 1\n", i + 1));
        }
        s.push_str("Origin:\n1\nDestinations:\n10\n");
        problem(&s)
    }

    #[test]
    fn linear_chain() {
        let r = rbfs(&linear()).unwrap();
        assert_eq!(r.goal, Some(n(3)));
        assert_eq!(r.path.states, ids(&[1, 2, 3]));
        assert_eq!(r.path.cost, c(2.0));
        assert_eq!(r.expanded, 2);
    }

    #[test]
    fn disconnected_origin() {
        assert_eq!(rbfs(&disconnected()), Ok(SearchResult::failure(1)));
    }

    #[test]
    fn origin_goal() {
        let p = GraphProblem::new(linear().graph().clone(), n(3), ids(&[3]));
        let r = rbfs(&p).unwrap();
        assert_eq!(r.path.states, ids(&[3]));
        assert_eq!(r.expanded, 0);
    }

    #[test]
    fn ties_go_to_the_smaller_id() {
        let r = rbfs(&tie()).unwrap();
        assert_eq!(r.goal, Some(n(2)));
        assert_eq!(r.expanded, 1);
    }

    #[test]
    fn missing_coordinates_abort() {
        assert_eq!(
            rbfs(&missing_coordinate()),
            Err(SearchError::MissingCoordinate("2".to_string()))
        );
    }

    #[test]
    fn backtracks_to_cheaper_siblings() {
        let r = rbfs(&detour()).unwrap();
        assert_eq!(r.path.states, ids(&[1, 2, 3, 4]));
        assert_eq!(r.path.cost, c(3.0));
    }

    #[test]
    fn assignment_sample() {
        let r = rbfs(&assignment()).unwrap();
        assert_eq!(r.goal, Some(n(4)));
        assert_eq!(r.path.states, ids(&[2, 1, 4]));
        assert_eq!(r.path.cost, c(10.0));
        assert_eq!(r.expanded, 3);
    }

    #[test]
    fn cycles_terminate() {
        let p = problem(indoc! {"
            Nodes:
            1: (0,0)
            2: (1,0)
            3: (1,1)
            9: (5,5)
            Edges:
            (1,2): 1
            (2,1): 1
            (2,3): 2
            (3,1): 2
            (3,3): 1
            Origin:
            1
            Destinations:
            9
        "});
        let r = rbfs(&p).unwrap();
        assert!(!r.is_success());
        assert!(r.path.is_empty());
    }

    #[test]
    fn depth_limit() {
        let p = long_chain();
        assert_eq!(
            rbfs_with(&p, SearchConfig::default().with_max_depth(3)),
            Err(SearchError::RecursionLimitExceeded { limit: 3 })
        );
        let r = rbfs_with(&p, SearchConfig::default().with_max_depth(9)).unwrap();
        assert_eq!(r.path.len(), 9);
        assert_eq!(r.expanded, 9);
    }

    #[test]
    fn expansion_limit() {
        let p = long_chain();
        assert_eq!(
            rbfs_with(&p, SearchConfig::default().with_max_expansions(4)),
            Err(SearchError::ExpansionLimitExhausted(4))
        );
    }

    #[test]
    fn optimal_on_random_grids() {
        let mut rng = ChaCha8Rng::seed_from_u64(0xB0B);
        let mut solved = 0;
        for _ in 0..10 {
            let p = random_grid(&mut rng, 4, 4, 1);
            let ucs = uniform_cost_search(&p, SearchConfig::default()).unwrap();
            // Proving there's no path means walking every simple path.
            if !ucs.is_success() {
                continue;
            }
            solved += 1;
            let r = rbfs(&p).unwrap();
            assert_eq!(r.goal, ucs.goal, "{p}");
            assert_eq!(r.path.cost, ucs.path.cost, "{p}");
            assert!(p.space().valid_path(&r.path), "{p}");
            assert_eq!(r, rbfs(&p).unwrap());
        }
        assert!(solved > 0);
    }
}
