//! Seeded random problems, for tests and benchmarks.

use rand::Rng;

use crate::heuristic::Coordinate;
use crate::problems::graph::Graph;
use crate::problems::graph::GraphCost;
use crate::problems::graph::GraphProblem;
use crate::problems::graph::NodeId;

const EDGE_PROBABILITY: f64 = 0.8;
const DIAGONAL_PROBABILITY: f64 = 0.2;
const MAX_EXTRA_COST: u32 = 4;
const RANDOM_STATE_MAX_TRIES: usize = 10_000;

/// A `width`x`height` grid with random one-way streets.
///
/// Node `y*width + x` sits at `(x, y)`. Every edge costs a whole number no
/// smaller than the distance it covers, so the Euclidean distance stays
/// admissible and path costs add up exactly.
pub fn random_grid<R: Rng>(r: &mut R, width: usize, height: usize, num_goals: usize) -> GraphProblem {
    let id = |x: usize, y: usize| NodeId::numeric((y * width + x) as i64);

    let mut builder = Graph::builder();
    for y in 0..height {
        for x in 0..width {
            builder = builder.node(id(x, y), Some(Coordinate::new(x as f64, y as f64)));
        }
    }

    for y in 0..height {
        for x in 0..width {
            let orthogonal = [(1isize, 0isize), (-1, 0), (0, 1), (0, -1)];
            let diagonal = [(1isize, 1isize), (-1, 1), (1, -1), (-1, -1)];

            for (dx, dy) in orthogonal {
                let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy))
                else {
                    continue;
                };
                if nx < width && ny < height && r.random_bool(EDGE_PROBABILITY) {
                    let cost = 1 + r.random_range(0..MAX_EXTRA_COST);
                    builder = builder.edge(id(x, y), id(nx, ny), GraphCost::new(cost as f64));
                }
            }
            for (dx, dy) in diagonal {
                let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy))
                else {
                    continue;
                };
                if nx < width && ny < height && r.random_bool(DIAGONAL_PROBABILITY) {
                    let cost = 2 + r.random_range(0..MAX_EXTRA_COST);
                    builder = builder.edge(id(x, y), id(nx, ny), GraphCost::new(cost as f64));
                }
            }
        }
    }

    let num_nodes = width * height;
    let origin = id(r.random_range(0..width), r.random_range(0..height));
    let mut goals = vec![];
    for _tries in 0..RANDOM_STATE_MAX_TRIES {
        if goals.len() >= num_goals.min(num_nodes.saturating_sub(1)) {
            break;
        }
        let goal = id(r.random_range(0..width), r.random_range(0..height));
        if goal != origin && !goals.contains(&goal) {
            goals.push(goal);
        }
    }

    GraphProblem::new(builder.build(), origin, goals)
}
