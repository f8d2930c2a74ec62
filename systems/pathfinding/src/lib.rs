#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Weighted A* search over the Hexfield tile store.
//!
//! The search treats hex distance as its heuristic. Because every tile costs
//! at least one step, the heuristic never overestimates the remaining cost,
//! so the first time the goal is popped from the frontier the reconstructed
//! path is optimal.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use hexfield_core::{AxialCoord, Path};
use hexfield_world::{query, HexMap};

/// Pure pathfinding system.
///
/// Each call allocates its own frontier and bookkeeping; nothing is retained
/// between searches, so a single instance may serve any number of maps.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pathfinder;

impl Pathfinder {
    /// Creates a new pathfinder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Finds the lowest-cost route from `start` to `goal`, both inclusive.
    ///
    /// Returns `None` when the frontier empties without reaching the goal;
    /// an unreachable goal is a normal outcome, not an error. Cells absent
    /// from the map or marked impassable are never stepped onto. The start
    /// itself is seeded without a passability check, preserving the
    /// documented behavior that a search may begin on blocked terrain.
    #[must_use]
    pub fn find_path(&self, map: &HexMap, start: AxialCoord, goal: AxialCoord) -> Option<Path> {
        let mut frontier = BinaryHeap::new();
        let mut came_from: HashMap<AxialCoord, AxialCoord> = HashMap::new();
        let mut g_score: HashMap<AxialCoord, u32> = HashMap::new();

        // The sequence number is a secondary heap key so that equal-priority
        // pops are deterministic across runs and platforms.
        let mut sequence: u64 = 0;
        frontier.push(Reverse((0u32, sequence, start)));
        let _ = g_score.insert(start, 0);

        while let Some(Reverse((_, _, current))) = frontier.pop() {
            if current == goal {
                return Some(reconstruct(&came_from, current));
            }

            let current_g = g_score[&current];

            for neighbor in current.neighbors() {
                let Some(step_cost) = query::step_cost(map, neighbor) else {
                    continue;
                };

                let tentative_g = current_g.saturating_add(step_cost);
                let improved = g_score
                    .get(&neighbor)
                    .map_or(true, |&known| tentative_g < known);
                if !improved {
                    continue;
                }

                let _ = came_from.insert(neighbor, current);
                let _ = g_score.insert(neighbor, tentative_g);

                sequence += 1;
                let priority = tentative_g.saturating_add(neighbor.distance_to(goal));
                frontier.push(Reverse((priority, sequence, neighbor)));
            }
        }

        None
    }
}

fn reconstruct(came_from: &HashMap<AxialCoord, AxialCoord>, goal: AxialCoord) -> Path {
    let mut steps = vec![goal];
    let mut current = goal;

    while let Some(&previous) = came_from.get(&current) {
        current = previous;
        steps.push(current);
    }

    steps.reverse();
    Path::new(steps)
}
