//! Dijkstra's algorithm over road segments.

use std::{cmp::Ordering, collections::BinaryHeap};

use hashbrown::HashMap;

use crate::model::RoadNetwork;
use crate::{NodeId, SegmentId};

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node: NodeId,
}

impl Eq for State {}

// Implement Ord for State to use in BinaryHeap
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from standard Rust BinaryHeap); ties
        // broken by node id so the order is total.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest path from `start` to `target`, expanding whole segments.
///
/// Returns the segment chain in travel order, or `None` when `target` is
/// unreachable. Decrease-key is lazy: an improved node is pushed again and
/// stale heap entries are skipped when popped.
pub(crate) fn segment_shortest_path(
    network: &RoadNetwork,
    start: NodeId,
    target: NodeId,
) -> Option<Vec<SegmentId>> {
    let mut distances: HashMap<NodeId, f64> = HashMap::new();
    let mut predecessors: HashMap<NodeId, SegmentId> = HashMap::new();
    let mut heap = BinaryHeap::new();

    distances.insert(start, 0.0);
    heap.push(State {
        cost: 0.0,
        node: start,
    });

    let mut reached = start == target;
    while let Some(State { cost, node }) = heap.pop() {
        if node == target {
            reached = true;
            break;
        }

        // Skip if we've found a better path
        if distances.get(&node).is_some_and(|&best| cost > best) {
            continue;
        }

        for seg_id in network.node_ref(node).out_segments() {
            let Some(segment) = network.segment(seg_id) else {
                continue;
            };
            let next = segment.end();
            let next_cost = cost + segment.length();

            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    predecessors.insert(next, seg_id);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        predecessors.insert(next, seg_id);
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    if !reached {
        return None;
    }

    // Walk the predecessor chain backward from the target, then reverse.
    let mut chain = Vec::new();
    let mut current = target;
    while current != start {
        let seg_id = *predecessors.get(&current)?;
        chain.push(seg_id);
        current = network.segment(seg_id)?.start();
    }
    chain.reverse();
    Some(chain)
}
