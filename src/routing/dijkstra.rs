use std::{cmp::Ordering, collections::BinaryHeap};

use hashbrown::HashMap;
use petgraph::graph::{DiGraph, EdgeIndex, EdgeReference, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::model::{RoadEdge, RoadNode};

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node: NodeIndex,
}

impl Eq for State {}

// Implement Ord for State to use in BinaryHeap
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from standard Rust BinaryHeap); ties
        // fall back to node index so visitation order is deterministic.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.index().cmp(&self.node.index()))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A reconstructed shortest path: node sequence, the edges the search
/// relaxed between them, and the total cost.
pub(crate) struct TracedPath {
    pub(crate) nodes: Vec<NodeIndex>,
    pub(crate) edges: Vec<EdgeIndex>,
    pub(crate) cost: f64,
}

/// Dijkstra's algorithm over the road digraph with a caller-chosen edge
/// cost (physical length for congestion spreading, `itime` for routing).
///
/// Costs must be non-negative. Returns `None` when `target` is unreachable
/// from `start`; a path from a node to itself is `Some` with no edges.
pub(crate) fn shortest_path<F>(
    graph: &DiGraph<RoadNode, RoadEdge>,
    start: NodeIndex,
    target: NodeIndex,
    edge_cost: F,
) -> Option<TracedPath>
where
    F: Fn(EdgeReference<'_, RoadEdge>) -> f64,
{
    let mut distances: HashMap<NodeIndex, f64> = HashMap::new();
    let mut predecessors: HashMap<NodeIndex, (NodeIndex, EdgeIndex)> = HashMap::new();
    let mut heap = BinaryHeap::new();

    distances.insert(start, 0.0);
    heap.push(State {
        cost: 0.0,
        node: start,
    });

    while let Some(State { cost, node }) = heap.pop() {
        if node == target {
            return Some(reconstruct(start, target, cost, &predecessors));
        }

        // Skip if we've found a better path
        if let Some(&best) = distances.get(&node) {
            if cost > best {
                continue;
            }
        }

        // Examine neighbors
        for edge in graph.edges(node) {
            let next = edge.target();
            let next_cost = cost + edge_cost(edge);

            // Add or update distance if better using Entry API
            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    predecessors.insert(next, (node, edge.id()));
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        predecessors.insert(next, (node, edge.id()));
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    None
}

fn reconstruct(
    start: NodeIndex,
    target: NodeIndex,
    cost: f64,
    predecessors: &HashMap<NodeIndex, (NodeIndex, EdgeIndex)>,
) -> TracedPath {
    let mut nodes = vec![target];
    let mut edges = Vec::new();

    // Follow predecessors backward from target to start
    let mut current = target;
    while current != start {
        match predecessors.get(&current) {
            Some(&(prev, via)) => {
                edges.push(via);
                nodes.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    nodes.reverse();
    edges.reverse();

    TracedPath { nodes, edges, cost }
}

#[cfg(test)]
mod tests {
    use geo::Point;
    use petgraph::graph::DiGraph;
    use petgraph::visit::EdgeRef;

    use super::shortest_path;
    use crate::model::{RoadEdge, RoadNode};

    fn node(id: i64) -> RoadNode {
        RoadNode {
            id,
            geometry: Point::new(0.0, 0.0),
        }
    }

    fn edge(length_m: f64) -> RoadEdge {
        RoadEdge {
            length_m,
            maxspeed_kmh: None,
        }
    }

    /// Diamond: a->b->d is 300 m, a->c->d is 150 m.
    fn diamond() -> (
        DiGraph<RoadNode, RoadEdge>,
        [petgraph::graph::NodeIndex; 4],
    ) {
        let mut graph = DiGraph::new();
        let a = graph.add_node(node(0));
        let b = graph.add_node(node(1));
        let c = graph.add_node(node(2));
        let d = graph.add_node(node(3));
        graph.add_edge(a, b, edge(100.0));
        graph.add_edge(b, d, edge(200.0));
        graph.add_edge(a, c, edge(100.0));
        graph.add_edge(c, d, edge(50.0));
        (graph, [a, b, c, d])
    }

    #[test]
    fn picks_the_cheaper_branch() {
        let (graph, [a, _, c, d]) = diamond();
        let path = shortest_path(&graph, a, d, |e| e.weight().length_m).unwrap();
        assert_eq!(path.nodes, vec![a, c, d]);
        assert_eq!(path.edges.len(), 2);
        assert!((path.cost - 150.0).abs() < 1e-9);
    }

    #[test]
    fn respects_edge_direction() {
        let (graph, [a, _, _, d]) = diamond();
        // All edges point away from a; nothing reaches it back.
        assert!(shortest_path(&graph, d, a, |e| e.weight().length_m).is_none());
    }

    #[test]
    fn trivial_path_has_no_edges() {
        let (graph, [a, ..]) = diamond();
        let path = shortest_path(&graph, a, a, |e| e.weight().length_m).unwrap();
        assert_eq!(path.nodes, vec![a]);
        assert!(path.edges.is_empty());
        assert_eq!(path.cost, 0.0);
    }

    #[test]
    fn cost_function_changes_the_winner() {
        let (graph, [a, b, c, d]) = diamond();
        // Inverted costs: make the physically longer branch cheap.
        let path = shortest_path(&graph, a, d, |e| {
            if e.target() == b || e.source() == b {
                1.0
            } else {
                1000.0
            }
        })
        .unwrap();
        assert_eq!(path.nodes, vec![a, b, d]);
        let _ = c;
    }
}
