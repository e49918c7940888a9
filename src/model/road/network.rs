//! Directed road graph with a spatial index for coordinate snapping.

use geo::Point;
use petgraph::graph::{DiGraph, NodeIndex};
use rstar::{RTree, primitives::GeomWithData};

use super::components::{RoadEdge, RoadNode};
use crate::Error;

/// Entry of the snapping index: node coordinates tagged with the graph index
pub type IndexedPoint = GeomWithData<Point<f64>, NodeIndex>;

/// Immutable directed road network.
///
/// Nodes carry coordinates, edges carry physical attributes. Both directions
/// of a two-way street are distinct edges with independent attributes. The
/// graph is read-only for the lifetime of the process; congestion and travel
/// times are kept in [`WeightedGraph`](crate::model::WeightedGraph) snapshots
/// built on top of it.
pub struct RoadGraph {
    pub graph: DiGraph<RoadNode, RoadEdge>,
    rtree: RTree<IndexedPoint>,
}

impl RoadGraph {
    /// Wrap a finished digraph, building the snapping index over its nodes.
    pub fn new(graph: DiGraph<RoadNode, RoadEdge>) -> Self {
        let points: Vec<IndexedPoint> = graph
            .node_indices()
            .map(|idx| IndexedPoint::new(graph[idx].geometry, idx))
            .collect();
        let rtree = RTree::bulk_load(points);
        Self { graph, rtree }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Nearest graph node to an arbitrary coordinate.
    ///
    /// # Errors
    ///
    /// [`Error::NoNodeFound`] only when the graph has no nodes.
    pub fn nearest_node(&self, point: Point<f64>) -> Result<NodeIndex, Error> {
        self.rtree
            .nearest_neighbor(&point)
            .map(|entry| entry.data)
            .ok_or(Error::NoNodeFound)
    }
}

impl std::fmt::Debug for RoadGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoadGraph")
            .field("nodes", &self.node_count())
            .field("edges", &self.edge_count())
            .finish()
    }
}
