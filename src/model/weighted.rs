//! The weighted ("intelligent") graph snapshot.

use std::sync::Arc;

use geo::Point;
use petgraph::graph::{EdgeIndex, NodeIndex};

use super::congestion::CongestionLevel;
use super::road::RoadGraph;
use crate::Error;

/// One immutable snapshot of the road graph with derived travel times.
///
/// Holds the shared topology plus, for every edge, the congestion level the
/// last rebuild spread onto it and the `itime` travel-time weight in seconds.
/// A snapshot is never mutated after
/// [`build_weighted_graph`](crate::loading::build_weighted_graph) returns it;
/// refreshes publish a whole new snapshot instead. Queries may therefore run
/// concurrently against one snapshot without synchronization.
pub struct WeightedGraph {
    road: Arc<RoadGraph>,
    congestion: Vec<Option<CongestionLevel>>,
    itime_s: Vec<f64>,
}

impl WeightedGraph {
    pub(crate) fn from_parts(
        road: Arc<RoadGraph>,
        congestion: Vec<Option<CongestionLevel>>,
        itime_s: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(congestion.len(), road.edge_count());
        debug_assert_eq!(itime_s.len(), road.edge_count());
        Self {
            road,
            congestion,
            itime_s,
        }
    }

    /// The underlying topology.
    pub fn road(&self) -> &RoadGraph {
        &self.road
    }

    pub fn node_count(&self) -> usize {
        self.road.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.road.edge_count()
    }

    /// Travel-time weight of an edge, in seconds.
    pub fn itime(&self, edge: EdgeIndex) -> f64 {
        self.itime_s[edge.index()]
    }

    /// Congestion level spread onto an edge, if any segment covered it.
    pub fn congestion(&self, edge: EdgeIndex) -> Option<CongestionLevel> {
        self.congestion[edge.index()]
    }

    /// Snapping, delegated to the underlying road graph.
    ///
    /// # Errors
    ///
    /// [`Error::NoNodeFound`] only when the graph has no nodes.
    pub fn nearest_node(&self, point: Point<f64>) -> Result<NodeIndex, Error> {
        self.road.nearest_node(point)
    }
}

impl std::fmt::Debug for WeightedGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeightedGraph")
            .field("nodes", &self.node_count())
            .field("edges", &self.edge_count())
            .finish()
    }
}
