//! Road network components - nodes and directed street edges

use geo::Point;

/// Road graph node
#[derive(Debug, Clone)]
pub struct RoadNode {
    /// Identifier assigned by the graph provider (OSM id or similar)
    pub id: i64,
    /// Node coordinates, x = longitude, y = latitude
    pub geometry: Point<f64>,
}

/// Directed road graph edge
///
/// Physical attributes only; the derived travel-time weight lives in the
/// [`WeightedGraph`](crate::model::WeightedGraph) snapshot, never here.
#[derive(Debug, Clone)]
pub struct RoadEdge {
    /// Edge length in meters
    pub length_m: f64,
    /// Posted speed limit in km/h, when the provider knows it
    pub maxspeed_kmh: Option<f64>,
}
