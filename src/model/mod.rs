//! Data model for congestion-aware routing
//!
//! Contains the base road network, the traffic-feed records, and the
//! weighted graph snapshot derived from them.

pub mod congestion;
pub mod feed;
pub mod road;
pub mod weighted;

pub use congestion::CongestionLevel;
pub use feed::{CongestionObservation, RoadSegment};
pub use road::{IndexedPoint, RoadEdge, RoadGraph, RoadNode};
pub use weighted::WeightedGraph;
