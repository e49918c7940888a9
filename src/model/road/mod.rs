//! Base road network model

pub mod components;
pub mod network;

pub use components::{RoadEdge, RoadNode};
pub use network::{IndexedPoint, RoadGraph};
