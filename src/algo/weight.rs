//! Per-edge travel-time weight ("itime") computation.

use crate::model::{CongestionLevel, RoadEdge};

/// Speed limit assumed when the graph provider does not know one, km/h.
pub const DEFAULT_MAXSPEED_KMH: f64 = 50.0;

/// Fixed multiplier for friction the model does not capture (traffic
/// lights, pedestrians, turns). Not configurable.
pub const FRICTION_FACTOR: f64 = 2.0;

const KMH_TO_MPS: f64 = 1000.0 / 3600.0;

/// Travel-time weight of one edge, in seconds.
///
/// `itime = (length / speed) * congestion_factor * FRICTION_FACTOR`, where
/// the speed limit falls back to [`DEFAULT_MAXSPEED_KMH`] and a missing
/// congestion reading is treated as [`CongestionLevel::NoData`]. Pure
/// function of its inputs: rebuilding from identical data yields identical
/// weights.
pub fn edge_travel_time(edge: &RoadEdge, congestion: Option<CongestionLevel>) -> f64 {
    let speed_mps = edge.maxspeed_kmh.unwrap_or(DEFAULT_MAXSPEED_KMH) * KMH_TO_MPS;
    let level = congestion.unwrap_or(CongestionLevel::NoData);
    (edge.length_m / speed_mps) * level.factor() * FRICTION_FACTOR
}
