//! Algorithmic core: congestion spreading and travel-time weighting.

pub mod spread;
pub mod weight;

pub use spread::{SpreadOutcome, SpreadReport, spread_congestion};
pub use weight::{DEFAULT_MAXSPEED_KMH, FRICTION_FACTOR, edge_travel_time};
