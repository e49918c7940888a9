//! Congestion-aware fastest-path routing over a fixed urban road network.
//!
//! The crate ingests a static road graph and a periodically refreshed feed
//! of live congestion observations, spreads each observation onto the graph
//! edges that realize its road segment, derives a per-edge travel-time
//! weight (`itime`), and answers shortest-travel-time queries between
//! arbitrary coordinates.
//!
//! Congestion data ages out on the feed's five-minute cadence:
//! [`LiveGraph`](live::LiveGraph) owns the current [`WeightedGraph`]
//! snapshot and rebuilds it wholesale when stale, so queries always run
//! against one immutable, internally consistent graph.

pub mod algo;
pub mod error;
pub mod live;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use live::LiveGraph;
pub use model::{CongestionLevel, RoadGraph, WeightedGraph};
