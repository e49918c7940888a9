//! This module is responsible for loading provider data (base road graph,
//! live traffic feed) and building weighted-graph snapshots from it.

mod builder;
pub mod feed;
pub mod graph;

pub use builder::build_weighted_graph;
pub use feed::{CsvDirFeed, TrafficFeed, read_observations, read_segments};
pub use graph::{EdgeRecord, NodeRecord, load_road_graph, road_graph_from_records};
