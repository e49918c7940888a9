// Re-export key components
pub use crate::error::Error;
pub use crate::live::{LiveGraph, REFRESH_INTERVAL, is_stale};
pub use crate::loading::{
    CsvDirFeed, TrafficFeed, build_weighted_graph, load_road_graph, read_observations,
    read_segments, road_graph_from_records,
};
pub use crate::model::{
    CongestionLevel, CongestionObservation, RoadEdge, RoadGraph, RoadNode, RoadSegment,
    WeightedGraph,
};
pub use crate::routing::{RoutePlan, fastest_route, path_length, path_travel_time, travel_time};
