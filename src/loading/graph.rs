//! Road graph assembly from provider records.
//!
//! Graph acquisition itself (OSM extracts, municipal exports) belongs to an
//! external provider; this module defines the record contract that provider
//! must meet, plus a CSV realization of it.

use std::fs::File;
use std::path::Path;

use geo::Point;
use hashbrown::HashMap;
use log::info;
use petgraph::graph::DiGraph;
use serde::Deserialize;

use crate::Error;
use crate::model::{RoadEdge, RoadGraph, RoadNode};

/// One node as delivered by the graph provider.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeRecord {
    pub id: i64,
    pub lon: f64,
    pub lat: f64,
}

/// One directed edge as delivered by the graph provider.
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeRecord {
    pub from: i64,
    pub to: i64,
    pub length_m: f64,
    #[serde(default)]
    pub maxspeed_kmh: Option<f64>,
}

/// Assemble a [`RoadGraph`] from provider records.
///
/// # Errors
///
/// [`Error::InvalidData`] on a duplicate node id or an edge referencing an
/// unknown node id.
pub fn road_graph_from_records(
    nodes: Vec<NodeRecord>,
    edges: Vec<EdgeRecord>,
) -> Result<RoadGraph, Error> {
    let mut graph = DiGraph::with_capacity(nodes.len(), edges.len());
    let mut index_of = HashMap::with_capacity(nodes.len());

    for node in nodes {
        let idx = graph.add_node(RoadNode {
            id: node.id,
            geometry: Point::new(node.lon, node.lat),
        });
        if index_of.insert(node.id, idx).is_some() {
            return Err(Error::InvalidData(format!("duplicate node id {}", node.id)));
        }
    }

    for edge in edges {
        let from = resolve(&index_of, edge.from)?;
        let to = resolve(&index_of, edge.to)?;
        graph.add_edge(
            from,
            to,
            RoadEdge {
                length_m: edge.length_m,
                maxspeed_kmh: edge.maxspeed_kmh,
            },
        );
    }

    Ok(RoadGraph::new(graph))
}

fn resolve(
    index_of: &HashMap<i64, petgraph::graph::NodeIndex>,
    id: i64,
) -> Result<petgraph::graph::NodeIndex, Error> {
    index_of
        .get(&id)
        .copied()
        .ok_or_else(|| Error::InvalidData(format!("edge references unknown node id {id}")))
}

/// Load a road graph from two CSV files (nodes, then edges) whose headers
/// match the record field names.
///
/// # Errors
///
/// Returns an error if there are problems reading or processing data
pub fn load_road_graph(nodes_path: &Path, edges_path: &Path) -> Result<RoadGraph, Error> {
    let nodes = deserialize_csv_file(nodes_path)?;
    let edges = deserialize_csv_file(edges_path)?;
    let road = road_graph_from_records(nodes, edges)?;
    info!(
        "Loaded road graph: {} nodes, {} edges",
        road.node_count(),
        road.edge_count()
    );
    Ok(road)
}

fn deserialize_csv_file<T>(path: &Path) -> Result<Vec<T>, Error>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    let mut rows = Vec::new();
    for row in csv::Reader::from_reader(file).deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::{EdgeRecord, NodeRecord, road_graph_from_records};
    use crate::Error;

    fn node(id: i64, lon: f64) -> NodeRecord {
        NodeRecord { id, lon, lat: 41.4 }
    }

    fn edge(from: i64, to: i64) -> EdgeRecord {
        EdgeRecord {
            from,
            to,
            length_m: 500.0,
            maxspeed_kmh: Some(30.0),
        }
    }

    #[test]
    fn builds_directed_graph_from_records() {
        let road = road_graph_from_records(
            vec![node(10, 2.11), node(20, 2.12)],
            vec![edge(10, 20), edge(20, 10)],
        )
        .unwrap();
        assert_eq!(road.node_count(), 2);
        assert_eq!(road.edge_count(), 2);
    }

    #[test]
    fn rejects_unknown_node_reference() {
        let err =
            road_graph_from_records(vec![node(10, 2.11)], vec![edge(10, 99)]).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn rejects_duplicate_node_id() {
        let err = road_graph_from_records(vec![node(10, 2.11), node(10, 2.12)], vec![])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }
}
