//! Fastest-path queries against a weighted-graph snapshot.
//!
//! All operations here are reads; any number of them may run concurrently
//! against the same snapshot.

pub(crate) mod dijkstra;
mod to_geojson;

use geo::Point;
use itertools::Itertools;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::Error;
use crate::model::WeightedGraph;
use dijkstra::shortest_path;

/// A computed fastest route between two snapped coordinates.
#[derive(Debug, Clone)]
pub struct RoutePlan {
    /// Node sequence from origin to destination, inclusive.
    pub nodes: Vec<NodeIndex>,
    /// Physical length of the route in meters.
    pub length_m: f64,
    /// Predicted travel time in seconds (total `itime`).
    pub time_s: f64,
}

/// Fastest route between two coordinates on the given snapshot.
///
/// Both coordinates are snapped to their nearest graph nodes, then the
/// search minimizes `itime`. Congestion only ever makes edges expensive,
/// never unusable, so connectivity equals the base graph's.
///
/// # Errors
///
/// [`Error::NoNodeFound`] on an empty graph, [`Error::NoPathFound`] when
/// the snapped endpoints are not connected. Never returns a partial route.
pub fn fastest_route(
    graph: &WeightedGraph,
    origin: Point<f64>,
    destination: Point<f64>,
) -> Result<RoutePlan, Error> {
    let start = graph.nearest_node(origin)?;
    let target = graph.nearest_node(destination)?;

    let path = shortest_path(&graph.road().graph, start, target, |e| graph.itime(e.id()))
        .ok_or(Error::NoPathFound)?;

    let length_m = path
        .edges
        .iter()
        .map(|&e| graph.road().graph[e].length_m)
        .sum();

    Ok(RoutePlan {
        nodes: path.nodes,
        length_m,
        time_s: path.cost,
    })
}

/// Travel time in seconds of the fastest route between two coordinates,
/// recomputed from scratch.
///
/// Callers already holding a [`RoutePlan`] should use
/// [`path_travel_time`] over its nodes instead; the two agree for the same
/// snapshot and endpoints.
///
/// # Errors
///
/// As [`fastest_route`].
pub fn travel_time(
    graph: &WeightedGraph,
    origin: Point<f64>,
    destination: Point<f64>,
) -> Result<f64, Error> {
    let start = graph.nearest_node(origin)?;
    let target = graph.nearest_node(destination)?;
    shortest_path(&graph.road().graph, start, target, |e| graph.itime(e.id()))
        .map(|path| path.cost)
        .ok_or(Error::NoPathFound)
}

/// Physical length in meters of a caller-held node path.
///
/// # Errors
///
/// [`Error::Precondition`] when a consecutive pair of nodes is not
/// connected by an edge (malformed path).
pub fn path_length(graph: &WeightedGraph, nodes: &[NodeIndex]) -> Result<f64, Error> {
    sum_over_edges(graph, nodes, |graph, e| graph.road().graph[e].length_m)
}

/// Total `itime` in seconds of a caller-held node path.
///
/// # Errors
///
/// As [`path_length`].
pub fn path_travel_time(graph: &WeightedGraph, nodes: &[NodeIndex]) -> Result<f64, Error> {
    sum_over_edges(graph, nodes, |graph, e| graph.itime(e))
}

fn sum_over_edges<F>(graph: &WeightedGraph, nodes: &[NodeIndex], edge_value: F) -> Result<f64, Error>
where
    F: Fn(&WeightedGraph, EdgeIndex) -> f64,
{
    let mut total = 0.0;
    for (&from, &to) in nodes.iter().tuple_windows() {
        let edge = graph.road().graph.find_edge(from, to).ok_or_else(|| {
            Error::Precondition(format!(
                "nodes {} and {} are consecutive in the path but not connected by an edge",
                from.index(),
                to.index()
            ))
        })?;
        total += edge_value(graph, edge);
    }
    Ok(total)
}
