//! Spreading coarse per-segment congestion readings onto graph edges.

use log::{debug, info};
use petgraph::visit::EdgeRef;

use crate::Error;
use crate::model::{CongestionLevel, CongestionObservation, RoadGraph, RoadSegment};
use crate::routing::dijkstra::shortest_path;

/// What happened to one segment during a spread run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadOutcome {
    /// The segment's level was written to this many edges (0 when both
    /// endpoints snapped to the same node).
    Applied { edges: usize },
    /// The snapped endpoints lie in different components; the reading was
    /// dropped.
    Disconnected,
}

/// Per-edge congestion produced by one spread run.
#[derive(Debug)]
pub struct SpreadReport {
    /// Level per edge, indexed by edge index; `None` where no segment
    /// covered the edge.
    pub levels: Vec<Option<CongestionLevel>>,
    /// One outcome per input segment, in input order.
    pub outcomes: Vec<SpreadOutcome>,
}

/// Map each segment's current congestion level onto the graph edges that
/// physically realize the segment.
///
/// Segments and observations are paired by position; the caller validates
/// that the lists have equal length. For every pair, the polyline's first
/// and last coordinates are snapped to their nearest nodes and connected
/// by a physical shortest path (edge length as cost, deliberately ignoring
/// congestion); every edge on that path receives the observed level.
/// Segments are processed in input order, so later segments overwrite
/// earlier ones on shared edges. A segment whose endpoints are
/// disconnected is recorded and skipped - one unreachable segment must not
/// abort a rebuild.
///
/// # Errors
///
/// [`Error::NoNodeFound`] when the graph has no nodes to snap to.
pub fn spread_congestion(
    road: &RoadGraph,
    segments: &[RoadSegment],
    observations: &[CongestionObservation],
) -> Result<SpreadReport, Error> {
    debug_assert_eq!(segments.len(), observations.len());

    let mut levels = vec![None; road.edge_count()];
    let mut outcomes = Vec::with_capacity(segments.len());

    for (segment, observation) in segments.iter().zip(observations) {
        let (first, last) = segment.endpoints();
        let origin = road.nearest_node(first)?;
        let destination = road.nearest_node(last)?;

        match shortest_path(&road.graph, origin, destination, |e| e.weight().length_m) {
            Some(path) => {
                for edge in &path.edges {
                    levels[edge.index()] = Some(observation.current);
                }
                outcomes.push(SpreadOutcome::Applied {
                    edges: path.edges.len(),
                });
            }
            None => {
                debug!(
                    "Segment {} ({}): endpoints disconnected, reading dropped",
                    segment.way_id, segment.name
                );
                outcomes.push(SpreadOutcome::Disconnected);
            }
        }
    }

    let applied = outcomes
        .iter()
        .filter(|o| matches!(o, SpreadOutcome::Applied { .. }))
        .count();
    let covered = levels.iter().filter(|l| l.is_some()).count();
    info!(
        "Spread {applied} of {} segments onto {covered} edges",
        segments.len()
    );

    Ok(SpreadReport { levels, outcomes })
}
