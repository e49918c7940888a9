use std::sync::Arc;

use log::info;
use petgraph::graph::EdgeIndex;
use rayon::prelude::*;

use crate::Error;
use crate::algo::{edge_travel_time, spread_congestion};
use crate::model::{CongestionObservation, RoadGraph, RoadSegment, WeightedGraph};

/// Build one weighted-graph snapshot from the base graph and the current
/// feed contents.
///
/// Runs the congestion spreader, then computes the `itime` weight of every
/// edge. Atomic from the caller's point of view: an error yields no
/// snapshot, and a returned snapshot is complete - there is no state in
/// which some edges are weighted and others are not.
///
/// # Errors
///
/// [`Error::Precondition`] when the segment and observation lists differ
/// in length (they are paired by position), [`Error::NoNodeFound`] when
/// segments were supplied against an empty graph.
pub fn build_weighted_graph(
    road: &Arc<RoadGraph>,
    segments: &[RoadSegment],
    observations: &[CongestionObservation],
) -> Result<WeightedGraph, Error> {
    if segments.len() != observations.len() {
        return Err(Error::Precondition(format!(
            "{} segments paired with {} observations",
            segments.len(),
            observations.len()
        )));
    }

    let report = spread_congestion(road, segments, observations)?;

    let itime_s: Vec<f64> = (0..road.edge_count())
        .into_par_iter()
        .map(|i| edge_travel_time(&road.graph[EdgeIndex::new(i)], report.levels[i]))
        .collect();

    let with_data = report.levels.iter().filter(|l| l.is_some()).count();
    info!(
        "Built weighted graph: {} edges ({} with congestion data)",
        road.edge_count(),
        with_data
    );

    Ok(WeightedGraph::from_parts(
        Arc::clone(road),
        report.levels,
        itime_s,
    ))
}
