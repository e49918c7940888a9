//! Domain records delivered by the live traffic feed.

use chrono::NaiveDateTime;
use geo::{LineString, Point};

use super::congestion::CongestionLevel;
use crate::Error;

/// A named real-world road stretch reported by the traffic feed.
///
/// The polyline is much coarser than the graph: one segment typically
/// covers a whole chain of edges. Geometry is effectively static and is
/// fetched once per process; only the congestion readings cycle.
#[derive(Debug, Clone)]
pub struct RoadSegment {
    pub way_id: String,
    pub name: String,
    /// Polyline approximating the segment's path; always >= 2 points.
    pub geometry: LineString<f64>,
}

impl RoadSegment {
    /// # Errors
    ///
    /// [`Error::InvalidData`] when the polyline has fewer than two points.
    pub fn new(way_id: String, name: String, geometry: LineString<f64>) -> Result<Self, Error> {
        if geometry.0.len() < 2 {
            return Err(Error::InvalidData(format!(
                "segment {way_id}: polyline needs at least two points"
            )));
        }
        Ok(Self {
            way_id,
            name,
            geometry,
        })
    }

    /// First and last polyline coordinates, the endpoints used when
    /// spreading the segment's congestion onto graph edges.
    pub fn endpoints(&self) -> (Point<f64>, Point<f64>) {
        let coords = &self.geometry.0;
        (coords[0].into(), coords[coords.len() - 1].into())
    }
}

/// One congestion reading for one segment.
#[derive(Debug, Clone)]
pub struct CongestionObservation {
    pub way_id: String,
    /// When the reading was taken, parsed from the feed's timestamp code.
    pub observed_at: NaiveDateTime,
    /// Traffic state right now; this is what the engine weights by.
    pub current: CongestionLevel,
    /// State the feed predicts 15 minutes ahead; carried for callers.
    pub predicted: CongestionLevel,
}
