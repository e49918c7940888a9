//! Snapshot lifecycle: freshness policy and the shared live handle.
//!
//! The upstream congestion feed publishes on a five-minute cadence, so a
//! weighted graph older than that is stale. [`LiveGraph`] owns the current
//! snapshot: readers grab an `Arc` to an immutable [`WeightedGraph`] and
//! query it; a refresh builds a complete replacement off to the side and
//! publishes it with a single swap.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::{Duration, Instant};

use log::info;

use crate::Error;
use crate::loading::build_weighted_graph;
use crate::loading::feed::TrafficFeed;
use crate::model::{CongestionObservation, RoadGraph, RoadSegment, WeightedGraph};

/// Publication cadence of the upstream congestion feed.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(300);

/// Whether a snapshot built at `last_update` must be rebuilt at `now`.
///
/// Stale at exactly [`REFRESH_INTERVAL`], not before.
pub fn is_stale(last_update: Instant, now: Instant) -> bool {
    now.duration_since(last_update) >= REFRESH_INTERVAL
}

struct Snapshot {
    graph: Arc<WeightedGraph>,
    refreshed_at: Instant,
}

/// Shared handle to the current weighted-graph snapshot.
///
/// Single-writer / multi-reader: reads clone the current `Arc` and never
/// block each other; a rebuild assembles the next snapshot without touching
/// the published one and swaps it in together with its timestamp, so no
/// reader ever observes a half-rebuilt graph or a graph paired with the
/// wrong refresh time. Rebuilds are serialized by a dedicated mutex; a
/// refresh arriving while another is in flight waits for it and coalesces.
pub struct LiveGraph {
    road: Arc<RoadGraph>,
    segments: Vec<RoadSegment>,
    current: RwLock<Snapshot>,
    rebuild: Mutex<()>,
}

impl LiveGraph {
    /// Fetch segments and observations from `feed` and build the initial
    /// snapshot. Segment geometry is static, so it is fetched only here;
    /// refreshes re-fetch observations alone.
    ///
    /// # Errors
    ///
    /// Whatever the feed or the build surfaces; nothing is retried here.
    pub fn new(road: Arc<RoadGraph>, feed: &dyn TrafficFeed) -> Result<Self, Error> {
        let segments = feed.fetch_segments()?;
        let observations = feed.fetch_observations()?;
        Self::from_parts(road, segments, &observations)
    }

    /// Build the initial snapshot from already-fetched feed data.
    ///
    /// # Errors
    ///
    /// As [`build_weighted_graph`](crate::loading::build_weighted_graph).
    pub fn from_parts(
        road: Arc<RoadGraph>,
        segments: Vec<RoadSegment>,
        observations: &[CongestionObservation],
    ) -> Result<Self, Error> {
        let graph = build_weighted_graph(&road, &segments, observations)?;
        Ok(Self {
            road,
            segments,
            current: RwLock::new(Snapshot {
                graph: Arc::new(graph),
                refreshed_at: Instant::now(),
            }),
            rebuild: Mutex::new(()),
        })
    }

    /// The current snapshot. Cheap; callers keep the returned `Arc` for a
    /// whole query so a concurrent refresh cannot swap the graph out from
    /// under them mid-search.
    pub fn current(&self) -> Arc<WeightedGraph> {
        let snapshot = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&snapshot.graph)
    }

    /// Completion time of the last successful rebuild.
    pub fn refreshed_at(&self) -> Instant {
        let snapshot = self.current.read().unwrap_or_else(PoisonError::into_inner);
        snapshot.refreshed_at
    }

    /// Whether the current snapshot has outlived [`REFRESH_INTERVAL`].
    pub fn is_stale(&self) -> bool {
        is_stale(self.refreshed_at(), Instant::now())
    }

    /// Re-fetch observations and publish a new snapshot when the current
    /// one is stale.
    ///
    /// Returns `Ok(true)` when this call published a rebuild and
    /// `Ok(false)` when the snapshot was still fresh - including the case
    /// where a concurrent refresh finished first while this one waited.
    ///
    /// # Errors
    ///
    /// [`Error::FeedUnavailable`] or a parse error from the feed, build
    /// errors from the rebuild. On error the previous snapshot and its
    /// timestamp stay published.
    pub fn refresh_if_stale(&self, feed: &dyn TrafficFeed) -> Result<bool, Error> {
        if !self.is_stale() {
            return Ok(false);
        }

        let guard = self.rebuild.lock().unwrap_or_else(PoisonError::into_inner);

        // A rebuild that was in flight while we waited may have already
        // published; check again under the lock.
        if !self.is_stale() {
            return Ok(false);
        }

        self.rebuild_locked(feed, &guard)?;
        Ok(true)
    }

    /// Re-fetch observations and publish a new snapshot regardless of
    /// staleness.
    ///
    /// # Errors
    ///
    /// As [`refresh_if_stale`](Self::refresh_if_stale).
    pub fn refresh(&self, feed: &dyn TrafficFeed) -> Result<(), Error> {
        let guard = self.rebuild.lock().unwrap_or_else(PoisonError::into_inner);
        self.rebuild_locked(feed, &guard)
    }

    fn rebuild_locked(
        &self,
        feed: &dyn TrafficFeed,
        _rebuild: &MutexGuard<'_, ()>,
    ) -> Result<(), Error> {
        let observations = feed.fetch_observations()?;
        let graph = build_weighted_graph(&self.road, &self.segments, &observations)?;

        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        // Completion time, not start time: a slow rebuild must not eat
        // into the validity window of the data it just published.
        *current = Snapshot {
            graph: Arc::new(graph),
            refreshed_at: Instant::now(),
        };
        info!("Refreshed weighted graph from live congestion data");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use chrono::NaiveDate;
    use geo::{LineString, coord};
    use petgraph::graph::EdgeIndex;

    use super::{LiveGraph, REFRESH_INTERVAL, is_stale};
    use crate::Error;
    use crate::loading::feed::TrafficFeed;
    use crate::loading::graph::{EdgeRecord, NodeRecord, road_graph_from_records};
    use crate::model::{CongestionLevel, CongestionObservation, RoadGraph, RoadSegment};

    fn road() -> Arc<RoadGraph> {
        let road = road_graph_from_records(
            vec![
                NodeRecord {
                    id: 1,
                    lon: 0.0,
                    lat: 0.0,
                },
                NodeRecord {
                    id: 2,
                    lon: 0.01,
                    lat: 0.0,
                },
            ],
            vec![EdgeRecord {
                from: 1,
                to: 2,
                length_m: 1000.0,
                maxspeed_kmh: None,
            }],
        )
        .unwrap();
        Arc::new(road)
    }

    fn segment() -> RoadSegment {
        RoadSegment::new(
            "1".to_string(),
            "Diagonal".to_string(),
            LineString::new(vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 0.01, y: 0.0 }]),
        )
        .unwrap()
    }

    fn observation(level: CongestionLevel) -> CongestionObservation {
        CongestionObservation {
            way_id: "1".to_string(),
            observed_at: NaiveDate::from_ymd_opt(2021, 5, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            current: level,
            predicted: level,
        }
    }

    /// Feed stub serving a fixed level, or failing on demand.
    struct StubFeed {
        level: CongestionLevel,
        fail: bool,
    }

    impl TrafficFeed for StubFeed {
        fn fetch_segments(&self) -> Result<Vec<RoadSegment>, Error> {
            Ok(vec![segment()])
        }

        fn fetch_observations(&self) -> Result<Vec<CongestionObservation>, Error> {
            if self.fail {
                return Err(Error::FeedUnavailable("stub outage".to_string()));
            }
            Ok(vec![observation(self.level)])
        }
    }

    #[test]
    fn stale_exactly_at_the_interval() {
        let last = Instant::now();
        assert!(!is_stale(last, last));
        assert!(!is_stale(last, last + REFRESH_INTERVAL - Duration::from_secs(1)));
        assert!(is_stale(last, last + REFRESH_INTERVAL));
        assert!(is_stale(last, last + REFRESH_INTERVAL + Duration::from_secs(1)));
    }

    #[test]
    fn fresh_snapshot_is_not_rebuilt() {
        let feed = StubFeed {
            level: CongestionLevel::Fluid,
            fail: false,
        };
        let live = LiveGraph::new(road(), &feed).unwrap();
        let before = live.current();
        assert!(!live.refresh_if_stale(&feed).unwrap());
        assert!(Arc::ptr_eq(&before, &live.current()));
    }

    #[test]
    fn forced_refresh_publishes_new_data() {
        let live = LiveGraph::new(
            road(),
            &StubFeed {
                level: CongestionLevel::Fluid,
                fail: false,
            },
        )
        .unwrap();
        assert_eq!(
            live.current().congestion(EdgeIndex::new(0)),
            Some(CongestionLevel::Fluid)
        );

        live.refresh(&StubFeed {
            level: CongestionLevel::Congested,
            fail: false,
        })
        .unwrap();
        assert_eq!(
            live.current().congestion(EdgeIndex::new(0)),
            Some(CongestionLevel::Congested)
        );
    }

    #[test]
    fn failed_refresh_keeps_previous_snapshot() {
        let live = LiveGraph::new(
            road(),
            &StubFeed {
                level: CongestionLevel::Dense,
                fail: false,
            },
        )
        .unwrap();
        let before = live.current();
        let refreshed_at = live.refreshed_at();

        let err = live
            .refresh(&StubFeed {
                level: CongestionLevel::Dense,
                fail: true,
            })
            .unwrap_err();
        assert!(matches!(err, Error::FeedUnavailable(_)));
        assert!(Arc::ptr_eq(&before, &live.current()));
        assert_eq!(refreshed_at, live.refreshed_at());
    }
}
