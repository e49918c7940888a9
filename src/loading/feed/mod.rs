//! Live traffic feed: wire-format parsing and the provider seam.

mod de;
mod parser;

pub use parser::{read_observations, read_segments};

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::Error;
use crate::model::{CongestionObservation, RoadSegment};

/// Source of live traffic data.
///
/// The engine never performs network I/O itself; callers implement this
/// trait over whatever transport they have (HTTP download, message queue,
/// fixture files) and hand it to [`LiveGraph`](crate::live::LiveGraph).
/// Implementations map transport failures to [`Error::FeedUnavailable`].
pub trait TrafficFeed {
    /// Segment geometry; effectively static, fetched once per process.
    fn fetch_segments(&self) -> Result<Vec<RoadSegment>, Error>;

    /// Live congestion readings, refreshed every feed cycle.
    fn fetch_observations(&self) -> Result<Vec<CongestionObservation>, Error>;
}

/// [`TrafficFeed`] over two files on disk, in the upstream wire formats.
pub struct CsvDirFeed {
    segments_path: PathBuf,
    observations_path: PathBuf,
}

impl CsvDirFeed {
    pub fn new(segments_path: impl Into<PathBuf>, observations_path: impl Into<PathBuf>) -> Self {
        Self {
            segments_path: segments_path.into(),
            observations_path: observations_path.into(),
        }
    }
}

impl TrafficFeed for CsvDirFeed {
    fn fetch_segments(&self) -> Result<Vec<RoadSegment>, Error> {
        read_segments(open(&self.segments_path)?)
    }

    fn fetch_observations(&self) -> Result<Vec<CongestionObservation>, Error> {
        read_observations(open(&self.observations_path)?)
    }
}

fn open(path: &Path) -> Result<File, Error> {
    File::open(path).map_err(|e| Error::FeedUnavailable(format!("{}: {e}", path.display())))
}
