use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Traffic feed unavailable: {0}")]
    FeedUnavailable(String),
    #[error("No node found for snapping: the road graph is empty")]
    NoNodeFound,
    #[error("No path found between origin and destination")]
    NoPathFound,
    #[error("Precondition violated: {0}")]
    Precondition(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}
