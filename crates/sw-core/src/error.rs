use thiserror::Error;

/// Errors that can occur while building a carousel
///
/// Navigation and input never fail: anomalies there are absorbed as no-ops.
#[derive(Error, Debug)]
pub enum CarouselError {
    #[error("carousel surface contains no slides")]
    EmptyCollection,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CarouselError>;
