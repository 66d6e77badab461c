use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Bad energy type or date supplied by the caller
    #[error("{0}")]
    InvalidArgument(String),

    /// Upstream unreachable, non-2xx after retries, or returned garbage
    #[error("Failed to fetch data from Zonneplan API: {0}")]
    Fetch(String),

    /// Missing or unusable configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No usable records to summarize
    #[error("No data found for this date")]
    EmptyDataset,

    #[error("Cache file {} is corrupt: {source}", path.display())]
    CacheCorruption {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("File I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}
