use reqwest::StatusCode;
use thiserror::Error;

/// Every terminal failure a curation run can report.
///
/// Throttling is handled inside the fetcher and never shows up here. Missing
/// audio features and null track placeholders are logged and dropped where they
/// are detected, so they have no variant either.
#[derive(Debug, Error)]
pub enum CurateError {
    /// Token acquisition or refresh failed. Raised before any catalog request.
    #[error("authorization failed: {0}")]
    Auth(String),

    /// The API answered with a non-success status other than 429.
    #[error("request to {url} failed with status {status}: {body}")]
    Upstream {
        url: String,
        status: StatusCode,
        body: String,
    },

    /// The request never produced a response.
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body did not match the expected shape.
    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A playlist append batch failed. Batches before `batch` stay committed.
    #[error("playlist write failed at batch {batch}/{batches} after {written} tracks: {source}")]
    BatchWrite {
        batch: usize,
        batches: usize,
        written: usize,
        #[source]
        source: Box<CurateError>,
    },

    /// A required setting is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl CurateError {
    /// Status code of an upstream failure, looking through batch write wrappers.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            CurateError::Upstream { status, .. } => Some(*status),
            CurateError::BatchWrite { source, .. } => source.status(),
            _ => None,
        }
    }
}
