//! error.rs - Error types for fetching and cycles

use thiserror::Error;

/// Failure to obtain a fare snapshot
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("fare source returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("unexpected fare payload: {0}")]
    Payload(String),

    #[error("fare source unavailable: {0}")]
    Unavailable(String),
}

/// Why a monitoring cycle produced no data
#[derive(Error, Debug)]
pub enum CycleError {
    #[error("search failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("fares are invalid (outbound {outbound:?}, return {inbound:?})")]
    Parse { outbound: String, inbound: String },
}
