//! Remote Metadata

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Release metadata served by the update endpoint. Fetched per check, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteMetadata {
    pub version: String,
    pub details_url: String,
    pub download_url: String,
}

/// Why a metadata fetch produced nothing. The checker collapses all of these
/// into "no update".
#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Unexpected HTTP status: {0}")]
    BadStatus(u16),
    #[error("Invalid metadata document: {0}")]
    Parse(#[from] serde_json::Error),
}

impl RemoteMetadata {
    pub fn from_json(body: &str) -> Result<Self, UpdateError> {
        Ok(serde_json::from_str(body)?)
    }
}
