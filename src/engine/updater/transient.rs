//! Update Transient
//!
//! The host's cached "theme updates" record: which themes were checked at
//! which installed version, and which have a newer release on offer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::metadata::RemoteMetadata;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTransient {
    /// Theme slug -> installed version
    #[serde(default)]
    pub checked: BTreeMap<String, String>,
    /// Theme slug -> available update
    #[serde(default)]
    pub response: BTreeMap<String, ThemeUpdate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeUpdate {
    pub theme: String,
    pub new_version: String,
    pub url: String,
    pub package: String,
}

impl ThemeUpdate {
    pub fn from_metadata(theme_slug: &str, remote: RemoteMetadata) -> Self {
        Self {
            theme: theme_slug.to_string(),
            new_version: remote.version,
            url: remote.details_url,
            package: remote.download_url,
        }
    }
}

impl UpdateTransient {
    /// Transient as the host builds it before an update pass
    pub fn with_installed(theme_slug: &str, version: &str) -> Self {
        let mut transient = Self::default();
        transient
            .checked
            .insert(theme_slug.to_string(), version.to_string());
        transient
    }
}
