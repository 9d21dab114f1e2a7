//! Update Checker
//!
//! One blocking GET against the metadata endpoint per check. No retries, no
//! caching; a failed check simply reports nothing.

use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::debug;

use super::metadata::{RemoteMetadata, UpdateError};
use super::transient::{ThemeUpdate, UpdateTransient};
use super::version::is_older;

pub struct UpdateChecker {
    client: Client,
    endpoint: String,
    theme_slug: String,
}

impl UpdateChecker {
    /// Create a checker for `theme_slug` against `endpoint`
    /// (scheme and host, e.g. `https://updates.example.com`)
    pub fn new(endpoint: &str, theme_slug: &str, user_agent: &str) -> Self {
        let client = Client::builder()
            .user_agent(user_agent.to_string())
            .build()
            .unwrap_or_default();
        Self::with_client(client, endpoint, theme_slug)
    }

    /// Create with a preconfigured HTTP client (for testing)
    pub fn with_client(client: Client, endpoint: &str, theme_slug: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            theme_slug: theme_slug.to_string(),
        }
    }

    pub fn theme_slug(&self) -> &str {
        &self.theme_slug
    }

    pub fn metadata_url(&self) -> String {
        format!(
            "{}/updates/?action=get_metadata&slug={}",
            self.endpoint, self.theme_slug
        )
    }

    /// Fetch the remote metadata document, keeping the failure reason
    pub fn fetch_metadata(&self) -> Result<RemoteMetadata, UpdateError> {
        let response = self.client.get(self.metadata_url()).send()?;

        if response.status() != StatusCode::OK {
            return Err(UpdateError::BadStatus(response.status().as_u16()));
        }

        let body = response.text()?;
        RemoteMetadata::from_json(&body)
    }

    /// Remote metadata if it advertises a version strictly newer than
    /// `current_version`. Every failure is reported as `None`.
    pub fn check_for_update(&self, current_version: &str) -> Option<RemoteMetadata> {
        let remote = match self.fetch_metadata() {
            Ok(remote) => remote,
            Err(e) => {
                debug!(slug = %self.theme_slug, error = %e, "update check produced nothing");
                return None;
            }
        };

        if is_older(current_version, &remote.version) {
            debug!(
                slug = %self.theme_slug,
                current = current_version,
                available = %remote.version,
                "update available"
            );
            Some(remote)
        } else {
            None
        }
    }

    /// Record an available update for this theme in the host's update
    /// transient. The installed version is read from `transient.checked`;
    /// transients that have not been populated yet pass through untouched.
    pub fn update_transient(&self, mut transient: UpdateTransient) -> UpdateTransient {
        if transient.checked.is_empty() {
            return transient;
        }

        let Some(installed) = transient.checked.get(&self.theme_slug).cloned() else {
            return transient;
        };

        if let Some(remote) = self.check_for_update(&installed) {
            transient.response.insert(
                self.theme_slug.clone(),
                ThemeUpdate::from_metadata(&self.theme_slug, remote),
            );
        }

        transient
    }
}
