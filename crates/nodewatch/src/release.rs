//! Latest-release lookup and the running-version comparison.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::ReleaseError;
use crate::perfdata::PerfData;
use crate::status::{CheckStatus, Severity};
use crate::thresholds::Thresholds;

/// Default latest-release endpoint
pub const DEFAULT_RELEASE_URL: &str = "https://api.github.com/repos/paritytech/polkadot/releases/latest";

/// Metric label for the time since the latest release was published
pub const SINCE_RELEASE_LABEL: &str = "since_release";

/// A published release, as returned by the GitHub releases API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    pub tag_name: String,
    pub published_at: DateTime<Utc>,
}

impl Release {
    /// Tag without its leading version prefix (`v1.2.3` -> `1.2.3`)
    pub fn version(&self) -> &str {
        let mut chars = self.tag_name.chars();
        chars.next();
        chars.as_str()
    }
}

/// Source of the latest published release
#[async_trait::async_trait]
pub trait ReleaseSource: Send + Sync {
    async fn latest_release(&self) -> Result<Release, ReleaseError>;
}

/// Release lookup over the GitHub REST API
#[derive(Debug, Clone)]
pub struct GithubReleases {
    client: reqwest::Client,
    url: String,
}

impl GithubReleases {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ReleaseError> {
        let url = url.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(crate::USER_AGENT)
            .build()
            .map_err(|source| ReleaseError::Transport { url: url.clone(), source })?;

        Ok(Self { client, url })
    }
}

#[async_trait::async_trait]
impl ReleaseSource for GithubReleases {
    async fn latest_release(&self) -> Result<Release, ReleaseError> {
        debug!(url = %self.url, "fetching latest release");

        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|source| ReleaseError::Transport { url: self.url.clone(), source })?;

        if !response.status().is_success() {
            return Err(ReleaseError::Status(response.status().as_u16()));
        }

        response.json().await.map_err(ReleaseError::Malformed)
    }
}

/// Running version without its build hash (`1.2.3-abcdef` -> `1.2.3`)
pub fn running_version(version: &str) -> &str {
    version.split_once('-').map_or(version, |(version, _)| version)
}

/// Compare the running version against `release` and record the outcome.
///
/// Returns the elapsed seconds since the release was published, or zero when
/// the node already runs it.
pub fn compare_release(
    status: &mut CheckStatus,
    release: &Release,
    running: &str,
    thresholds: Thresholds,
    now: DateTime<Utc>,
) -> u64 {
    let latest = release.version();
    let current = running_version(running);

    let elapsed = if latest == current {
        info!(version = current, "running latest release");
        0
    } else {
        let elapsed = (now - release.published_at).num_seconds().max(0) as u64;
        let severity = thresholds.classify(elapsed);
        let message = format!(
            "running {current} but {} was released {} ago",
            release.tag_name,
            format_elapsed(elapsed)
        );
        if severity > Severity::Ok {
            warn!(latest, current, elapsed, %severity, "outdated release");
            status.raise(message, severity);
        } else {
            info!(latest, current, elapsed, "{message}");
        }
        elapsed
    };

    status.record_metric(
        SINCE_RELEASE_LABEL,
        PerfData::new(elapsed).unit("s").warn(thresholds.warn()).crit(thresholds.crit()).min(0),
    );

    elapsed
}

/// Human-readable duration, e.g. `2h 5m`
fn format_elapsed(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = seconds % 86_400 / 3_600;
    let minutes = seconds % 3_600 / 60;

    match (days, hours, minutes) {
        (0, 0, 0) => format!("{seconds}s"),
        (0, 0, m) => format!("{m}m"),
        (0, h, m) => format!("{h}h {m}m"),
        (d, h, _) => format!("{d}d {h}h"),
    }
}
