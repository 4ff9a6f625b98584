use chrono::Utc;
use tracing::debug;

use crate::config::Config;
use crate::error::{CheckError, ConfigError};
use crate::release::{ReleaseSource, compare_release};
use crate::rpc::NodeRpc;
use crate::status::CheckStatus;
use crate::thresholds::Thresholds;

/// Is the node running the latest published release?
#[derive(Debug, Clone)]
pub struct ReleaseCheck {
    thresholds: Thresholds,
}

impl ReleaseCheck {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Validate the since-release thresholds and request timeout
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.node.validate()?;
        let thresholds =
            Thresholds::new("since-release", config.release.warn_secs, config.release.crit_secs)?;
        Ok(Self::new(thresholds))
    }

    /// Fetch the latest release, then the running version, and compare them
    pub async fn run(
        &self,
        status: &mut CheckStatus,
        node: &dyn NodeRpc,
        releases: &dyn ReleaseSource,
    ) -> Result<String, CheckError> {
        let release = releases.latest_release().await?;
        debug!(tag = %release.tag_name, published_at = %release.published_at, "latest release");

        let running = node.version().await?;
        debug!(%running, "running version");

        compare_release(status, &release, &running, self.thresholds, Utc::now());

        Ok(format!("running latest release {}", release.tag_name))
    }
}
