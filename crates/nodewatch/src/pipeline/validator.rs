use std::time::Duration;

use tracing::info;

use crate::backoff::DecorrelatedJitter;
use crate::checks::{
    TimeoutReport, check_best_finalized_distance, check_compare_to_node, check_peers, check_syncing,
    wait_for_increase,
};
use crate::config::Config;
use crate::error::{CheckError, ConfigError};
use crate::rpc::{BlockKind, NodeRpc};
use crate::status::CheckStatus;
use crate::thresholds::Thresholds;

/// Is the validator synced, connected and producing blocks?
#[derive(Debug, Clone)]
pub struct ValidatorCheck {
    warn_is_syncing: bool,
    min_peers: u64,
    distance: Thresholds,
    best_timeout: Duration,
    finalized_timeout: Duration,
    timeout_report: TimeoutReport,
    backoff: DecorrelatedJitter,
}

impl ValidatorCheck {
    pub const SUCCESS_MESSAGE: &'static str = "validator is synced, connected and producing blocks";

    /// Validate thresholds, timeouts and backoff bounds
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.node.validate()?;
        let validator = &config.validator;

        let distance =
            Thresholds::new("max-distance", validator.max_distance_warn, validator.max_distance_crit)?;
        if validator.best_timeout_secs == 0 {
            return Err(ConfigError::Zero("best-timeout"));
        }
        if validator.finalized_timeout_secs == 0 {
            return Err(ConfigError::Zero("finalized-timeout"));
        }

        Ok(Self {
            warn_is_syncing: validator.warn_is_syncing,
            min_peers: validator.min_peers,
            distance,
            best_timeout: Duration::from_secs(validator.best_timeout_secs),
            finalized_timeout: Duration::from_secs(validator.finalized_timeout_secs),
            timeout_report: TimeoutReport::from_fake_increasing(validator.fake_increasing_perfdata),
            backoff: config.backoff.jitter()?,
        })
    }

    /// Replace the poll backoff
    pub fn with_backoff(mut self, backoff: DecorrelatedJitter) -> Self {
        self.backoff = backoff;
        self
    }

    fn timeout(&self, kind: BlockKind) -> Duration {
        match kind {
            BlockKind::Best => self.best_timeout,
            BlockKind::Finalized => self.finalized_timeout,
        }
    }

    /// Run every check in order.
    ///
    /// With a `compare` node the heights are compared against it once;
    /// otherwise best and then finalized heights are polled for an increase.
    pub async fn run(
        &self,
        status: &mut CheckStatus,
        node: &dyn NodeRpc,
        compare: Option<&dyn NodeRpc>,
    ) -> Result<String, CheckError> {
        let health = node.health().await?;
        check_syncing(status, &health, self.warn_is_syncing);
        check_peers(status, &health, self.min_peers);

        check_best_finalized_distance(status, node, self.distance).await?;

        match compare {
            Some(reference) => {
                info!("comparing heights against second node");
                check_compare_to_node(status, node, reference, self.distance).await?;
            }
            None => {
                let mut backoff = self.backoff.clone();
                for kind in BlockKind::ALL {
                    wait_for_increase(status, node, kind, self.timeout(kind), &mut backoff, self.timeout_report)
                        .await?;
                }
            }
        }

        Ok(Self::SUCCESS_MESSAGE.to_string())
    }
}
