//! Sync state and peer count.

use tracing::{info, warn};

use crate::perfdata::PerfData;
use crate::rpc::NodeHealth;
use crate::status::{CheckStatus, Severity};

pub const PEERS_LABEL: &str = "peers";

/// A syncing node is CRITICAL, or WARNING when `warn_is_syncing` is set
pub fn check_syncing(status: &mut CheckStatus, health: &NodeHealth, warn_is_syncing: bool) {
    if !health.is_syncing {
        info!("node is not syncing");
        return;
    }

    let severity = if warn_is_syncing { Severity::Warning } else { Severity::Critical };
    warn!(%severity, "node is syncing");
    status.raise("node is syncing", severity);
}

/// Fewer than `min_peers` peers is CRITICAL
pub fn check_peers(status: &mut CheckStatus, health: &NodeHealth, min_peers: u64) {
    let range = format!("{min_peers}:");
    status.record_metric(PEERS_LABEL, PerfData::new(health.peers).warn(&range).crit(&range).min(0));

    if health.peers < min_peers {
        warn!(peers = health.peers, min_peers, "not enough peers");
        status.raise(format!("only {} peers, expected at least {min_peers}", health.peers), Severity::Critical);
    } else {
        info!(peers = health.peers, "peer count ok");
    }
}
