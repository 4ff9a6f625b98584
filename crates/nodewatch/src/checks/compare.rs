//! Snapshot comparison against a second node.
//!
//! This is a heuristic: both heights are read once, back to back, so a node
//! that stalled a moment ago still looks healthy and a slow RPC round trip
//! can look like lag.

use tracing::debug;

use super::distance::check_distance;
use crate::error::RpcError;
use crate::rpc::{BlockKind, NodeRpc};
use crate::status::{CheckStatus, Severity};
use crate::thresholds::Thresholds;

/// Metric label for the distance between the two nodes' `kind` heads
pub fn compare_label(kind: BlockKind) -> String {
    format!("{kind}_compare_distance")
}

/// Compare best and finalized heights of `local` against `reference`
pub async fn check_compare_to_node(
    status: &mut CheckStatus,
    local: &dyn NodeRpc,
    reference: &dyn NodeRpc,
    thresholds: Thresholds,
) -> Result<Severity, RpcError> {
    let mut worst = Severity::Ok;

    for kind in BlockKind::ALL {
        let theirs = reference.block_number(kind).await?;
        let ours = local.block_number(kind).await?;
        debug!(%kind, %theirs, %ours, "compared heights");

        let what = format!("{kind} compare-node/local");
        let severity = check_distance(status, &compare_label(kind), &what, theirs, ours, thresholds);
        worst = worst.max(severity);
    }

    Ok(worst)
}
