//! Height distance between two chain heads.

use tracing::{info, warn};

use crate::error::RpcError;
use crate::perfdata::PerfData;
use crate::rpc::{BlockKind, BlockNumber, NodeRpc};
use crate::status::{CheckStatus, Severity};
use crate::thresholds::Thresholds;

pub const BEST_FINALIZED_DISTANCE_LABEL: &str = "best_finalized_distance";

/// Classify `|a - b|` and record it under `label`.
///
/// `what` names the comparison in the status message.
pub fn check_distance(
    status: &mut CheckStatus,
    label: &str,
    what: &str,
    a: BlockNumber,
    b: BlockNumber,
    thresholds: Thresholds,
) -> Severity {
    let distance = a.distance(b);
    let severity = thresholds.classify(distance);

    status.record_metric(
        label,
        PerfData::new(distance).warn(thresholds.warn()).crit(thresholds.crit()).min(0),
    );

    if severity > Severity::Ok {
        warn!(label, %a, %b, distance, %severity, "height distance too large");
        status.raise(format!("{what} distance is {distance} blocks ({a} vs {b})"), severity);
    } else {
        info!(label, distance, "height distance ok");
    }

    severity
}

/// Local best head against local finalized head
pub async fn check_best_finalized_distance(
    status: &mut CheckStatus,
    node: &dyn NodeRpc,
    thresholds: Thresholds,
) -> Result<Severity, RpcError> {
    let best = node.block_number(BlockKind::Best).await?;
    let finalized = node.block_number(BlockKind::Finalized).await?;

    Ok(check_distance(status, BEST_FINALIZED_DISTANCE_LABEL, "best/finalized", best, finalized, thresholds))
}
