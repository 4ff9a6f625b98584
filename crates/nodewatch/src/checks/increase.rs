//! Block-increase liveness probe.
//!
//! Polls one chain head until its height moves past the value seen at the
//! start, sleeping a decorrelated-jitter delay between polls. Not seeing an
//! increase within the timeout is CRITICAL.

use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::{debug, info, warn};

use crate::backoff::DecorrelatedJitter;
use crate::error::RpcError;
use crate::perfdata::PerfData;
use crate::rpc::{BlockKind, BlockNumber, NodeRpc};
use crate::status::{CheckStatus, Severity};

/// What to record as the metric when no increase was seen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeoutReport {
    /// The literal `infinite`
    #[default]
    Infinite,
    /// Twice the timeout, for graphing backends that cannot plot infinity
    DoubleTimeout,
}

impl TimeoutReport {
    pub fn from_fake_increasing(fake: bool) -> Self {
        if fake { TimeoutReport::DoubleTimeout } else { TimeoutReport::Infinite }
    }
}

/// Result of one wait-for-increase run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncreaseOutcome {
    pub initial: BlockNumber,
    /// Height that ended the wait, the last one seen on timeout
    pub last: BlockNumber,
    pub elapsed: Duration,
    /// Polls after the initial read
    pub polls: u32,
    pub increased: bool,
}

struct PollState {
    initial: BlockNumber,
    start: Instant,
    elapsed: Duration,
    iteration: u32,
}

/// Metric label for a head's time-to-increase
pub fn increase_label(kind: BlockKind) -> String {
    format!("{kind}_block_increase")
}

/// Wait until `kind`'s height increases or `timeout` elapses.
///
/// The backoff is reset first. Any RPC failure is returned immediately and
/// ends the poll.
pub async fn wait_for_increase(
    status: &mut CheckStatus,
    node: &dyn NodeRpc,
    kind: BlockKind,
    timeout: Duration,
    backoff: &mut DecorrelatedJitter,
    report: TimeoutReport,
) -> Result<IncreaseOutcome, RpcError> {
    backoff.reset();

    let initial = node.block_number(kind).await?;
    let mut state = PollState { initial, start: Instant::now(), elapsed: Duration::ZERO, iteration: 0 };
    debug!(%kind, %initial, ?timeout, "waiting for block increase");

    let (last, increased) = loop {
        let delay = backoff.next_delay();
        sleep(delay).await;
        state.iteration += 1;

        let current = node.block_number(kind).await?;
        state.elapsed = state.start.elapsed();
        debug!(%kind, %current, iteration = state.iteration, ?delay, elapsed = ?state.elapsed, "polled");

        if current > state.initial {
            break (current, true);
        }
        if state.elapsed >= timeout {
            break (current, false);
        }
    };

    let label = increase_label(kind);
    let seconds = state.elapsed.as_secs_f64();

    if increased {
        info!(%kind, from = %state.initial, to = %last, seconds, "block increased");
        status.record_metric(label, PerfData::seconds(seconds).crit(timeout.as_secs()).min(0));
    } else {
        warn!(%kind, height = %last, seconds, "block did not increase");
        status.raise(format!("{kind} block did not increase within {seconds:.1}s"), Severity::Critical);

        let value = match report {
            TimeoutReport::Infinite => PerfData::infinite(),
            TimeoutReport::DoubleTimeout => PerfData::new(timeout.as_secs_f64() * 2.0).unit("s"),
        };
        status.record_metric(label, value.crit(timeout.as_secs()).min(0));
    }

    Ok(IncreaseOutcome {
        initial: state.initial,
        last,
        elapsed: state.elapsed,
        polls: state.iteration,
        increased,
    })
}
