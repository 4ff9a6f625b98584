//! Nodewatch - Nagios/Icinga health checks for blockchain validator nodes
//!
//! This library provides the decision core behind the `check_release` and
//! `check_validator_active` plugins: a severity accumulator, threshold
//! classification, the block-increase polling loop and its backoff, and the
//! JSON-RPC / release API clients they talk through.

pub mod backoff;
pub mod checks;
pub mod config;
pub mod error;
pub mod perfdata;
pub mod pipeline;
pub mod release;
pub mod rpc;
pub mod status;
pub mod thresholds;

// Re-export main types
pub use backoff::DecorrelatedJitter;
pub use config::Config;
pub use error::{CheckError, ConfigError, ReleaseError, RpcError};
pub use perfdata::PerfData;
pub use pipeline::{ReleaseCheck, Report, ValidatorCheck, finish, guard};
pub use release::{GithubReleases, Release, ReleaseSource};
pub use rpc::{BlockKind, BlockNumber, NodeHealth, NodeRpc, RpcClient};
pub use status::{CheckStatus, Severity};
pub use thresholds::Thresholds;

/// Nodewatch result type
pub type Result<T, E = CheckError> = std::result::Result<T, E>;

/// Timeout applied to every HTTP request
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// User agent sent to RPC nodes and the release API
pub const USER_AGENT: &str = concat!("nodewatch/", env!("CARGO_PKG_VERSION"));
