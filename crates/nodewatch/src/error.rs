//! Error types for nodewatch.

use thiserror::Error;

/// Failure talking to a node over JSON-RPC.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{method} returned HTTP status {status}")]
    Status { method: String, status: u16 },
    #[error("{method} returned error {code}: {message}")]
    Rpc { method: String, code: i64, message: String },
    #[error("{method} returned no result")]
    MissingResult { method: String },
    #[error("{method} returned an unexpected result: {cause}")]
    Malformed { method: String, cause: String },
    #[error("invalid block number {0:?}")]
    InvalidBlockNumber(String),
    #[error("invalid node uri {uri:?}: {cause}")]
    InvalidUri { uri: String, cause: String },
}

/// Failure fetching the latest published release.
#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("release request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("release API returned HTTP status {0}")]
    Status(u16),
    #[error("release API returned an unexpected body: {0}")]
    Malformed(#[source] reqwest::Error),
}

/// Invalid plugin configuration, detected before any network call.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name}: warning threshold {warn} is greater than critical threshold {crit}")]
    Thresholds { name: &'static str, warn: u64, crit: u64 },
    #[error("backoff base {base_ms}ms is greater than cap {cap_ms}ms")]
    Backoff { base_ms: u64, cap_ms: u64 },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Anything that aborts a check pipeline.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Rpc(#[from] RpcError),
    #[error(transparent)]
    Release(#[from] ReleaseError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CheckError {
    /// Misconfiguration is CRITICAL, everything else leaves the node state unknown.
    pub fn severity(&self) -> crate::Severity {
        match self {
            CheckError::Config(_) => crate::Severity::Critical,
            CheckError::Rpc(_) | CheckError::Release(_) => crate::Severity::Unknown,
        }
    }
}
