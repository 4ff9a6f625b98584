//! JSON-RPC wire types and the values the checks work with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RpcError;

/// A JSON-RPC 2.0 request envelope
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest<'a> {
    pub id: u64,
    pub jsonrpc: &'static str,
    pub method: &'a str,
    pub params: Value,
}

impl<'a> RpcRequest<'a> {
    pub fn new(method: &'a str, params: Value) -> Self {
        Self { id: 1, jsonrpc: "2.0", method, params }
    }
}

/// A JSON-RPC 2.0 response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,

    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

/// Error member of a failed JSON-RPC response
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// Result of `system_health`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeHealth {
    pub peers: u64,
    pub is_syncing: bool,
}

/// Result of `chain_getHeader`, only the field the checks need
#[derive(Debug, Clone, Deserialize)]
pub struct Header {
    pub number: String,
}

/// Which chain head a check looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Current head, possibly unfinalized
    Best,
    /// Most recent block with finality
    Finalized,
}

impl BlockKind {
    pub const ALL: [BlockKind; 2] = [BlockKind::Best, BlockKind::Finalized];

    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Best => "best",
            BlockKind::Finalized => "finalized",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A block height, transported as a `0x`-prefixed hex string
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockNumber(pub u64);

impl BlockNumber {
    /// Absolute difference between two heights
    pub fn distance(self, other: BlockNumber) -> u64 {
        self.0.abs_diff(other.0)
    }
}

impl FromStr for BlockNumber {
    type Err = RpcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
        u64::from_str_radix(digits, 16)
            .map(BlockNumber)
            .map_err(|_| RpcError::InvalidBlockNumber(s.to_string()))
    }
}

impl fmt::Display for BlockNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
