//! JSON-RPC access to a validator node.
//!
//! Checks only see the [`NodeRpc`] trait; [`RpcClient`] is the HTTP
//! implementation used by the plugins.

mod client;
mod types;

pub use client::RpcClient;
pub use types::{BlockKind, BlockNumber, Header, NodeHealth, RpcErrorObject, RpcRequest, RpcResponse};

use crate::error::RpcError;

/// Node queries the checks depend on
#[async_trait::async_trait]
pub trait NodeRpc: Send + Sync {
    /// Peer count and sync state (`system_health`)
    async fn health(&self) -> Result<NodeHealth, RpcError>;

    /// Running node version, `<version>-<build-hash>` (`system_version`)
    async fn version(&self) -> Result<String, RpcError>;

    /// Current height of the given chain head
    async fn block_number(&self, kind: BlockKind) -> Result<BlockNumber, RpcError>;
}
