//! Scripted node and release source shared by the pipeline tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{DateTime, Utc};
use nodewatch::{BlockKind, BlockNumber, NodeHealth, NodeRpc, Release, ReleaseError, ReleaseSource, RpcError};

/// Node whose heights follow a per-kind script; the last height repeats
pub struct MockNode {
    pub health: NodeHealth,
    pub version: String,
    heights: Mutex<HashMap<BlockKind, VecDeque<u64>>>,
    calls: AtomicU32,
    fail: bool,
}

impl MockNode {
    pub fn new() -> Self {
        Self {
            health: NodeHealth { peers: 20, is_syncing: false },
            version: "1.2.3-abcdef".to_string(),
            heights: Mutex::new(HashMap::new()),
            calls: AtomicU32::new(0),
            fail: false,
        }
    }

    /// Every call fails with HTTP 503
    pub fn failing() -> Self {
        Self { fail: true, ..Self::new() }
    }

    pub fn with_health(mut self, peers: u64, is_syncing: bool) -> Self {
        self.health = NodeHealth { peers, is_syncing };
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn with_heights(self, kind: BlockKind, heights: &[u64]) -> Self {
        self.heights.lock().unwrap().insert(kind, heights.iter().copied().collect());
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self, method: &str) -> Result<(), RpcError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(RpcError::Status { method: method.to_string(), status: 503 });
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl NodeRpc for MockNode {
    async fn health(&self) -> Result<NodeHealth, RpcError> {
        self.record_call("system_health")?;
        Ok(self.health)
    }

    async fn version(&self) -> Result<String, RpcError> {
        self.record_call("system_version")?;
        Ok(self.version.clone())
    }

    async fn block_number(&self, kind: BlockKind) -> Result<BlockNumber, RpcError> {
        self.record_call("chain_getHeader")?;

        let mut heights = self.heights.lock().unwrap();
        let script = heights.entry(kind).or_default();
        let height = if script.len() > 1 { script.pop_front() } else { script.front().copied() };
        Ok(BlockNumber(height.unwrap_or(0)))
    }
}

/// Release source returning a fixed release, or failing
pub struct MockReleases {
    release: Option<Release>,
    calls: AtomicU32,
}

impl MockReleases {
    pub fn new(tag: &str, published_at: DateTime<Utc>) -> Self {
        Self {
            release: Some(Release { tag_name: tag.to_string(), published_at }),
            calls: AtomicU32::new(0),
        }
    }

    pub fn failing() -> Self {
        Self { release: None, calls: AtomicU32::new(0) }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ReleaseSource for MockReleases {
    async fn latest_release(&self) -> Result<Release, ReleaseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.release.clone().ok_or(ReleaseError::Status(403))
    }
}
