//! HTTP JSON-RPC client.

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;
use url::Url;

use super::NodeRpc;
use super::types::{BlockKind, BlockNumber, Header, NodeHealth, RpcRequest, RpcResponse};
use crate::error::RpcError;

/// JSON-RPC client for one node
#[derive(Debug, Clone)]
pub struct RpcClient {
    client: reqwest::Client,
    url: Url,
}

impl RpcClient {
    /// Build a client for `http(s)://server:port`
    pub fn new(server: &str, port: u16, use_tls: bool, timeout: Duration) -> Result<Self, RpcError> {
        let scheme = if use_tls { "https" } else { "http" };
        Self::from_uri(&format!("{scheme}://{server}:{port}"), timeout)
    }

    /// Build a client for a full node URI such as `https://rpc.example.com:443`
    pub fn from_uri(uri: &str, timeout: Duration) -> Result<Self, RpcError> {
        let invalid = |cause: String| RpcError::InvalidUri { uri: uri.to_string(), cause };

        let url = Url::parse(uri).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(invalid(format!("unsupported scheme {other}"))),
        }
        if url.host_str().is_none() {
            return Err(invalid("missing host".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(crate::USER_AGENT)
            .build()
            .map_err(|source| RpcError::Transport { url: url.to_string(), source })?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Perform one JSON-RPC call and decode its `result`
    pub async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, RpcError> {
        debug!(url = %self.url, method, %params, "rpc call");

        let response = self
            .client
            .post(self.url.clone())
            .json(&RpcRequest::new(method, params))
            .send()
            .await
            .map_err(|source| RpcError::Transport { url: self.url.to_string(), source })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(RpcError::Status { method: method.to_string(), status: status.as_u16() });
        }

        let body: RpcResponse = response.json().await.map_err(|e| RpcError::Malformed {
            method: method.to_string(),
            cause: e.to_string(),
        })?;

        decode_result(method, body)
    }

    async fn best_block(&self) -> Result<BlockNumber, RpcError> {
        let header: Header = self.call("chain_getHeader", json!([])).await?;
        header.number.parse()
    }

    async fn finalized_block(&self) -> Result<BlockNumber, RpcError> {
        let hash: String = self.call("chain_getFinalizedHead", json!([])).await?;
        let header: Header = self.call("chain_getHeader", json!([hash])).await?;
        header.number.parse()
    }
}

/// Turn a response envelope into the typed result
fn decode_result<T: DeserializeOwned>(method: &str, body: RpcResponse) -> Result<T, RpcError> {
    if let Some(error) = body.error {
        return Err(RpcError::Rpc { method: method.to_string(), code: error.code, message: error.message });
    }

    let result = match body.result {
        Some(Value::Null) | None => return Err(RpcError::MissingResult { method: method.to_string() }),
        Some(result) => result,
    };

    serde_json::from_value(result)
        .map_err(|e| RpcError::Malformed { method: method.to_string(), cause: e.to_string() })
}

#[async_trait::async_trait]
impl NodeRpc for RpcClient {
    async fn health(&self) -> Result<NodeHealth, RpcError> {
        self.call("system_health", json!([])).await
    }

    async fn version(&self) -> Result<String, RpcError> {
        self.call("system_version", json!([])).await
    }

    async fn block_number(&self, kind: BlockKind) -> Result<BlockNumber, RpcError> {
        match kind {
            BlockKind::Best => self.best_block().await,
            BlockKind::Finalized => self.finalized_block().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(value: Value) -> RpcResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_new_builds_endpoint() {
        let client = RpcClient::new("localhost", 9933, false, Duration::from_secs(30)).unwrap();
        assert_eq!(client.url().as_str(), "http://localhost:9933/");

        let client = RpcClient::new("node.example.com", 443, true, Duration::from_secs(30)).unwrap();
        assert_eq!(client.url().scheme(), "https");
    }

    #[test]
    fn test_from_uri_rejects_bad_schemes() {
        assert!(RpcClient::from_uri("ws://localhost:9944", Duration::from_secs(1)).is_err());
        assert!(RpcClient::from_uri("not a uri", Duration::from_secs(1)).is_err());
        assert!(RpcClient::from_uri("https://rpc.example.com", Duration::from_secs(1)).is_ok());
    }

    #[test]
    fn test_decode_result() {
        let header: Header =
            decode_result("chain_getHeader", response(json!({"result": {"number": "0x10"}}))).unwrap();
        assert_eq!(header.number, "0x10");
    }

    #[test]
    fn test_decode_error_object() {
        let err = decode_result::<String>(
            "system_version",
            response(json!({"error": {"code": -32601, "message": "Method not found"}})),
        )
        .unwrap_err();
        assert!(matches!(err, RpcError::Rpc { code: -32601, .. }));
    }

    #[test]
    fn test_decode_missing_and_malformed_result() {
        let err = decode_result::<String>("system_version", response(json!({"result": null}))).unwrap_err();
        assert!(matches!(err, RpcError::MissingResult { .. }));

        let err = decode_result::<NodeHealth>("system_health", response(json!({"result": "nope"})))
            .unwrap_err();
        assert!(matches!(err, RpcError::Malformed { .. }));
    }
}
