use blockfetch_types::{
    constants::{RPC_CODE_LIMIT_EXCEEDED, RPC_CODE_RATE_LIMITED},
    BlockId,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Serialize)]
pub(crate) struct JsonRpcRequest {
    jsonrpc: String,
    pub(crate) method: String,
    pub(crate) params: Vec<Value>,
    id: u64,
}

/// Response envelope. A `null` or absent result is `None`.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct JsonRpcResponse<T> {
    #[serde(default)]
    pub(crate) result: Option<T>,
    #[serde(default)]
    pub(crate) error: Option<JsonRpcError>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub(crate) struct JsonRpcError {
    pub(crate) code: i64,
    pub(crate) message: String,
}

impl JsonRpcError {
    pub(crate) fn is_rate_limit(&self) -> bool {
        self.code == RPC_CODE_RATE_LIMITED || self.code == RPC_CODE_LIMIT_EXCEEDED
    }

    /// Providers reject bad keys with a message rather than a dedicated code.
    pub(crate) fn is_auth_failure(&self) -> bool {
        let message = self.message.to_ascii_lowercase();
        message.contains("must be authenticated")
            || message.contains("unauthorized")
            || message.contains("invalid api key")
    }
}

/// Generates a JSON-RPC request for eth_getBlockByNumber for
/// the specified block (e.g., "0xabc", "latest", "finalized").
///
/// When `full_transactions` is false the block lists transaction hashes only.
pub(crate) fn get_block_by_number(block: &BlockId, full_transactions: bool) -> JsonRpcRequest {
    JsonRpcRequest {
        jsonrpc: "2.0".to_owned(),
        method: "eth_getBlockByNumber".to_owned(),
        params: vec![json!(block), Value::Bool(full_transactions)],
        id: 1,
    }
}

/// Generates a JSON-RPC request for eth_blockNumber.
pub(crate) fn block_number() -> JsonRpcRequest {
    JsonRpcRequest {
        jsonrpc: "2.0".to_owned(),
        method: "eth_blockNumber".to_owned(),
        params: vec![],
        id: 1,
    }
}

#[cfg(test)]
mod tests {
    use blockfetch_types::BlockTag;

    use super::*;

    #[test]
    fn test_get_block_request_shape() {
        let request = get_block_by_number(&BlockId::Number(8778768), false);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "jsonrpc": "2.0",
                "method": "eth_getBlockByNumber",
                "params": ["0x85f410", false],
                "id": 1
            })
        );
        let request = get_block_by_number(&BlockId::Tag(BlockTag::Finalized), true);
        assert_eq!(request.params, vec![json!("finalized"), json!(true)]);
    }

    #[test]
    fn test_null_result_is_none() {
        let response: JsonRpcResponse<Value> =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":null}"#).unwrap();
        assert!(response.result.is_none());
        assert!(response.error.is_none());
    }

    #[test]
    fn test_error_classification() {
        let response: JsonRpcResponse<Value> = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32600,"message":"Must be authenticated!"}}"#,
        )
        .unwrap();
        let error = response.error.unwrap();
        assert!(error.is_auth_failure());
        assert!(!error.is_rate_limit());

        let throttled = JsonRpcError {
            code: 429,
            message: "Your app has exceeded its compute units per second capacity".to_string(),
        };
        assert!(throttled.is_rate_limit());
        assert!(!throttled.is_auth_failure());
    }
}
