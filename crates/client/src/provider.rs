//! Client for a hosted JSON-RPC provider.
//!
//! Each call is a single request/response exchange. There is no retry and no caching.
use blockfetch_types::{BlockId, ClientConfig, ConfigError};
use ethers::types::{Block, Transaction, H256, U64};
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::rpc::{block_number, get_block_by_number, JsonRpcError, JsonRpcRequest, JsonRpcResponse};

/// Longest provider message kept in an error.
const MAX_MESSAGE_LEN: usize = 256;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Configuration error {0}")]
    Config(#[from] ConfigError),
    #[error("Network error {0}")]
    Network(#[source] reqwest::Error),
    #[error("Provider rejected the credential ({status}): {message}")]
    Authentication { status: StatusCode, message: String },
    #[error("Block {0} not found")]
    NotFound(BlockId),
    #[error("Provider rate limited the request: {0}")]
    RateLimited(String),
    #[error("JSON-RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("Unexpected HTTP status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },
    #[error("Block retrieved does not yet have a number")]
    NoBlockNumber,
    #[error("Requested block {requested} but provider returned block {returned}")]
    MismatchedBlock { requested: u64, returned: u64 },
    #[error("{0} returned no result")]
    EmptyResult(&'static str),
    #[error("serde_json error {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    fn network(e: reqwest::Error) -> Self {
        // reqwest errors carry the request url, which contains the key.
        FetchError::Network(e.without_url())
    }

    fn from_rpc(error: JsonRpcError) -> Self {
        if error.is_rate_limit() {
            FetchError::RateLimited(truncate(&error.message))
        } else if error.is_auth_failure() {
            FetchError::Authentication {
                status: StatusCode::OK,
                message: truncate(&error.message),
            }
        } else {
            FetchError::Rpc {
                code: error.code,
                message: truncate(&error.message),
            }
        }
    }
}

/// Reads blocks from the provider selected by a [`ClientConfig`].
#[derive(Debug, Clone)]
pub struct Provider {
    client: Client,
    url: Url,
    config: ClientConfig,
}

impl Provider {
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        Self::with_client(config, Client::new())
    }

    /// Uses a caller-built reqwest client, e.g., one with a timeout or proxy.
    pub fn with_client(config: ClientConfig, client: Client) -> Result<Self, FetchError> {
        let url = config.rpc_url()?;
        Ok(Self {
            client,
            url,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Gets a block with transaction hashes (eth_getBlockByNumber, hydration off).
    ///
    /// For a numbered request the returned block is checked to carry that number.
    pub async fn get_block(&self, block: impl Into<BlockId>) -> Result<Block<H256>, FetchError> {
        let block = block.into();
        let result = self.request(get_block_by_number(&block, false)).await?;
        check_block(block, result)
    }

    /// Gets a block with full transaction objects (eth_getBlockByNumber, hydration on).
    pub async fn get_block_with_transactions(
        &self,
        block: impl Into<BlockId>,
    ) -> Result<Block<Transaction>, FetchError> {
        let block = block.into();
        let result = self.request(get_block_by_number(&block, true)).await?;
        check_block(block, result)
    }

    /// Number of the most recent block (eth_blockNumber).
    pub async fn block_number(&self) -> Result<u64, FetchError> {
        let result: Option<U64> = self.request(block_number()).await?;
        result
            .map(|number| number.as_u64())
            .ok_or(FetchError::EmptyResult("eth_blockNumber"))
    }

    /// Posts one request and unwraps the JSON-RPC envelope.
    ///
    /// The HTTP status is classified before the body so that a rejected
    /// credential is never reported as a missing block.
    async fn request<T: DeserializeOwned>(
        &self,
        request: JsonRpcRequest,
    ) -> Result<Option<T>, FetchError> {
        debug!(
            "{} {:?} -> {}",
            request.method,
            request.params,
            self.config.redacted_rpc_url()
        );
        let response = self
            .client
            .post(self.url.clone())
            .json(&request)
            .send()
            .await
            .map_err(FetchError::network)?;
        let status = response.status();
        let body = response.text().await.map_err(FetchError::network)?;

        if !status.is_success() {
            let error = classify_status(status, &body);
            warn!("{} failed: {}", request.method, error);
            return Err(error);
        }
        let response: JsonRpcResponse<T> = serde_json::from_str(&body)?;
        if let Some(error) = response.error {
            let error = FetchError::from_rpc(error);
            warn!("{} failed: {}", request.method, error);
            return Err(error);
        }
        Ok(response.result)
    }
}

/// Maps a non-success HTTP response to an error.
fn classify_status(status: StatusCode, body: &str) -> FetchError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FetchError::Authentication {
            status,
            message: rpc_message(body).unwrap_or_else(|| truncate(body)),
        },
        StatusCode::TOO_MANY_REQUESTS => {
            FetchError::RateLimited(rpc_message(body).unwrap_or_else(|| truncate(body)))
        }
        _ => match serde_json::from_str::<JsonRpcResponse<serde_json::Value>>(body) {
            Ok(JsonRpcResponse {
                error: Some(error), ..
            }) => FetchError::from_rpc(error),
            _ => FetchError::UnexpectedStatus {
                status,
                body: truncate(body),
            },
        },
    }
}

/// Message of a JSON-RPC error body, if the body is one.
fn rpc_message(body: &str) -> Option<String> {
    serde_json::from_str::<JsonRpcResponse<serde_json::Value>>(body)
        .ok()
        .and_then(|response| response.error)
        .map(|error| truncate(&error.message))
}

fn check_block<TX>(requested: BlockId, block: Option<Block<TX>>) -> Result<Block<TX>, FetchError> {
    let Some(block) = block else {
        return Err(FetchError::NotFound(requested));
    };
    if let Some(requested) = requested.number() {
        let Some(returned) = block.number else {
            return Err(FetchError::NoBlockNumber);
        };
        if returned.as_u64() != requested {
            return Err(FetchError::MismatchedBlock {
                requested,
                returned: returned.as_u64(),
            });
        }
    }
    Ok(block)
}

fn truncate(message: &str) -> String {
    let message = message.trim();
    match message.char_indices().nth(MAX_MESSAGE_LEN) {
        Some((index, _)) => format!("{}...", &message[..index]),
        None => message.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use blockfetch_types::{BlockTag, Network};

    use super::*;

    #[test]
    fn test_unauthorized_status() {
        let body = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32600,"message":"Must be authenticated!"}}"#;
        let error = classify_status(StatusCode::UNAUTHORIZED, body);
        assert!(matches!(
            error,
            FetchError::Authentication { status, ref message }
                if status == StatusCode::UNAUTHORIZED && message == "Must be authenticated!"
        ));
    }

    #[test]
    fn test_too_many_requests_status() {
        let error = classify_status(StatusCode::TOO_MANY_REQUESTS, "slow down");
        assert!(matches!(error, FetchError::RateLimited(message) if message == "slow down"));
    }

    #[test]
    fn test_other_status_with_rpc_body() {
        let body = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32602,"message":"invalid argument 0"}}"#;
        let error = classify_status(StatusCode::BAD_REQUEST, body);
        assert!(matches!(error, FetchError::Rpc { code: -32602, .. }));

        let error = classify_status(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert!(matches!(error, FetchError::UnexpectedStatus { status, .. } if status == StatusCode::BAD_GATEWAY));
    }

    #[test]
    fn test_limit_exceeded_code() {
        let error = FetchError::from_rpc(JsonRpcError {
            code: -32005,
            message: "limit exceeded".to_string(),
        });
        assert!(matches!(error, FetchError::RateLimited(_)));
    }

    #[test]
    fn test_check_block() {
        let mut block: Block<H256> = Block::default();
        block.number = Some(U64::from(8778768));
        assert!(check_block(BlockId::Number(8778768), Some(block.clone())).is_ok());
        assert!(matches!(
            check_block(BlockId::Number(5), Some(block.clone())),
            Err(FetchError::MismatchedBlock {
                requested: 5,
                returned: 8778768
            })
        ));
        assert!(matches!(
            check_block::<H256>(BlockId::Number(5), None),
            Err(FetchError::NotFound(BlockId::Number(5)))
        ));
        // Tags resolve on the provider, any number is accepted.
        assert!(check_block(BlockId::Tag(BlockTag::Latest), Some(block)).is_ok());
    }

    #[test]
    fn test_pending_block_without_number() {
        let block: Block<H256> = Block::default();
        assert!(matches!(
            check_block(BlockId::Number(1), Some(block.clone())),
            Err(FetchError::NoBlockNumber)
        ));
        assert!(check_block(BlockId::Tag(BlockTag::Pending), Some(block)).is_ok());
    }

    #[test]
    fn test_truncate_long_message() {
        let long = "x".repeat(MAX_MESSAGE_LEN + 10);
        let truncated = truncate(&long);
        assert_eq!(truncated.len(), MAX_MESSAGE_LEN + 3);
        assert_eq!(truncate(" short "), "short");
    }

    #[test]
    fn test_provider_resolves_hosted_url() {
        let config = ClientConfig::new("key", Network::BaseSepolia).unwrap();
        let provider = Provider::new(config).unwrap();
        assert_eq!(
            provider.url.as_str(),
            "https://base-sepolia.g.alchemy.com/v2/key"
        );
        assert_eq!(provider.config().network(), Network::BaseSepolia);
    }
}
