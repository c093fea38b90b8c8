//! Client configuration: the credential and the network to target.
use std::fmt;

use thiserror::Error;
use url::{ParseError, Url};

use crate::{
    constants::{PROVIDER_HOST_SUFFIX, PROVIDER_RPC_PATH, REDACTED},
    network::Network,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unrecognised network {0}")]
    UnknownNetwork(String),
    #[error("API key must not be empty")]
    EmptyApiKey,
    #[error("Url error {0}")]
    UrlError(#[from] ParseError),
    #[error("Url {0} cannot have path segments")]
    CannotBeABase(String),
}

/// Settings for a provider client. Immutable once built.
///
/// The API key is opaque and only checked for being non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_key: String,
    network: Network,
    endpoint: Option<Url>,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>, network: Network) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self {
            api_key,
            network,
            endpoint: None,
        })
    }

    /// Builds a config from textual settings, e.g., ("<key>", "eth-sepolia").
    pub fn from_parts(api_key: &str, network: &str) -> Result<Self, ConfigError> {
        Self::new(api_key, network.parse()?)
    }

    /// Sends requests to `endpoint` as-is instead of the hosted provider.
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn endpoint(&self) -> Option<&Url> {
        self.endpoint.as_ref()
    }

    /// Url that JSON-RPC requests are posted to.
    ///
    /// E.g., https://eth-sepolia.g.alchemy.com/v2/<api_key>
    pub fn rpc_url(&self) -> Result<Url, ConfigError> {
        if let Some(endpoint) = &self.endpoint {
            return Ok(endpoint.clone());
        }
        let base = format!("https://{}.{}", self.network.slug(), PROVIDER_HOST_SUFFIX);
        let mut url = Url::parse(&base)?;
        url.path_segments_mut()
            .map_err(|_| ConfigError::CannotBeABase(base.clone()))?
            .clear()
            .push(PROVIDER_RPC_PATH)
            .push(&self.api_key);
        Ok(url)
    }

    /// The rpc url with the key replaced, for logging.
    pub fn redacted_rpc_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.to_string(),
            None => format!(
                "https://{}.{}/{}/{}",
                self.network.slug(),
                PROVIDER_HOST_SUFFIX,
                PROVIDER_RPC_PATH,
                REDACTED
            ),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &REDACTED)
            .field("network", &self.network)
            .field("endpoint", &self.endpoint.as_ref().map(Url::as_str))
            .finish()
    }
}
