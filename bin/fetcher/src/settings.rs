//! Merges command line, environment and config file settings into a client config.
use std::{fs, path::Path};

use anyhow::{anyhow, Context, Result};
use blockfetch_types::{ClientConfig, Network};
use serde::Deserialize;
use url::Url;

use crate::cli::AppArgs;

/// Contents of the optional TOML config file.
///
/// ```toml
/// api_key = "..."
/// network = "eth-sepolia"
/// ```
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    pub api_key: Option<String>,
    pub network: Option<Network>,
    pub rpc_url: Option<Url>,
}

impl FileSettings {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

/// Flags (and their env fallbacks) take priority over the file.
/// The network defaults to eth-mainnet.
pub fn resolve_config(args: &AppArgs, file: FileSettings) -> Result<ClientConfig> {
    let api_key = args.api_key.clone().or(file.api_key).ok_or_else(|| {
        anyhow!("No API key. Use --api-key, set BLOCKFETCH_API_KEY or add api_key to a config file")
    })?;
    let network = args.network.or(file.network).unwrap_or_default();
    let config = ClientConfig::new(api_key, network)?;
    Ok(match args.rpc_url.clone().or(file.rpc_url) {
        Some(url) => config.with_endpoint(url),
        None => config,
    })
}
