//! Read-only client for hosted Ethereum JSON-RPC providers.
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use blockfetch::{ClientConfig, Provider};
//!
//! let config = ClientConfig::from_parts(&std::env::var("BLOCKFETCH_API_KEY")?, "eth-sepolia")?;
//! let block = Provider::new(config)?.get_block(8778768).await?;
//! println!("{}", serde_json::to_string_pretty(&block)?);
//! # Ok(())
//! # }
//! ```
pub use blockfetch_client as client;
pub use blockfetch_types as types;

pub use blockfetch_client::{FetchError, Provider};
pub use blockfetch_types::{BlockId, BlockIdError, BlockTag, ClientConfig, ConfigError, Network};

use ethers::types::{Block, H256};

/// Builds a provider for `config` and fetches a single block with transaction hashes.
pub async fn fetch_block(
    config: ClientConfig,
    block: impl Into<BlockId>,
) -> Result<Block<H256>, FetchError> {
    Provider::new(config)?.get_block(block).await
}
