//! For Command Line Interface for blockfetch

use std::path::PathBuf;

use blockfetch_types::{BlockId, Network};
use clap::Parser;
use url::Url;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct AppArgs {
    /// Block to fetch. Decimal, 0x-prefixed hex, or a tag (latest, safe, finalized, ...)
    #[clap(default_value_t = BlockId::default())]
    pub block: BlockId,
    /// Provider API key
    #[clap(short = 'k', long, env = "BLOCKFETCH_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
    /// Network to query. E.g., eth-mainnet, eth-sepolia, base-mainnet
    #[clap(short, long, env = "BLOCKFETCH_NETWORK")]
    pub network: Option<Network>,
    /// Url of a JSON-RPC node to use instead of the hosted provider
    #[clap(short, long, env = "BLOCKFETCH_RPC_URL")]
    pub rpc_url: Option<Url>,
    /// TOML file with api_key, network and rpc_url entries
    #[clap(short, long)]
    pub config: Option<PathBuf>,
    /// Include full transaction objects rather than transaction hashes
    #[clap(short, long)]
    pub full_transactions: bool,
    /// File to create. Prints to stdout if absent
    #[clap(short, long)]
    pub out: Option<PathBuf>,
}
