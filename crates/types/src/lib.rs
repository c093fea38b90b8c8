//! Types for configuring a provider client and naming the block to fetch.
pub mod block;
pub mod config;
pub mod constants;
pub mod network;

pub use block::{BlockId, BlockIdError, BlockTag};
pub use config::{ClientConfig, ConfigError};
pub use network::Network;
