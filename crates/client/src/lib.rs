pub mod provider;
pub(crate) mod rpc;

pub use provider::{FetchError, Provider};
