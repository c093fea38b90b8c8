//! Provider endpoint constants

/// Host suffix of the hosted provider. The network slug is the subdomain.
pub const PROVIDER_HOST_SUFFIX: &str = "g.alchemy.com";

/// Path prefix for JSON-RPC requests. The API key is the final path segment.
pub const PROVIDER_RPC_PATH: &str = "v2";

/// Placeholder written in place of the API key when a url is logged.
pub const REDACTED: &str = "<redacted>";

/// JSON-RPC error code some providers use for throttled requests.
pub const RPC_CODE_RATE_LIMITED: i64 = 429;

/// JSON-RPC error code for "limit exceeded" (EIP-1474).
pub const RPC_CODE_LIMIT_EXCEEDED: i64 = -32005;
