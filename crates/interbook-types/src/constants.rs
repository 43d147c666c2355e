//! System-wide constants for the InterBook settlement protocol.

/// Chain / execution-domain identifier used when a deployment does not
/// configure one. Part of every signature's domain separation.
pub const DEFAULT_CHAIN_ID: u64 = 1;

/// Signature scheme identifier bound into every digest.
pub const SIGNING_SCHEME: &str = "interbook:ed25519-sha256";

/// Signature scheme version. Bump when the canonical encoding changes;
/// signatures are only valid for the exact field set of their version.
pub const SIGNING_VERSION: &str = "v1";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "InterBook";
