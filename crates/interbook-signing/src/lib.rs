//! # interbook-signing
//!
//! **Signature Binder**: canonical digests and ed25519 verification binding
//! orders to one book's domain parameters.
//!
//! ## Scheme
//!
//! `interbook:ed25519-sha256` `v1`: Sign(Ed25519, SHA-256(canonical_payload))
//!
//! The canonical payload starts with the scheme name, version, a payload-type
//! tag, the chain id, and the verifying book's identity, then the payload
//! fields (length-prefixed where variable-length). A signature is therefore
//! valid for exactly one book, one chain, and one payload shape:
//!
//! ```text
//! maker key ──sign──▶ OrderSignature ──▶ presented to book B
//!                                          │
//!            SigningContext(chain, B) ──digest──▶ verify: yes/no
//! ```
//!
//! Verification never errors: malformed keys and signatures are `false`.

pub mod digest;
pub mod verify;

pub use digest::{OrderDigest, SigningContext};
pub use verify::{sign_digest, signer_account, verify_digest};
