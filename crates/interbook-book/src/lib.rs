//! # interbook-book
//!
//! **Settlement Plane**: the order book service. Order lifecycle, the
//! per-peer trust registry, and all three settlement paths.
//!
//! ## Architecture
//!
//! One [`Book`] per settlement domain:
//! 1. **OrderStore**: append-only nonce-indexed order storage
//! 2. **TrustRegistry**: peer books admitted to cross-book settlement
//! 3. **Local settlement**: two-party fill of a stored order
//! 4. **Cross-book settlement**: escrow/commit/compensate against a trusted
//!    peer book
//! 5. **Signed-order intake**: one-shot fills authorized by an off-chain
//!    maker signature, never stored
//!
//! ## Fill Paths
//!
//! ```text
//! local:   fill_order(id, taker)            ── both legs, one atomic batch
//! cross:   fill_order_on_book(id, B, taker) ── escrow, B.commit_peer_fill,
//!                                              then forward or refund
//! signed:  fill_signed_order(payload, sig)  ── verify, settle, consume digest
//! ```
//!
//! Every path either fully settles or leaves balances and order state
//! untouched; the cross-book path's refund branch is a resolution, not a
//! failure.

pub mod book;
pub mod cross;
pub mod intake;
pub mod store;
pub mod trust;

pub use book::Book;
pub use store::OrderStore;
pub use trust::TrustRegistry;
