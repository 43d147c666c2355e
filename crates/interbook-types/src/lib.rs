//! # interbook-types
//!
//! Shared types, errors, and configuration for the **InterBook** federated
//! settlement protocol.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountId`], [`OrderId`], [`DomainId`], [`FillId`], [`EventId`], [`Asset`]
//! - **Order model**: [`Order`], [`XOrder`]
//! - **Fill model**: [`Fill`]
//! - **Candidate model**: [`CandidateFill`], [`CandidateState`], [`RemoteFillOutcome`]
//! - **Notification model**: [`BookEvent`], [`EventRecord`]
//! - **Signatures**: [`OrderSignature`]
//! - **Configuration**: [`BookConfig`]
//! - **Errors**: [`BookError`] with `IB_ERR_` prefix codes
//! - **Constants**: scheme identifiers and defaults

pub mod candidate;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod fill;
pub mod ids;
pub mod order;
pub mod signature;

// Re-export all primary types at crate root for ergonomic imports:
//   use interbook_types::{Order, Fill, BookEvent, ...};

pub use candidate::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use fill::*;
pub use ids::*;
pub use order::*;
pub use signature::*;

// Constants are accessed via `interbook_types::constants::FOO`
// (not re-exported to avoid name collisions).
