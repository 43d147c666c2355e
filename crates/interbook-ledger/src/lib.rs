//! # interbook-ledger
//!
//! **Funds Plane**: the asset ledger books settle against.
//!
//! ## Architecture
//!
//! Books never hold funds in their own data structures. Every balance lives
//! here, and every settlement leg is a [`TransferIntent`] executed through
//! the [`AssetLedger`] trait:
//!
//! 1. Owners move their own funds freely (`spender == from`)
//! 2. Books move user funds under a standing allowance (`approve`)
//! 3. Multi-leg settlements commit all-or-nothing (`apply`)
//!
//! [`TokenLedger`] is the in-memory reference implementation. Alternative
//! backends (a database, a chain client) implement [`AssetLedger`] and plug
//! into the same book code.

pub mod token;
pub mod transfer;

pub use token::TokenLedger;
pub use transfer::{AssetLedger, TransferIntent};
