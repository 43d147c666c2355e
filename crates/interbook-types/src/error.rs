//! Error types for the InterBook settlement protocol.
//!
//! All errors use the `IB_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Order store errors
//! - 2xx: Settlement / ledger errors
//! - 3xx: Cross-book protocol errors
//! - 4xx: Signature errors
//! - 9xx: Invariant violations

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{AccountId, Asset, CandidateState, OrderId};

/// Central error enum for all InterBook operations.
#[derive(Debug, Error)]
pub enum BookError {
    // =================================================================
    // Order Store Errors (1xx)
    // =================================================================
    /// The requested order id was never assigned by this book.
    #[error("IB_ERR_100: Order not found: {0}")]
    NotFound(OrderId),

    /// The caller is not the order's maker.
    #[error("IB_ERR_101: Unauthorized: {caller} is not the maker of {order_id}")]
    Unauthorized {
        order_id: OrderId,
        caller: AccountId,
    },

    /// Cancel attempted on an order already in a terminal state.
    #[error("IB_ERR_102: Order already inactive: {0}")]
    AlreadyInactive(OrderId),

    // =================================================================
    // Settlement / Ledger Errors (2xx)
    // =================================================================
    /// Fill attempted on an inactive (filled or canceled) order.
    #[error("IB_ERR_200: Order is not active: {0}")]
    OrderNotActive(OrderId),

    /// Not enough balance to perform the transfer.
    #[error("IB_ERR_201: Insufficient balance of {asset}: need {needed}, have {available}")]
    InsufficientBalance {
        asset: Asset,
        needed: Decimal,
        available: Decimal,
    },

    /// The spender's standing authorization does not cover the transfer.
    #[error(
        "IB_ERR_202: Insufficient allowance of {asset} from {owner} to {spender}: \
         need {needed}, have {available}"
    )]
    InsufficientAllowance {
        asset: Asset,
        owner: AccountId,
        spender: AccountId,
        needed: Decimal,
        available: Decimal,
    },

    /// Negative amounts never move; the ledger rejects them outright.
    #[error("IB_ERR_203: Invalid transfer amount: {0}")]
    InvalidAmount(Decimal),

    // =================================================================
    // Cross-Book Protocol Errors (3xx)
    // =================================================================
    /// The peer book is not in the trusted set.
    #[error("IB_ERR_300: Book is not trusted: {0}")]
    BookNotTrusted(AccountId),

    /// The taker's funds could not be pulled into custody.
    #[error("IB_ERR_301: Escrow failed: could not pull {amount} {asset} from taker")]
    EscrowFailed { asset: Asset, amount: Decimal },

    // =================================================================
    // Signature Errors (4xx)
    // =================================================================
    /// The signature does not bind the payload to the claimed signer
    /// under this book's domain parameters.
    #[error("IB_ERR_400: Invalid signature")]
    InvalidSignature,

    // =================================================================
    // Invariant Violations (9xx)
    // =================================================================
    /// A transfer out of the book's own custody was refused. Cannot happen
    /// against a conforming ledger while escrow accounting holds.
    #[error("IB_ERR_900: Custody violation: {amount} {asset} missing from book custody")]
    CustodyViolation { asset: Asset, amount: Decimal },

    /// Per-asset sum of balances diverged from the minted total.
    #[error("IB_ERR_901: Supply invariant violation for {asset}: expected {expected}, got {actual}")]
    SupplyInvariantViolation {
        asset: Asset,
        expected: Decimal,
        actual: Decimal,
    },

    /// A candidate fill was asked to resolve twice.
    #[error("IB_ERR_902: Candidate for {order_id} already resolved: {state}")]
    CandidateAlreadyResolved {
        order_id: OrderId,
        state: CandidateState,
    },
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, BookError>;
