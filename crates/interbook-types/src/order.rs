//! Order types for the InterBook settlement protocol.
//!
//! An order is a maker's standing offer to exchange a fixed amount of one
//! asset for a fixed amount of another. No price discovery: a taker accepts
//! the whole order or not at all.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, Asset, DomainId, OrderId};

/// A stored order. `nonce` doubles as the order's id within its book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub maker: AccountId,
    pub give_asset: Asset,
    pub give_amount: Decimal,
    pub want_asset: Asset,
    pub want_amount: Decimal,
    /// Assigned once by the book at creation, never reused.
    pub nonce: OrderId,
    /// Transitions true→false exactly once (fill or cancel), never back.
    pub active: bool,
}

impl Order {
    #[must_use]
    pub fn new(
        maker: AccountId,
        give_asset: impl Into<Asset>,
        give_amount: Decimal,
        want_asset: impl Into<Asset>,
        want_amount: Decimal,
        nonce: OrderId,
    ) -> Self {
        Self {
            maker,
            give_asset: give_asset.into(),
            give_amount,
            want_asset: want_asset.into(),
            want_amount,
            nonce,
            active: true,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// A cross-domain signed order. Never stored: validated ad hoc against the
/// receiving book's domain, so it carries no nonce and no `active` flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XOrder {
    pub maker: AccountId,
    pub give_asset: Asset,
    pub give_amount: Decimal,
    pub want_asset: Asset,
    pub want_amount: Decimal,
    /// Domain the order originates from.
    pub source_domain: DomainId,
    /// Domain the order is addressed to; must equal the verifying book's own.
    pub target_domain: DomainId,
}

impl XOrder {
    #[must_use]
    pub fn new(
        maker: AccountId,
        give_asset: impl Into<Asset>,
        give_amount: Decimal,
        want_asset: impl Into<Asset>,
        want_amount: Decimal,
        source_domain: DomainId,
        target_domain: DomainId,
    ) -> Self {
        Self {
            maker,
            give_asset: give_asset.into(),
            give_amount,
            want_asset: want_asset.into(),
            want_amount,
            source_domain,
            target_domain,
        }
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Order {
    /// Offer 10 AAA for 20 BBB, nonce 0, active.
    pub fn dummy(maker: AccountId) -> Self {
        Self::new(
            maker,
            "AAA",
            Decimal::new(10, 0),
            "BBB",
            Decimal::new(20, 0),
            OrderId(0),
        )
    }
}
