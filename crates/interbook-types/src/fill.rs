//! Fill records, the artifact produced by every successful settlement.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, Asset, DomainId, FillId, Order, OrderId};

/// Record of a settled order: who gave what to whom, on which book.
///
/// The id is derived deterministically from (domain, order id, maker), so
/// the initiating and remote books of a cross-book fill agree on it without
/// coordination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub id: FillId,
    /// Domain of the book that held the order.
    pub domain_id: DomainId,
    pub order_id: OrderId,
    pub maker: AccountId,
    pub taker: AccountId,
    pub give_asset: Asset,
    pub give_amount: Decimal,
    pub want_asset: Asset,
    pub want_amount: Decimal,
    pub executed_at: DateTime<Utc>,
}

impl Fill {
    /// Build the fill record for `order` settled on `domain_id` against `taker`.
    #[must_use]
    pub fn for_order(domain_id: DomainId, order: &Order, taker: AccountId) -> Self {
        Self {
            id: FillId::deterministic(domain_id, order.nonce, order.maker),
            domain_id,
            order_id: order.nonce,
            maker: order.maker,
            taker,
            give_asset: order.give_asset.clone(),
            give_amount: order.give_amount,
            want_asset: order.want_asset.clone(),
            want_amount: order.want_amount,
            executed_at: Utc::now(),
        }
    }
}
