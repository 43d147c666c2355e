//! Notification types: the externally observable record of book activity.
//!
//! Books journal every state change as an [`EventRecord`]; indexers drain
//! the journal. Notifications are never used for internal control flow.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, Asset, EventId, OrderId};

/// A notification emitted by a book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BookEvent {
    /// An order was added to the book.
    OrderAdded {
        maker: AccountId,
        give_asset: Asset,
        give_amount: Decimal,
        want_asset: Asset,
        want_amount: Decimal,
        order_id: OrderId,
    },
    /// An order was canceled by its maker.
    OrderCanceled { maker: AccountId, order_id: OrderId },
    /// An order was settled, locally or on behalf of a peer book.
    OrderFilled {
        maker: AccountId,
        taker: AccountId,
        give_asset: Asset,
        give_amount: Decimal,
        want_asset: Asset,
        want_amount: Decimal,
        order_id: OrderId,
    },
    /// Escrow is held and a remote fill will now resolve one way or the other.
    RemoteOrderFillCandidate {
        remote_book: AccountId,
        order_id: OrderId,
    },
    /// The remote commit succeeded and escrow was forwarded to the maker.
    RemoteOrderFillConfirmed {
        remote_book: AccountId,
        order_id: OrderId,
    },
    /// The remote commit failed and escrow was refunded to the taker.
    RemoteOrderFillCanceled {
        remote_book: AccountId,
        order_id: OrderId,
    },
}

impl BookEvent {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OrderAdded { .. } => "ORDER_ADDED",
            Self::OrderCanceled { .. } => "ORDER_CANCELED",
            Self::OrderFilled { .. } => "ORDER_FILLED",
            Self::RemoteOrderFillCandidate { .. } => "REMOTE_ORDER_FILL_CANDIDATE",
            Self::RemoteOrderFillConfirmed { .. } => "REMOTE_ORDER_FILL_CONFIRMED",
            Self::RemoteOrderFillCanceled { .. } => "REMOTE_ORDER_FILL_CANCELED",
        }
    }
}

impl std::fmt::Display for BookEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind())
    }
}

/// A journaled notification: the event plus its identity and emission time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    pub recorded_at: DateTime<Utc>,
    pub event: BookEvent,
}

impl EventRecord {
    #[must_use]
    pub fn new(event: BookEvent) -> Self {
        Self {
            id: EventId::new(),
            recorded_at: Utc::now(),
            event,
        }
    }
}
