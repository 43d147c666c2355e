//! # CandidateFill: the cross-book escrow commitment
//!
//! A `CandidateFill` is created the moment a book has pulled a taker's funds
//! into custody for a cross-book fill. From that point the protocol owes the
//! world exactly one resolution.
//!
//! ## State Machine
//!
//! ```text
//!   ┌──────────┐  remote commit ok   ┌───────────┐
//!   │ ESCROWED ├────────────────────▶│ CONFIRMED │
//!   └────┬─────┘                     └───────────┘
//!        │ remote commit failed
//!        ▼
//!   ┌──────────┐
//!   │ CANCELED │
//!   └──────────┘
//! ```
//!
//! Both terminal states are absorbing. The only action on the failure branch
//! is the compensating refund of the escrowed amount: escrowed funds are
//! never left unaccounted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, Asset, BookError, Fill, OrderId};

/// The lifecycle state of a candidate fill.
///
/// Transitions are **monotonic** (never go backwards):
/// - `Escrowed → Confirmed` (remote commit succeeded, escrow forwarded)
/// - `Escrowed → Canceled` (remote commit failed, escrow refunded)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandidateState {
    /// Taker's funds are in the book's custody awaiting the remote commit.
    Escrowed,
    /// The remote order settled; escrow was forwarded to the remote maker.
    /// **Irreversible.**
    Confirmed,
    /// The remote commit failed; escrow was refunded to the taker.
    /// **Irreversible.**
    Canceled,
}

impl CandidateState {
    /// Can this candidate transition to the given target state?
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Escrowed, Self::Confirmed | Self::Canceled)
        )
    }
}

impl std::fmt::Display for CandidateState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Escrowed => write!(f, "ESCROWED"),
            Self::Confirmed => write!(f, "CONFIRMED"),
            Self::Canceled => write!(f, "CANCELED"),
        }
    }
}

/// An announced cross-book fill attempt with escrow held.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateFill {
    /// The trusted peer book holding the order.
    pub remote_book: AccountId,
    /// The order id on the remote book.
    pub order_id: OrderId,
    /// The taker whose funds are escrowed.
    pub taker: AccountId,
    /// Asset held in custody (the remote order's want asset).
    pub escrow_asset: Asset,
    /// Amount held in custody.
    pub escrow_amount: Decimal,
    /// Current lifecycle state.
    pub state: CandidateState,
}

impl CandidateFill {
    #[must_use]
    pub fn new(
        remote_book: AccountId,
        order_id: OrderId,
        taker: AccountId,
        escrow_asset: impl Into<Asset>,
        escrow_amount: Decimal,
    ) -> Self {
        Self {
            remote_book,
            order_id,
            taker,
            escrow_asset: escrow_asset.into(),
            escrow_amount,
            state: CandidateState::Escrowed,
        }
    }

    /// Attempt to transition to CONFIRMED.
    ///
    /// # Errors
    /// Returns an error if the candidate already resolved.
    pub fn mark_confirmed(&mut self) -> crate::Result<()> {
        if !self.state.can_transition_to(CandidateState::Confirmed) {
            return Err(BookError::CandidateAlreadyResolved {
                order_id: self.order_id,
                state: self.state,
            });
        }
        self.state = CandidateState::Confirmed;
        Ok(())
    }

    /// Attempt to transition to CANCELED.
    ///
    /// # Errors
    /// Returns an error if the candidate already resolved.
    pub fn mark_canceled(&mut self) -> crate::Result<()> {
        if !self.state.can_transition_to(CandidateState::Canceled) {
            return Err(BookError::CandidateAlreadyResolved {
                order_id: self.order_id,
                state: self.state,
            });
        }
        self.state = CandidateState::Canceled;
        Ok(())
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.state != CandidateState::Escrowed
    }
}

/// How a cross-book fill resolved. A canceled outcome is a successful
/// protocol run that happens to compensate; it carries no failure cause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RemoteFillOutcome {
    /// The remote order settled; carries the remote book's fill record.
    Confirmed(Fill),
    /// The escrow was refunded in full; carries the resolved candidate.
    Canceled(CandidateFill),
}

impl RemoteFillOutcome {
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }

    #[must_use]
    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled(_))
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl CandidateFill {
    pub fn dummy() -> Self {
        Self::new(
            AccountId([0xBB; 32]),
            OrderId(0),
            AccountId([0xCC; 32]),
            "BBB",
            Decimal::new(20, 0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_transitions_valid() {
        assert!(CandidateState::Escrowed.can_transition_to(CandidateState::Confirmed));
        assert!(CandidateState::Escrowed.can_transition_to(CandidateState::Canceled));
    }

    #[test]
    fn state_transitions_invalid() {
        assert!(!CandidateState::Confirmed.can_transition_to(CandidateState::Canceled));
        assert!(!CandidateState::Confirmed.can_transition_to(CandidateState::Escrowed));
        assert!(!CandidateState::Canceled.can_transition_to(CandidateState::Confirmed));
        assert!(!CandidateState::Canceled.can_transition_to(CandidateState::Escrowed));
    }

    #[test]
    fn confirm_from_escrowed() {
        let mut candidate = CandidateFill::dummy();
        assert!(candidate.mark_confirmed().is_ok());
        assert_eq!(candidate.state, CandidateState::Confirmed);
        assert!(candidate.is_resolved());
    }

    #[test]
    fn cancel_from_escrowed() {
        let mut candidate = CandidateFill::dummy();
        assert!(candidate.mark_canceled().is_ok());
        assert_eq!(candidate.state, CandidateState::Canceled);
    }

    #[test]
    fn double_resolution_blocked() {
        let mut candidate = CandidateFill::dummy();
        candidate.mark_confirmed().unwrap();
        assert!(
            candidate.mark_canceled().is_err(),
            "CONFIRMED → CANCELED must fail"
        );
        assert!(
            candidate.mark_confirmed().is_err(),
            "CONFIRMED → CONFIRMED must fail"
        );
    }

    #[test]
    fn state_display() {
        assert_eq!(format!("{}", CandidateState::Escrowed), "ESCROWED");
        assert_eq!(format!("{}", CandidateState::Confirmed), "CONFIRMED");
        assert_eq!(format!("{}", CandidateState::Canceled), "CANCELED");
    }

    #[test]
    fn serde_roundtrip() {
        let candidate = CandidateFill::dummy();
        let json = serde_json::to_string(&candidate).unwrap();
        let back: CandidateFill = serde_json::from_str(&json).unwrap();
        assert_eq!(candidate, back);
    }
}
