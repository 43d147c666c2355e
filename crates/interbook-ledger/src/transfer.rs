//! The transfer contract settlement depends on.
//!
//! Books never inspect ledger internals. They need exactly three things:
//! move funds under authorization, move several legs as one atomic unit,
//! and read balances.

use rust_decimal::Decimal;

use interbook_types::{AccountId, Asset, Result};

/// One transfer leg: `spender` moves `amount` of `asset` from `from` to `to`.
///
/// When `spender == from` the owner is moving their own funds; otherwise a
/// standing allowance (from → spender) must cover the amount.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferIntent {
    pub spender: AccountId,
    pub from: AccountId,
    pub to: AccountId,
    pub asset: Asset,
    pub amount: Decimal,
}

impl TransferIntent {
    #[must_use]
    pub fn new(
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        asset: impl Into<Asset>,
        amount: Decimal,
    ) -> Self {
        Self {
            spender,
            from,
            to,
            asset: asset.into(),
            amount,
        }
    }
}

/// The asset-ledger collaborator consumed by books.
///
/// Contract:
/// - `transfer` either fully applies or fully fails; no partial amount ever
///   moves.
/// - `apply` commits every intent or none; failure of any leg leaves the
///   ledger exactly as it was.
/// - Balances of unknown (owner, asset) pairs read as zero.
pub trait AssetLedger {
    /// Move `amount` of `asset` from `from` to `to` on behalf of `spender`.
    ///
    /// # Errors
    /// `InsufficientBalance`, `InsufficientAllowance`, or `InvalidAmount`.
    fn transfer(
        &mut self,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        asset: &str,
        amount: Decimal,
    ) -> Result<()>;

    /// Apply all intents as one atomic unit.
    ///
    /// # Errors
    /// The first failing leg's error; the ledger is left unchanged.
    fn apply(&mut self, intents: &[TransferIntent]) -> Result<()>;

    /// Current balance, zero if the pair was never touched.
    fn balance_of(&self, owner: AccountId, asset: &str) -> Decimal;
}
