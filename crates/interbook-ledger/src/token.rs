//! In-memory reference ledger with allowance-based authorization.
//!
//! Semantics follow the familiar token-registry surface: `approve` grants a
//! spender a standing allowance which `transfer` consumes; owners move their
//! own funds without one. `mint` is the fixture/deposit surface. Minted
//! totals are tracked per asset so supply conservation is checkable at any
//! point.

use std::collections::HashMap;

use rust_decimal::Decimal;

use interbook_types::{AccountId, Asset, BookError, Result};

use crate::transfer::{AssetLedger, TransferIntent};

/// Manages balances and allowances for any number of assets.
///
/// The ledger is the source of truth for all funds. Books hold no balances
/// of their own beyond their custody account on this ledger.
pub struct TokenLedger {
    /// Per-(owner, asset) balances.
    balances: HashMap<(AccountId, Asset), Decimal>,
    /// Per-(owner, spender, asset) standing authorizations.
    allowances: HashMap<(AccountId, AccountId, Asset), Decimal>,
    /// Total minted per asset since genesis.
    minted: HashMap<Asset, Decimal>,
}

impl TokenLedger {
    /// Create a new empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
            allowances: HashMap::new(),
            minted: HashMap::new(),
        }
    }

    /// Credit `to` with freshly minted funds (deposit surface).
    pub fn mint(&mut self, to: AccountId, asset: &str, amount: Decimal) {
        *self
            .balances
            .entry((to, asset.to_string()))
            .or_insert(Decimal::ZERO) += amount;
        *self
            .minted
            .entry(asset.to_string())
            .or_insert(Decimal::ZERO) += amount;
    }

    /// Grant `spender` a standing allowance over `owner`'s funds.
    /// Overwrites any previous allowance for the triple.
    pub fn approve(&mut self, owner: AccountId, spender: AccountId, asset: &str, amount: Decimal) {
        self.allowances
            .insert((owner, spender, asset.to_string()), amount);
    }

    /// Remaining allowance for the (owner, spender, asset) triple.
    #[must_use]
    pub fn allowance(&self, owner: AccountId, spender: AccountId, asset: &str) -> Decimal {
        self.allowances
            .get(&(owner, spender, asset.to_string()))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Sum of all balances of `asset`.
    #[must_use]
    pub fn total_supply(&self, asset: &str) -> Decimal {
        self.balances
            .iter()
            .filter(|((_, a), _)| a == asset)
            .map(|(_, amount)| *amount)
            .sum()
    }

    /// Total ever minted for `asset`.
    #[must_use]
    pub fn minted_supply(&self, asset: &str) -> Decimal {
        self.minted.get(asset).copied().unwrap_or(Decimal::ZERO)
    }

    /// Verify that held supply equals minted supply for `asset`.
    ///
    /// Transfers conserve supply by construction; a divergence means the
    /// ledger state was corrupted.
    ///
    /// # Errors
    /// Returns [`BookError::SupplyInvariantViolation`] on divergence.
    pub fn verify_supply(&self, asset: &str) -> Result<()> {
        let expected = self.minted_supply(asset);
        let actual = self.total_supply(asset);
        if expected != actual {
            return Err(BookError::SupplyInvariantViolation {
                asset: asset.to_string(),
                expected,
                actual,
            });
        }
        Ok(())
    }

    fn balance_entry(&mut self, owner: AccountId, asset: &str) -> &mut Decimal {
        self.balances
            .entry((owner, asset.to_string()))
            .or_insert(Decimal::ZERO)
    }
}

impl AssetLedger for TokenLedger {
    fn transfer(
        &mut self,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        asset: &str,
        amount: Decimal,
    ) -> Result<()> {
        if amount.is_sign_negative() {
            return Err(BookError::InvalidAmount(amount));
        }

        let available = self.balance_of(from, asset);
        if available < amount {
            return Err(BookError::InsufficientBalance {
                asset: asset.to_string(),
                needed: amount,
                available,
            });
        }

        if spender != from {
            let allowed = self.allowance(from, spender, asset);
            if allowed < amount {
                return Err(BookError::InsufficientAllowance {
                    asset: asset.to_string(),
                    owner: from,
                    spender,
                    needed: amount,
                    available: allowed,
                });
            }
            self.allowances
                .insert((from, spender, asset.to_string()), allowed - amount);
        }

        *self.balance_entry(from, asset) -= amount;
        *self.balance_entry(to, asset) += amount;

        tracing::debug!(
            spender = %spender,
            from = %from,
            to = %to,
            asset = %asset,
            amount = %amount,
            "Transfer applied"
        );
        Ok(())
    }

    fn apply(&mut self, intents: &[TransferIntent]) -> Result<()> {
        // Snapshot-restore keeps interdependent legs correct: a later leg may
        // spend what an earlier one delivered.
        let balances = self.balances.clone();
        let allowances = self.allowances.clone();
        for intent in intents {
            if let Err(err) = self.transfer(
                intent.spender,
                intent.from,
                intent.to,
                &intent.asset,
                intent.amount,
            ) {
                self.balances = balances;
                self.allowances = allowances;
                return Err(err);
            }
        }
        Ok(())
    }

    fn balance_of(&self, owner: AccountId, asset: &str) -> Decimal {
        self.balances
            .get(&(owner, asset.to_string()))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

impl Default for TokenLedger {
    fn default() -> Self {
        Self::new()
    }
}
