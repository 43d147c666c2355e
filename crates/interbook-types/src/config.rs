//! Configuration for an InterBook book instance.

use serde::{Deserialize, Serialize};

use crate::{constants, AccountId, DomainId};

/// Identity and domain parameters of one book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookConfig {
    /// The book's ledger identity (ed25519 public key). Doubles as the
    /// custody account that holds escrow.
    pub account: AccountId,
    /// The settlement domain this book serves.
    pub domain_id: DomainId,
    /// Chain / execution-domain identifier bound into signatures.
    pub chain_id: u64,
}

impl BookConfig {
    #[must_use]
    pub fn new(account: AccountId, domain_id: DomainId) -> Self {
        Self {
            account,
            domain_id,
            chain_id: constants::DEFAULT_CHAIN_ID,
        }
    }

    #[must_use]
    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl BookConfig {
    /// Config with a synthetic account derived from the domain number.
    pub fn dummy(domain: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&domain.to_le_bytes());
        bytes[31] = 0xB0;
        Self::new(AccountId(bytes), DomainId(domain))
    }
}
