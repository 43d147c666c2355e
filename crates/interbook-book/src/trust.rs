//! The per-book set of peer books admitted to cross-book settlement.
//!
//! Trust is plain key-state: explicit, asymmetric, and never inferred from
//! the peer's own trust set. Both sides must register each other before a
//! cross-book fill can fully settle.

use std::collections::HashSet;

use interbook_types::AccountId;

/// Peer books permitted to participate in cross-book settlement.
#[derive(Debug, Default)]
pub struct TrustRegistry {
    peers: HashSet<AccountId>,
}

impl TrustRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            peers: HashSet::new(),
        }
    }

    /// Register a peer. Idempotent; returns `true` if the peer was new.
    pub fn add(&mut self, peer: AccountId) -> bool {
        self.peers.insert(peer)
    }

    /// Membership check: the precondition gate for cross-book settlement.
    #[must_use]
    pub fn is_trusted(&self, peer: AccountId) -> bool {
        self.peers.contains(&peer)
    }

    /// Number of registered peers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    /// Iterate registered peers (arbitrary order).
    pub fn peers(&self) -> impl Iterator<Item = &AccountId> {
        self.peers.iter()
    }
}
