//! Signed-order intake: one-shot fills authorized purely by signature.
//!
//! The order is never stored. The maker signs the domain-bound digest of the
//! full payload off-chain; any holder of payload + signature can present it
//! here for settlement. The digest covers this book's identity and chain id,
//! so the same payload presented to any other book verifies as garbage.

use interbook_ledger::AssetLedger;
use interbook_signing::{verify_digest, OrderDigest};
use interbook_types::{
    AccountId, BookError, BookEvent, Fill, Order, OrderSignature, Result, XOrder,
};

use crate::book::Book;

impl Book {
    /// The digest a maker must sign for `order` to settle on this book.
    #[must_use]
    pub fn order_digest(&self, order: &Order) -> OrderDigest {
        self.signing.order_digest(order)
    }

    /// The digest a maker must sign for `xorder` to validate on this book.
    #[must_use]
    pub fn xorder_digest(&self, xorder: &XOrder) -> OrderDigest {
        self.signing.xorder_digest(xorder)
    }

    /// Settle a never-stored order authorized by the maker's signature.
    ///
    /// Each digest settles at most once on this book: a successful fill
    /// consumes it, and re-presenting the same payload fails as an inactive
    /// order. A failed attempt consumes nothing. Makers reissue by bumping
    /// the payload nonce, which produces a fresh digest.
    ///
    /// # Errors
    /// `InvalidSignature`, `OrderNotActive` (payload marked inactive, or
    /// digest already consumed), or the failing leg's ledger error.
    pub fn fill_signed_order<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        order: &Order,
        signature: &OrderSignature,
        taker: AccountId,
    ) -> Result<Fill> {
        let digest = self.signing.order_digest(order);
        if !verify_digest(&digest, signature, order.maker) {
            return Err(BookError::InvalidSignature);
        }
        if !order.active {
            return Err(BookError::OrderNotActive(order.nonce));
        }
        if self.used_digests.contains(&digest) {
            return Err(BookError::OrderNotActive(order.nonce));
        }

        self.settle(ledger, order, taker)?;
        self.used_digests.insert(digest);

        let fill = Fill::for_order(self.domain_id(), order, taker);
        self.emit(BookEvent::OrderFilled {
            maker: order.maker,
            taker,
            give_asset: order.give_asset.clone(),
            give_amount: order.give_amount,
            want_asset: order.want_asset.clone(),
            want_amount: order.want_amount,
            order_id: order.nonce,
        });
        tracing::info!(
            book = %self.account(),
            fill_id = %fill.id,
            digest = %digest,
            maker = %order.maker,
            taker = %taker,
            "Signed order filled"
        );
        Ok(fill)
    }

    /// Pure check of a cross-domain order: true iff the signature binds the
    /// payload to its claimed maker under this book's parameters AND the
    /// payload is addressed to this book's own domain.
    ///
    /// A cryptographically valid signature addressed to another domain is
    /// `false`; never panics.
    #[must_use]
    pub fn validate_xorder(&self, xorder: &XOrder, signature: &OrderSignature) -> bool {
        if xorder.target_domain != self.domain_id() {
            return false;
        }
        verify_digest(&self.signing.xorder_digest(xorder), signature, xorder.maker)
    }
}
