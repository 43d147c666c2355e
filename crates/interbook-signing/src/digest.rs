//! Canonical, domain-separated order digests.
//!
//! ## Canonical Format
//!
//! Every digest is SHA-256 over a byte payload built from:
//! scheme name, scheme version, a payload-type tag (`order` / `xorder`),
//! the chain id, the verifying book's identity, then the payload fields in
//! declaration order. Variable-length fields carry a little-endian `u32`
//! length prefix so adjacent fields can never be confused; integers are
//! little-endian `u64`; amounts are normalized before encoding so
//! numerically equal values digest identically.
//!
//! A signature over such a digest is valid for exactly one book, one chain,
//! and one payload shape. Replaying it anywhere else fails verification.

use std::fmt;

use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

use interbook_types::{constants, AccountId, BookConfig, Order, XOrder};

/// Payload-type tag for stored/signed orders.
const ORDER_TAG: &str = "order";
/// Payload-type tag for cross-domain orders.
const XORDER_TAG: &str = "xorder";

// ---------------------------------------------------------------------------
// OrderDigest
// ---------------------------------------------------------------------------

/// A fixed-size digest binding an order to one book's domain parameters.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderDigest(pub [u8; 32]);

impl OrderDigest {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for OrderDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OrderDigest({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for OrderDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// SigningContext
// ---------------------------------------------------------------------------

/// The domain-separation parameters of one verifying book.
///
/// Digesting is a pure function of (context, payload); the context never
/// changes after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigningContext {
    /// Chain / execution-domain identifier.
    pub chain_id: u64,
    /// Identity of the book the signature must be presented to.
    pub book: AccountId,
}

impl SigningContext {
    #[must_use]
    pub fn new(chain_id: u64, book: AccountId) -> Self {
        Self { chain_id, book }
    }

    #[must_use]
    pub fn for_book(config: &BookConfig) -> Self {
        Self::new(config.chain_id, config.account)
    }

    /// Digest of a stored or signed order under this context.
    ///
    /// Covers every order field including `nonce` and `active`, so a maker's
    /// signature cannot be replayed onto a reissued or deactivated payload.
    #[must_use]
    pub fn order_digest(&self, order: &Order) -> OrderDigest {
        let mut buf = self.header(ORDER_TAG);
        write_account(&mut buf, order.maker);
        write_str(&mut buf, &order.give_asset);
        write_amount(&mut buf, order.give_amount);
        write_str(&mut buf, &order.want_asset);
        write_amount(&mut buf, order.want_amount);
        write_u64(&mut buf, order.nonce.0);
        buf.push(u8::from(order.active));
        finish(&buf)
    }

    /// Digest of a cross-domain order under this context.
    ///
    /// Additionally covers `source_domain` and `target_domain`; the distinct
    /// payload tag keeps it from ever colliding with an [`Order`] digest.
    #[must_use]
    pub fn xorder_digest(&self, xorder: &XOrder) -> OrderDigest {
        let mut buf = self.header(XORDER_TAG);
        write_account(&mut buf, xorder.maker);
        write_str(&mut buf, &xorder.give_asset);
        write_amount(&mut buf, xorder.give_amount);
        write_str(&mut buf, &xorder.want_asset);
        write_amount(&mut buf, xorder.want_amount);
        write_u64(&mut buf, xorder.source_domain.0);
        write_u64(&mut buf, xorder.target_domain.0);
        finish(&buf)
    }

    fn header(&self, tag: &str) -> Vec<u8> {
        let mut buf = Vec::with_capacity(256);
        write_str(&mut buf, constants::SIGNING_SCHEME);
        write_str(&mut buf, constants::SIGNING_VERSION);
        write_str(&mut buf, tag);
        write_u64(&mut buf, self.chain_id);
        write_account(&mut buf, self.book);
        buf
    }
}

// ---------------------------------------------------------------------------
// Canonical encoding helpers
// ---------------------------------------------------------------------------

fn write_str(buf: &mut Vec<u8>, s: &str) {
    let bytes = s.as_bytes();
    buf.extend_from_slice(&u32::try_from(bytes.len()).unwrap_or(u32::MAX).to_le_bytes());
    buf.extend_from_slice(bytes);
}

fn write_u64(buf: &mut Vec<u8>, v: u64) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn write_account(buf: &mut Vec<u8>, account: AccountId) {
    buf.extend_from_slice(account.as_bytes());
}

/// Amounts are normalized so `1.5` and `1.50` encode to the same bytes.
fn write_amount(buf: &mut Vec<u8>, amount: Decimal) {
    write_str(buf, &amount.normalize().to_string());
}

fn finish(buf: &[u8]) -> OrderDigest {
    OrderDigest(Sha256::digest(buf).into())
}
