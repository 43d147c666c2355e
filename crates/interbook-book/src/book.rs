//! The book: order lifecycle, notification journal, and local settlement.
//!
//! A [`Book`] owns its order store and trust registry outright. It holds no
//! funds in its own structures; its `AccountId` doubles as the custody
//! account on the asset ledger, and every settlement leg runs through the
//! [`AssetLedger`] the caller passes in. Exclusive `&mut` access to both the
//! book and the ledger is what serializes settlement: no other operation can
//! observe an order marked inactive before its transfers committed.

use std::collections::HashSet;

use rust_decimal::Decimal;

use interbook_ledger::{AssetLedger, TransferIntent};
use interbook_signing::{OrderDigest, SigningContext};
use interbook_types::{
    AccountId, Asset, BookConfig, BookError, BookEvent, DomainId, EventRecord, Fill, Order,
    OrderId, Result,
};

use crate::store::OrderStore;
use crate::trust::TrustRegistry;

/// An autonomous order-matching service: one settlement domain, one order
/// store, one trust set, one notification journal.
#[derive(Debug)]
pub struct Book {
    pub(crate) config: BookConfig,
    /// Domain-separation parameters signatures must bind to.
    pub(crate) signing: SigningContext,
    pub(crate) store: OrderStore,
    pub(crate) trust: TrustRegistry,
    /// Journal of emitted notifications, drained by observers.
    pub(crate) events: Vec<EventRecord>,
    /// Digests of signed orders already settled here. A digest in this set
    /// is terminal; re-presenting it cannot settle again.
    pub(crate) used_digests: HashSet<OrderDigest>,
}

impl Book {
    #[must_use]
    pub fn new(config: BookConfig) -> Self {
        let signing = SigningContext::for_book(&config);
        Self {
            config,
            signing,
            store: OrderStore::new(),
            trust: TrustRegistry::new(),
            events: Vec::new(),
            used_digests: HashSet::new(),
        }
    }

    // =================================================================
    // Identity
    // =================================================================

    /// The book's ledger identity and custody account.
    #[must_use]
    pub fn account(&self) -> AccountId {
        self.config.account
    }

    /// The settlement domain this book serves.
    #[must_use]
    pub fn domain_id(&self) -> DomainId {
        self.config.domain_id
    }

    #[must_use]
    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    // =================================================================
    // Order lifecycle
    // =================================================================

    /// Post a new order. Returns the assigned id (the book's next nonce).
    ///
    /// No funds move and no balance is checked here: the maker grants the
    /// book an allowance on the asset ledger separately, and it is checked
    /// only at fill time.
    pub fn add_order(
        &mut self,
        maker: AccountId,
        give_asset: impl Into<Asset>,
        give_amount: Decimal,
        want_asset: impl Into<Asset>,
        want_amount: Decimal,
    ) -> OrderId {
        let give_asset = give_asset.into();
        let want_asset = want_asset.into();
        let order_id = self.store.add(
            maker,
            give_asset.clone(),
            give_amount,
            want_asset.clone(),
            want_amount,
        );
        self.emit(BookEvent::OrderAdded {
            maker,
            give_asset,
            give_amount,
            want_asset,
            want_amount,
            order_id,
        });
        order_id
    }

    /// Cancel an order. Only the maker may cancel, and only once.
    ///
    /// # Errors
    /// `NotFound`, `Unauthorized` (caller is not the maker), or
    /// `AlreadyInactive`.
    pub fn cancel_order(&mut self, order_id: OrderId, caller: AccountId) -> Result<()> {
        let order = self.store.get(order_id)?;
        if order.maker != caller {
            return Err(BookError::Unauthorized { order_id, caller });
        }
        if !order.active {
            return Err(BookError::AlreadyInactive(order_id));
        }
        let maker = order.maker;
        self.store.deactivate(order_id)?;
        self.emit(BookEvent::OrderCanceled { maker, order_id });
        Ok(())
    }

    /// Look up an order by id.
    pub fn get_order(&self, order_id: OrderId) -> Result<&Order> {
        self.store.get(order_id)
    }

    /// The nonce the next order will receive.
    #[must_use]
    pub fn current_nonce(&self) -> OrderId {
        self.store.current_nonce()
    }

    /// Count of orders ever added.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.store.len()
    }

    // =================================================================
    // Trust
    // =================================================================

    /// Register a peer book for cross-book settlement. Idempotent, and
    /// strictly one-directional: the peer must register this book itself
    /// before fills can settle in the other direction.
    pub fn add_trusted_book(&mut self, peer: AccountId) {
        if self.trust.add(peer) {
            tracing::info!(book = %self.config.account, peer = %peer, "Peer book trusted");
        }
    }

    #[must_use]
    pub fn is_trusted(&self, peer: AccountId) -> bool {
        self.trust.is_trusted(peer)
    }

    // =================================================================
    // Local settlement
    // =================================================================

    /// Fill a locally stored order: `give_amount` of `give_asset` moves
    /// maker→taker and `want_amount` of `want_asset` moves taker→maker, as
    /// one atomic unit.
    ///
    /// The order is marked inactive only after both legs committed, so a
    /// failed fill leaves the order active and every balance untouched.
    ///
    /// # Errors
    /// `NotFound`, `OrderNotActive`, or the failing leg's ledger error.
    pub fn fill_order<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        order_id: OrderId,
        taker: AccountId,
    ) -> Result<Fill> {
        let order = self.store.get(order_id)?.clone();
        if !order.active {
            return Err(BookError::OrderNotActive(order_id));
        }

        self.settle(ledger, &order, taker)?;
        self.store.deactivate(order_id)?;

        let fill = Fill::for_order(self.domain_id(), &order, taker);
        self.emit(BookEvent::OrderFilled {
            maker: order.maker,
            taker,
            give_asset: order.give_asset,
            give_amount: order.give_amount,
            want_asset: order.want_asset,
            want_amount: order.want_amount,
            order_id,
        });
        tracing::info!(
            book = %self.config.account,
            fill_id = %fill.id,
            order = %order_id,
            maker = %fill.maker,
            taker = %taker,
            "Order filled"
        );
        Ok(fill)
    }

    /// Execute both legs of a fill as one all-or-nothing ledger batch, with
    /// the book as the authorized spender on each.
    pub(crate) fn settle<L: AssetLedger>(
        &self,
        ledger: &mut L,
        order: &Order,
        taker: AccountId,
    ) -> Result<()> {
        let book = self.account();
        let legs = [
            TransferIntent::new(
                book,
                order.maker,
                taker,
                order.give_asset.clone(),
                order.give_amount,
            ),
            TransferIntent::new(
                book,
                taker,
                order.maker,
                order.want_asset.clone(),
                order.want_amount,
            ),
        ];
        ledger.apply(&legs)
    }

    // =================================================================
    // Notifications
    // =================================================================

    /// All journaled notifications since the last drain.
    #[must_use]
    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    /// Drain the notification journal.
    pub fn take_events(&mut self) -> Vec<EventRecord> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: BookEvent) {
        self.events.push(EventRecord::new(event));
    }
}

#[cfg(test)]
mod tests {
    use interbook_ledger::TokenLedger;

    use super::*;

    /// One book, a funded maker/taker pair, both approved for the book.
    fn setup() -> (Book, TokenLedger, AccountId, AccountId) {
        let book = Book::new(BookConfig::dummy(1));
        let mut ledger = TokenLedger::new();
        let maker = AccountId([0x01; 32]);
        let taker = AccountId([0x02; 32]);
        ledger.mint(maker, "AAA", Decimal::new(100, 0));
        ledger.mint(taker, "BBB", Decimal::new(100, 0));
        ledger.approve(maker, book.account(), "AAA", Decimal::new(100, 0));
        ledger.approve(taker, book.account(), "BBB", Decimal::new(100, 0));
        (book, ledger, maker, taker)
    }

    fn post_dummy(book: &mut Book, maker: AccountId) -> OrderId {
        book.add_order(
            maker,
            "AAA",
            Decimal::new(10, 0),
            "BBB",
            Decimal::new(20, 0),
        )
    }

    #[test]
    fn add_order_assigns_sequential_ids() {
        let (mut book, _, maker, _) = setup();
        assert_eq!(post_dummy(&mut book, maker), OrderId(0));
        assert_eq!(post_dummy(&mut book, maker), OrderId(1));
        assert_eq!(book.current_nonce(), OrderId(2));
        assert_eq!(book.order_count(), 2);
    }

    #[test]
    fn add_order_journals_full_payload() {
        let (mut book, _, maker, _) = setup();
        let id = post_dummy(&mut book, maker);
        let events = book.take_events();
        assert_eq!(events.len(), 1);
        match &events[0].event {
            BookEvent::OrderAdded {
                maker: m,
                give_asset,
                give_amount,
                want_asset,
                want_amount,
                order_id,
            } => {
                assert_eq!(*m, maker);
                assert_eq!(give_asset, "AAA");
                assert_eq!(*give_amount, Decimal::new(10, 0));
                assert_eq!(want_asset, "BBB");
                assert_eq!(*want_amount, Decimal::new(20, 0));
                assert_eq!(*order_id, id);
            }
            other => panic!("expected OrderAdded, got {other:?}"),
        }
    }

    #[test]
    fn get_order_unknown_id() {
        let (book, ..) = setup();
        assert!(matches!(
            book.get_order(OrderId(0)),
            Err(BookError::NotFound(OrderId(0)))
        ));
    }

    #[test]
    fn cancel_order_deactivates_and_notifies() {
        let (mut book, _, maker, _) = setup();
        let id = post_dummy(&mut book, maker);
        book.cancel_order(id, maker).unwrap();
        assert!(!book.get_order(id).unwrap().is_active());
        let events = book.take_events();
        assert_eq!(events[1].event.kind(), "ORDER_CANCELED");
    }

    #[test]
    fn cancel_order_requires_maker() {
        let (mut book, _, maker, taker) = setup();
        let id = post_dummy(&mut book, maker);
        let err = book.cancel_order(id, taker).unwrap_err();
        assert!(matches!(err, BookError::Unauthorized { .. }));
        assert!(book.get_order(id).unwrap().is_active());
    }

    #[test]
    fn cancel_order_twice_fails() {
        let (mut book, _, maker, _) = setup();
        let id = post_dummy(&mut book, maker);
        book.cancel_order(id, maker).unwrap();
        let err = book.cancel_order(id, maker).unwrap_err();
        assert!(matches!(err, BookError::AlreadyInactive(_)));
    }

    #[test]
    fn unauthorized_wins_over_already_inactive() {
        let (mut book, _, maker, taker) = setup();
        let id = post_dummy(&mut book, maker);
        book.cancel_order(id, maker).unwrap();
        // A non-maker canceling an inactive order sees Unauthorized.
        let err = book.cancel_order(id, taker).unwrap_err();
        assert!(matches!(err, BookError::Unauthorized { .. }));
    }

    #[test]
    fn fill_order_moves_exact_amounts() {
        let (mut book, mut ledger, maker, taker) = setup();
        let id = post_dummy(&mut book, maker);

        let fill = book.fill_order(&mut ledger, id, taker).unwrap();

        assert_eq!(ledger.balance_of(maker, "AAA"), Decimal::new(90, 0));
        assert_eq!(ledger.balance_of(taker, "AAA"), Decimal::new(10, 0));
        assert_eq!(ledger.balance_of(taker, "BBB"), Decimal::new(80, 0));
        assert_eq!(ledger.balance_of(maker, "BBB"), Decimal::new(20, 0));
        assert!(!book.get_order(id).unwrap().is_active());
        assert_eq!(fill.order_id, id);
        assert_eq!(fill.maker, maker);
        assert_eq!(fill.taker, taker);

        let events = book.take_events();
        assert_eq!(events[1].event.kind(), "ORDER_FILLED");
    }

    #[test]
    fn fill_order_twice_fails() {
        let (mut book, mut ledger, maker, taker) = setup();
        let id = post_dummy(&mut book, maker);
        book.fill_order(&mut ledger, id, taker).unwrap();
        let err = book.fill_order(&mut ledger, id, taker).unwrap_err();
        assert!(matches!(err, BookError::OrderNotActive(_)));
    }

    #[test]
    fn fill_canceled_order_fails() {
        let (mut book, mut ledger, maker, taker) = setup();
        let id = post_dummy(&mut book, maker);
        book.cancel_order(id, maker).unwrap();
        let err = book.fill_order(&mut ledger, id, taker).unwrap_err();
        assert!(matches!(err, BookError::OrderNotActive(_)));
    }

    #[test]
    fn fill_unknown_order_fails() {
        let (mut book, mut ledger, _, taker) = setup();
        let err = book.fill_order(&mut ledger, OrderId(9), taker).unwrap_err();
        assert!(matches!(err, BookError::NotFound(_)));
    }

    #[test]
    fn failed_fill_is_all_or_nothing() {
        let (mut book, mut ledger, maker, taker) = setup();
        let id = post_dummy(&mut book, maker);
        // Taker revokes the book's allowance: the second leg must fail and
        // the first leg must roll back with it.
        ledger.approve(taker, book.account(), "BBB", Decimal::ZERO);

        let err = book.fill_order(&mut ledger, id, taker).unwrap_err();
        assert!(matches!(err, BookError::InsufficientAllowance { .. }));

        assert_eq!(ledger.balance_of(maker, "AAA"), Decimal::new(100, 0));
        assert_eq!(ledger.balance_of(taker, "AAA"), Decimal::ZERO);
        assert_eq!(ledger.balance_of(taker, "BBB"), Decimal::new(100, 0));
        // The order survives the failed attempt.
        assert!(book.get_order(id).unwrap().is_active());
        // No fill notification was journaled.
        assert_eq!(book.take_events().len(), 1);
    }

    #[test]
    fn failed_fill_with_poor_maker_keeps_order_active() {
        let (mut book, mut ledger, maker, taker) = setup();
        let id = book.add_order(
            maker,
            "AAA",
            Decimal::new(500, 0), // more than the maker holds
            "BBB",
            Decimal::new(20, 0),
        );
        let err = book.fill_order(&mut ledger, id, taker).unwrap_err();
        assert!(matches!(err, BookError::InsufficientBalance { .. }));
        assert!(book.get_order(id).unwrap().is_active());
        assert_eq!(ledger.balance_of(taker, "BBB"), Decimal::new(100, 0));
    }

    #[test]
    fn take_events_drains_journal() {
        let (mut book, _, maker, _) = setup();
        post_dummy(&mut book, maker);
        assert_eq!(book.events().len(), 1);
        assert_eq!(book.take_events().len(), 1);
        assert!(book.events().is_empty());
    }

    #[test]
    fn trust_registration_reflected_in_queries() {
        let (mut book, ..) = setup();
        let peer = AccountId([0xEE; 32]);
        assert!(!book.is_trusted(peer));
        book.add_trusted_book(peer);
        book.add_trusted_book(peer);
        assert!(book.is_trusted(peer));
    }
}
