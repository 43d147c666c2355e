//! Append-only order storage for a single book.
//!
//! Orders live in a `Vec` indexed by nonce: the nonce of the next order is
//! always the current length, so `next_nonce` equals the count of orders ever
//! added and ids are never reused. Orders are never removed, only deactivated.

use interbook_types::{AccountId, Asset, BookError, Order, OrderId, Result};
use rust_decimal::Decimal;

/// Per-book order storage. Assigns nonces, never forgets an order.
#[derive(Debug, Default)]
pub struct OrderStore {
    orders: Vec<Order>,
}

impl OrderStore {
    /// Create an empty store. The first assigned nonce will be 0.
    #[must_use]
    pub fn new() -> Self {
        Self { orders: Vec::new() }
    }

    // =================================================================
    // Insertion
    // =================================================================

    /// Store a new active order and return its assigned id.
    pub fn add(
        &mut self,
        maker: AccountId,
        give_asset: impl Into<Asset>,
        give_amount: Decimal,
        want_asset: impl Into<Asset>,
        want_amount: Decimal,
    ) -> OrderId {
        let nonce = self.current_nonce();
        self.orders.push(Order::new(
            maker,
            give_asset,
            give_amount,
            want_asset,
            want_amount,
            nonce,
        ));
        nonce
    }

    // =================================================================
    // Lifecycle
    // =================================================================

    /// Mark an order inactive. The transition is one-way; callers decide
    /// whether an already-inactive order is an error.
    pub fn deactivate(&mut self, order_id: OrderId) -> Result<()> {
        let order = self
            .orders
            .get_mut(usize::try_from(order_id.0).unwrap_or(usize::MAX))
            .ok_or(BookError::NotFound(order_id))?;
        order.active = false;
        Ok(())
    }

    // =================================================================
    // Queries
    // =================================================================

    /// Look up an order by id.
    pub fn get(&self, order_id: OrderId) -> Result<&Order> {
        self.orders
            .get(usize::try_from(order_id.0).unwrap_or(usize::MAX))
            .ok_or(BookError::NotFound(order_id))
    }

    /// The nonce the next added order will receive. Equals the count of
    /// orders ever added.
    #[must_use]
    pub fn current_nonce(&self) -> OrderId {
        OrderId(self.orders.len() as u64)
    }

    /// Number of orders ever added (active and inactive).
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Iterate all orders in nonce order.
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_dummy(store: &mut OrderStore, maker: AccountId) -> OrderId {
        store.add(
            maker,
            "AAA",
            Decimal::new(10, 0),
            "BBB",
            Decimal::new(20, 0),
        )
    }

    #[test]
    fn nonces_are_sequential() {
        let mut store = OrderStore::new();
        let maker = AccountId([1; 32]);
        assert_eq!(store.current_nonce(), OrderId(0));
        assert_eq!(add_dummy(&mut store, maker), OrderId(0));
        assert_eq!(add_dummy(&mut store, maker), OrderId(1));
        assert_eq!(add_dummy(&mut store, maker), OrderId(2));
        assert_eq!(store.current_nonce(), OrderId(3));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn stored_orders_start_active() {
        let mut store = OrderStore::new();
        let id = add_dummy(&mut store, AccountId([1; 32]));
        assert!(store.get(id).unwrap().is_active());
    }

    #[test]
    fn get_unknown_id_fails() {
        let store = OrderStore::new();
        let err = store.get(OrderId(0)).unwrap_err();
        assert!(matches!(err, BookError::NotFound(OrderId(0))));
    }

    #[test]
    fn deactivate_is_sticky() {
        let mut store = OrderStore::new();
        let id = add_dummy(&mut store, AccountId([1; 32]));
        store.deactivate(id).unwrap();
        assert!(!store.get(id).unwrap().is_active());
        // A second deactivation is a no-op at this layer.
        store.deactivate(id).unwrap();
        assert!(!store.get(id).unwrap().is_active());
    }

    #[test]
    fn deactivate_unknown_id_fails() {
        let mut store = OrderStore::new();
        assert!(matches!(
            store.deactivate(OrderId(5)),
            Err(BookError::NotFound(OrderId(5)))
        ));
    }

    #[test]
    fn deactivation_never_shrinks_the_store() {
        let mut store = OrderStore::new();
        let maker = AccountId([1; 32]);
        let a = add_dummy(&mut store, maker);
        store.deactivate(a).unwrap();
        let b = add_dummy(&mut store, maker);
        assert_eq!(b, OrderId(1));
        assert_eq!(store.len(), 2);
        assert_eq!(store.iter().count(), 2);
    }
}
