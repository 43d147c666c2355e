//! Cross-book settlement: the escrow/commit/compensate protocol.
//!
//! The *initiating* book settles an order held by a *trusted remote* book on
//! behalf of a local taker. The flow is a saga with one compensating action:
//!
//! ```text
//! 1. trust gate        is_trusted(remote)?           else BookNotTrusted
//! 2. escrow            taker ──want──▶ custody       else EscrowFailed
//! 3. candidate         emit RemoteOrderFillCandidate
//! 4. remote commit     remote book moves give leg maker ──▶ taker,
//!                      deactivates its order, emits its OrderFilled
//! 5a. confirmed        custody ──want──▶ remote maker,
//!                      emit RemoteOrderFillConfirmed
//! 5b. canceled         custody ──want──▶ taker (full refund),
//!                      emit RemoteOrderFillCanceled
//! ```
//!
//! Any commit failure (order inactive, untrusting remote, maker
//! unauthorized or underfunded) routes to 5b uniformly. The caller never
//! learns why; a canceled outcome is a successful protocol run. After step 2
//! the protocol always resolves to exactly one of 5a/5b: escrowed funds are
//! never left in custody.

use interbook_ledger::AssetLedger;
use interbook_types::{
    AccountId, BookError, BookEvent, CandidateFill, Fill, OrderId, RemoteFillOutcome, Result,
};

use crate::book::Book;

impl Book {
    /// Fill `order_id` on `remote` for `taker`, escrowing the taker's side
    /// locally and resolving to confirmation or compensation.
    ///
    /// # Errors
    /// `BookNotTrusted` before anything moves, `NotFound` for an unknown
    /// remote id, `EscrowFailed` when the taker's funds cannot be pulled.
    /// A failed remote commit is *not* an error: it resolves to
    /// [`RemoteFillOutcome::Canceled`] with the escrow refunded.
    pub fn fill_order_on_book<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        remote: &mut Book,
        order_id: OrderId,
        taker: AccountId,
    ) -> Result<RemoteFillOutcome> {
        let remote_book = remote.account();
        if !self.is_trusted(remote_book) {
            return Err(BookError::BookNotTrusted(remote_book));
        }

        // An inactive remote order is still readable here; its state is
        // checked by the remote commit, which routes it to the refund branch.
        let order = remote.get_order(order_id)?.clone();

        ledger
            .transfer(
                self.account(),
                taker,
                self.account(),
                &order.want_asset,
                order.want_amount,
            )
            .map_err(|_| BookError::EscrowFailed {
                asset: order.want_asset.clone(),
                amount: order.want_amount,
            })?;

        let mut candidate = CandidateFill::new(
            remote_book,
            order_id,
            taker,
            order.want_asset.clone(),
            order.want_amount,
        );
        self.emit(BookEvent::RemoteOrderFillCandidate {
            remote_book,
            order_id,
        });

        match remote.commit_peer_fill(ledger, self.account(), order_id, taker) {
            Ok(fill) => {
                self.release_escrow(ledger, &candidate, order.maker)?;
                candidate.mark_confirmed()?;
                self.emit(BookEvent::RemoteOrderFillConfirmed {
                    remote_book,
                    order_id,
                });
                tracing::info!(
                    book = %self.account(),
                    remote_book = %remote_book,
                    order = %order_id,
                    taker = %taker,
                    outcome = %candidate.state,
                    "Cross-book fill resolved"
                );
                Ok(RemoteFillOutcome::Confirmed(fill))
            }
            Err(_) => {
                self.release_escrow(ledger, &candidate, taker)?;
                candidate.mark_canceled()?;
                self.emit(BookEvent::RemoteOrderFillCanceled {
                    remote_book,
                    order_id,
                });
                tracing::info!(
                    book = %self.account(),
                    remote_book = %remote_book,
                    order = %order_id,
                    taker = %taker,
                    outcome = %candidate.state,
                    "Cross-book fill resolved"
                );
                Ok(RemoteFillOutcome::Canceled(candidate))
            }
        }
    }

    /// Commit entrypoint invoked by a peer book holding escrow.
    ///
    /// Executes only the give leg (this book's maker to the origin taker) and
    /// deactivates the order; the want leg arrives as the caller's escrow
    /// forward after this returns. Trust is re-checked against the *calling*
    /// book, so one-way registrations cannot settle.
    ///
    /// # Errors
    /// `BookNotTrusted`, `NotFound`, `OrderNotActive`, or the give leg's
    /// ledger error. On error no state of this book has changed.
    pub fn commit_peer_fill<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        calling_book: AccountId,
        order_id: OrderId,
        taker: AccountId,
    ) -> Result<Fill> {
        if !self.is_trusted(calling_book) {
            return Err(BookError::BookNotTrusted(calling_book));
        }
        let order = self.store.get(order_id)?.clone();
        if !order.active {
            return Err(BookError::OrderNotActive(order_id));
        }

        ledger.transfer(
            self.account(),
            order.maker,
            taker,
            &order.give_asset,
            order.give_amount,
        )?;
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
            book = %self.account(),
            calling_book = %calling_book,
            fill_id = %fill.id,
            order = %order_id,
            "Peer fill committed"
        );
        Ok(fill)
    }

    /// Move the escrowed amount out of custody to `to`.
    ///
    /// Between escrow and resolution custody holds exactly this amount, so a
    /// conforming ledger cannot refuse; a refusal means custody accounting
    /// is broken and surfaces as `CustodyViolation`.
    fn release_escrow<L: AssetLedger>(
        &self,
        ledger: &mut L,
        candidate: &CandidateFill,
        to: AccountId,
    ) -> Result<()> {
        if let Err(err) = ledger.transfer(
            self.account(),
            self.account(),
            to,
            &candidate.escrow_asset,
            candidate.escrow_amount,
        ) {
            tracing::warn!(
                book = %self.account(),
                to = %to,
                asset = %candidate.escrow_asset,
                amount = %candidate.escrow_amount,
                cause = %err,
                "Ledger refused escrow release"
            );
            return Err(BookError::CustodyViolation {
                asset: candidate.escrow_asset.clone(),
                amount: candidate.escrow_amount,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use interbook_ledger::TokenLedger;
    use interbook_types::BookConfig;
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn untrusted_remote_is_rejected_before_anything_moves() {
        let mut local = Book::new(BookConfig::dummy(1));
        let mut remote = Book::new(BookConfig::dummy(2));
        let mut ledger = TokenLedger::new();
        let taker = AccountId([0x02; 32]);

        let err = local
            .fill_order_on_book(&mut ledger, &mut remote, OrderId(0), taker)
            .unwrap_err();
        assert!(matches!(err, BookError::BookNotTrusted(_)));
        assert!(local.events().is_empty());
    }

    #[test]
    fn trust_gate_wins_over_missing_order() {
        // The order does not exist either, but trust is checked first.
        let mut local = Book::new(BookConfig::dummy(1));
        let mut remote = Book::new(BookConfig::dummy(2));
        let mut ledger = TokenLedger::new();

        let err = local
            .fill_order_on_book(&mut ledger, &mut remote, OrderId(7), AccountId([0x02; 32]))
            .unwrap_err();
        assert!(matches!(err, BookError::BookNotTrusted(_)));
    }

    #[test]
    fn unknown_remote_order_fails_before_escrow() {
        let mut local = Book::new(BookConfig::dummy(1));
        let mut remote = Book::new(BookConfig::dummy(2));
        let mut ledger = TokenLedger::new();
        let taker = AccountId([0x02; 32]);
        ledger.mint(taker, "BBB", Decimal::new(50, 0));
        local.add_trusted_book(remote.account());

        let err = local
            .fill_order_on_book(&mut ledger, &mut remote, OrderId(0), taker)
            .unwrap_err();
        assert!(matches!(err, BookError::NotFound(_)));
        assert_eq!(ledger.balance_of(taker, "BBB"), Decimal::new(50, 0));
        assert!(local.events().is_empty());
    }

    #[test]
    fn commit_entrypoint_requires_trusting_the_caller() {
        let mut remote = Book::new(BookConfig::dummy(2));
        let mut ledger = TokenLedger::new();
        let caller = AccountId([0xA1; 32]);

        let err = remote
            .commit_peer_fill(&mut ledger, caller, OrderId(0), AccountId([0x02; 32]))
            .unwrap_err();
        assert!(matches!(err, BookError::BookNotTrusted(_)));
    }

    #[test]
    fn escrow_failure_aborts_with_no_candidate() {
        let mut local = Book::new(BookConfig::dummy(1));
        let mut remote = Book::new(BookConfig::dummy(2));
        let mut ledger = TokenLedger::new();
        let maker = AccountId([0x01; 32]);
        let taker = AccountId([0x02; 32]);
        local.add_trusted_book(remote.account());
        remote.add_trusted_book(local.account());
        remote.add_order(
            maker,
            "AAA",
            Decimal::new(10, 0),
            "BBB",
            Decimal::new(20, 0),
        );
        // Taker holds BBB but never approved the local book.
        ledger.mint(taker, "BBB", Decimal::new(50, 0));

        let err = local
            .fill_order_on_book(&mut ledger, &mut remote, OrderId(0), taker)
            .unwrap_err();
        assert!(matches!(err, BookError::EscrowFailed { .. }));
        assert_eq!(ledger.balance_of(taker, "BBB"), Decimal::new(50, 0));
        assert!(local.events().is_empty());
        assert!(remote.get_order(OrderId(0)).unwrap().is_active());
    }
}
