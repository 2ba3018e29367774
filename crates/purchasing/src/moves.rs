//! Base stock move creation.
//!
//! The splitter never builds moves itself: it hands each group of lines to a
//! [`StockMoveFactory`]. [`ReceiptMoveFactory`] is the stock implementation; tests
//! and callers with their own move pipeline can pass a closure instead.

use splitdate_core::{DomainError, DomainResult};
use splitdate_inventory::{MoveId, ReceiptId, ReceiptStore, StockMove};

use crate::order::OrderLine;

/// Creates the stock moves for a set of order lines on one receipt.
pub trait StockMoveFactory {
    fn create_stock_moves(
        &self,
        lines: &[&OrderLine],
        receipt: Option<ReceiptId>,
    ) -> DomainResult<Vec<StockMove>>;
}

impl<F> StockMoveFactory for F
where
    F: Fn(&[&OrderLine], Option<ReceiptId>) -> DomainResult<Vec<StockMove>>,
{
    fn create_stock_moves(
        &self,
        lines: &[&OrderLine],
        receipt: Option<ReceiptId>,
    ) -> DomainResult<Vec<StockMove>> {
        self(lines, receipt)
    }
}

/// One move per line, persisted in a [`ReceiptStore`].
#[derive(Debug)]
pub struct ReceiptMoveFactory<'s, S: ReceiptStore + ?Sized> {
    store: &'s S,
}

impl<'s, S: ReceiptStore + ?Sized> ReceiptMoveFactory<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }
}

impl<S: ReceiptStore + ?Sized> StockMoveFactory for ReceiptMoveFactory<'_, S> {
    fn create_stock_moves(
        &self,
        lines: &[&OrderLine],
        receipt: Option<ReceiptId>,
    ) -> DomainResult<Vec<StockMove>> {
        let mut moves = Vec::with_capacity(lines.len());
        for line in lines {
            if line.quantity <= 0 {
                return Err(DomainError::validation(format!(
                    "line {} has non-positive quantity {}",
                    line.id, line.quantity
                )));
            }

            let stock_move = StockMove {
                id: MoveId::generate(),
                receipt_id: receipt,
                purchase_line_id: line.id.0,
                product_id: line.product_id,
                quantity: line.quantity,
                date_expected: line.date_planned,
            };
            self.store.add_move(stock_move.clone())?;
            moves.push(stock_move);
        }
        Ok(moves)
    }
}
