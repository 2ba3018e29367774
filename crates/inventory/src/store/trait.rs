use splitdate_core::DomainResult;

use crate::receipt::{Receipt, ReceiptCopyValues, ReceiptId};
use crate::stock_move::StockMove;

/// Persistence operations on receipts and their moves.
///
/// Methods take `&self`: one store is shared by the splitting logic and the base
/// move factory within a single request.
pub trait ReceiptStore {
    /// Persist a new receipt. A receipt with an empty name gets the next
    /// reference from the store's sequence.
    fn insert(&self, receipt: Receipt) -> DomainResult<ReceiptId>;

    fn get(&self, id: ReceiptId) -> DomainResult<Option<Receipt>>;

    /// All receipts in insertion order.
    fn list(&self) -> DomainResult<Vec<Receipt>>;

    /// Duplicate a receipt with the given overrides and return the new id.
    ///
    /// The copy gets a fresh reference, starts in draft and has no moves.
    fn copy(&self, id: ReceiptId, values: ReceiptCopyValues) -> DomainResult<ReceiptId>;

    /// Apply an in-place write to a stored receipt. Nothing is written when `f`
    /// fails.
    fn modify(
        &self,
        id: ReceiptId,
        f: &mut dyn FnMut(&mut Receipt) -> DomainResult<()>,
    ) -> DomainResult<()>;

    /// Persist a move. The referenced receipt, if any, must exist.
    fn add_move(&self, stock_move: StockMove) -> DomainResult<()>;

    /// Moves attached to a receipt, in creation order.
    fn moves(&self, id: ReceiptId) -> DomainResult<Vec<StockMove>>;
}
