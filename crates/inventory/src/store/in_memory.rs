use std::collections::HashMap;
use std::sync::RwLock;

use splitdate_core::{DomainError, DomainResult};

use super::r#trait::ReceiptStore;
use crate::receipt::{Receipt, ReceiptCopyValues, ReceiptId};
use crate::stock_move::{MoveId, StockMove};

const DEFAULT_SEQUENCE_PREFIX: &str = "WH/IN/";

#[derive(Debug, Default)]
struct Inner {
    receipts: HashMap<ReceiptId, Receipt>,
    insertion_order: Vec<ReceiptId>,
    moves: Vec<StockMove>,
    move_index: HashMap<MoveId, usize>,
    next_sequence: u32,
}

impl Inner {
    fn next_reference(&mut self, prefix: &str) -> String {
        self.next_sequence += 1;
        format!("{prefix}{:05}", self.next_sequence)
    }

    fn store(&mut self, receipt: Receipt) -> ReceiptId {
        let id = receipt.id_typed();
        self.insertion_order.push(id);
        self.receipts.insert(id, receipt);
        id
    }
}

/// In-memory receipt store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug)]
pub struct InMemoryReceiptStore {
    prefix: String,
    inner: RwLock<Inner>,
}

impl Default for InMemoryReceiptStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryReceiptStore {
    pub fn new() -> Self {
        Self::with_sequence_prefix(DEFAULT_SEQUENCE_PREFIX)
    }

    /// Use `prefix` for generated references (`<prefix>00001`, ...).
    pub fn with_sequence_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Number of receipts stored.
    pub fn len(&self) -> DomainResult<usize> {
        let inner = self.inner.read().map_err(|_| Self::poisoned())?;
        Ok(inner.receipts.len())
    }

    pub fn is_empty(&self) -> DomainResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Moves created without a receipt.
    pub fn unassigned_moves(&self) -> DomainResult<Vec<StockMove>> {
        let inner = self.inner.read().map_err(|_| Self::poisoned())?;
        Ok(inner
            .moves
            .iter()
            .filter(|m| m.receipt_id.is_none())
            .cloned()
            .collect())
    }

    fn poisoned() -> DomainError {
        DomainError::invariant("receipt store lock poisoned")
    }
}

impl ReceiptStore for InMemoryReceiptStore {
    fn insert(&self, mut receipt: Receipt) -> DomainResult<ReceiptId> {
        let mut inner = self.inner.write().map_err(|_| Self::poisoned())?;

        if inner.receipts.contains_key(&receipt.id_typed()) {
            return Err(DomainError::conflict(format!(
                "receipt {} already exists",
                receipt.id_typed()
            )));
        }
        if receipt.name().is_empty() {
            let name = inner.next_reference(&self.prefix);
            receipt.set_name(name);
        }

        tracing::debug!(receipt = %receipt.name(), "receipt created");
        Ok(inner.store(receipt))
    }

    fn get(&self, id: ReceiptId) -> DomainResult<Option<Receipt>> {
        let inner = self.inner.read().map_err(|_| Self::poisoned())?;
        Ok(inner.receipts.get(&id).cloned())
    }

    fn list(&self) -> DomainResult<Vec<Receipt>> {
        let inner = self.inner.read().map_err(|_| Self::poisoned())?;
        Ok(inner
            .insertion_order
            .iter()
            .filter_map(|id| inner.receipts.get(id).cloned())
            .collect())
    }

    fn copy(&self, id: ReceiptId, values: ReceiptCopyValues) -> DomainResult<ReceiptId> {
        let mut inner = self.inner.write().map_err(|_| Self::poisoned())?;

        let source = inner
            .receipts
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("receipt {id}")))?;
        let name = inner.next_reference(&self.prefix);
        let copy = source.duplicate(name, values);

        tracing::debug!(
            source = %source.name(),
            copy = %copy.name(),
            date = %copy.date(),
            "receipt copied"
        );
        Ok(inner.store(copy))
    }

    fn modify(
        &self,
        id: ReceiptId,
        f: &mut dyn FnMut(&mut Receipt) -> DomainResult<()>,
    ) -> DomainResult<()> {
        let mut inner = self.inner.write().map_err(|_| Self::poisoned())?;

        let stored = inner
            .receipts
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(format!("receipt {id}")))?;

        // Work on a scratch copy so a failing write leaves the record untouched.
        let mut scratch = stored.clone();
        f(&mut scratch)?;
        *stored = scratch;
        Ok(())
    }

    fn add_move(&self, stock_move: StockMove) -> DomainResult<()> {
        let mut inner = self.inner.write().map_err(|_| Self::poisoned())?;

        if let Some(receipt_id) = stock_move.receipt_id {
            if !inner.receipts.contains_key(&receipt_id) {
                return Err(DomainError::not_found(format!("receipt {receipt_id}")));
            }
        }
        if inner.move_index.contains_key(&stock_move.id) {
            return Err(DomainError::conflict(format!(
                "stock move {} already exists",
                stock_move.id
            )));
        }

        let idx = inner.moves.len();
        inner.move_index.insert(stock_move.id, idx);
        inner.moves.push(stock_move);
        Ok(())
    }

    fn moves(&self, id: ReceiptId) -> DomainResult<Vec<StockMove>> {
        let inner = self.inner.read().map_err(|_| Self::poisoned())?;
        Ok(inner
            .moves
            .iter()
            .filter(|m| m.receipt_id == Some(id))
            .cloned()
            .collect())
    }
}
