//! Splitting a purchase delivery into one receipt per group of lines.
//!
//! Lines are sorted by planned date, cut into runs of equal group key, and each
//! run is delivered on its own receipt: the receipt passed in serves the first
//! run and is copied for every later one. Only *consecutive* lines with equal
//! keys share a run; with the default planned-day key the sort makes that a
//! full group-by, but extra dimensions that vary within a day can produce
//! several runs (and receipts) with the same key.

use splitdate_core::{DomainError, DomainResult};
use splitdate_inventory::{Receipt, ReceiptCopyValues, ReceiptId, ReceiptStore, StockMove};

use crate::config::SplitConfig;
use crate::dimension::{GroupingDimension, PlannedDateDimension};
use crate::group_key::GroupKey;
use crate::moves::StockMoveFactory;
use crate::order::{LineId, OrderLine, PurchaseOrder};

/// Lines delivered together and the receipt they went on.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryGroup {
    pub key: GroupKey,
    pub receipt_id: Option<ReceiptId>,
    pub lines: Vec<LineId>,
    pub moves: Vec<StockMove>,
}

/// Splits move creation over one receipt per group key.
pub struct ReceiptSplitter {
    dimensions: Vec<Box<dyn GroupingDimension>>,
}

impl core::fmt::Debug for ReceiptSplitter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReceiptSplitter")
            .field(
                "dimensions",
                &self.dimensions.iter().map(|d| d.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Default for ReceiptSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptSplitter {
    /// Split by planned day (UTC).
    pub fn new() -> Self {
        Self::without_dimensions().with_dimension(PlannedDateDimension::utc())
    }

    /// Split by planned day in the configured offset.
    pub fn from_config(config: &SplitConfig) -> DomainResult<Self> {
        let offset = config.utc_offset()?;
        Ok(Self::without_dimensions().with_dimension(PlannedDateDimension::with_offset(offset)))
    }

    /// A splitter with no dimensions puts every line in one group.
    pub fn without_dimensions() -> Self {
        Self {
            dimensions: Vec::new(),
        }
    }

    /// Register another dimension; its entries follow those already registered.
    pub fn with_dimension(mut self, dimension: impl GroupingDimension + 'static) -> Self {
        self.dimensions.push(Box::new(dimension));
        self
    }

    /// Key of the receipt `line` belongs to.
    pub fn group_key(
        &self,
        order: &PurchaseOrder,
        line: &OrderLine,
        receipt: Option<&Receipt>,
    ) -> DomainResult<GroupKey> {
        let mut key = GroupKey::new();
        for dimension in &self.dimensions {
            key.extend(dimension.key_entries(order, line, receipt)?);
        }
        Ok(key)
    }

    /// Overrides for the copy of the first receipt that will carry `key`.
    pub fn copy_values(&self, key: &GroupKey) -> DomainResult<ReceiptCopyValues> {
        let mut values = ReceiptCopyValues::default();
        for dimension in &self.dimensions {
            dimension.copy_values(key, &mut values)?;
        }
        Ok(values)
    }

    /// Write the fields determined by `key` onto each receipt.
    pub fn update_receipt_from_group_key<S: ReceiptStore + ?Sized>(
        &self,
        store: &S,
        receipts: &[ReceiptId],
        key: &GroupKey,
    ) -> DomainResult<()> {
        for &id in receipts {
            store.modify(id, &mut |receipt| {
                for dimension in &self.dimensions {
                    dimension.update_receipt(key, receipt)?;
                }
                Ok(())
            })?;
        }
        Ok(())
    }

    /// Sort `lines` by planned date and cut them into runs of equal key.
    ///
    /// The sort is stable: lines planned at the same instant keep their input
    /// order.
    pub fn group_lines<'l>(
        &self,
        order: &PurchaseOrder,
        lines: &'l [OrderLine],
        receipt: Option<&Receipt>,
    ) -> DomainResult<Vec<(GroupKey, Vec<&'l OrderLine>)>> {
        let mut sorted: Vec<&OrderLine> = lines.iter().collect();
        sorted.sort_by_key(|l| l.date_planned);

        let mut groups: Vec<(GroupKey, Vec<&OrderLine>)> = Vec::new();
        for line in sorted {
            order.ensure_owns(line)?;
            let key = self.group_key(order, line, receipt)?;
            match groups.last_mut() {
                Some((current, members)) if *current == key => members.push(line),
                _ => groups.push((key, vec![line])),
            }
        }
        Ok(groups)
    }

    /// Create the moves for `lines`, one receipt per group.
    ///
    /// Returns the groups in delivery order with the receipt each one used and
    /// the moves the base factory created for it.
    pub fn split<S, F>(
        &self,
        store: &S,
        base: &F,
        order: &PurchaseOrder,
        lines: &[OrderLine],
        receipt: Option<ReceiptId>,
    ) -> DomainResult<Vec<DeliveryGroup>>
    where
        S: ReceiptStore + ?Sized,
        F: StockMoveFactory + ?Sized,
    {
        let first = match receipt {
            Some(id) => Some(
                store
                    .get(id)?
                    .ok_or_else(|| DomainError::not_found(format!("receipt {id}")))?,
            ),
            None => None,
        };

        let groups = self.group_lines(order, lines, first.as_ref())?;
        if first.is_none() && groups.len() > 1 {
            return Err(DomainError::ReceiptRequired(groups.len()));
        }

        let mut delivered = Vec::with_capacity(groups.len());
        for (idx, (key, members)) in groups.into_iter().enumerate() {
            let target = match receipt {
                Some(first_id) if idx == 0 => {
                    self.update_receipt_from_group_key(store, &[first_id], &key)?;
                    Some(first_id)
                }
                Some(first_id) => {
                    let values = self.copy_values(&key)?;
                    Some(store.copy(first_id, values)?)
                }
                None => None,
            };

            tracing::debug!(
                order = %order.name(),
                key = %key,
                lines = members.len(),
                receipt = ?target,
                "creating moves for delivery group"
            );
            let moves = base.create_stock_moves(&members, target)?;

            delivered.push(DeliveryGroup {
                key,
                receipt_id: target,
                lines: members.iter().map(|l| l.id).collect(),
                moves,
            });
        }

        let copies = match receipt {
            Some(_) => delivered.len().saturating_sub(1),
            None => 0,
        };
        tracing::info!(
            order = %order.name(),
            groups = delivered.len(),
            copies,
            "delivery split"
        );
        Ok(delivered)
    }

    /// Create the moves for `lines`, one receipt per group, and return all moves
    /// in delivery order.
    pub fn create_stock_moves<S, F>(
        &self,
        store: &S,
        base: &F,
        order: &PurchaseOrder,
        lines: &[OrderLine],
        receipt: Option<ReceiptId>,
    ) -> DomainResult<Vec<StockMove>>
    where
        S: ReceiptStore + ?Sized,
        F: StockMoveFactory + ?Sized,
    {
        let groups = self.split(store, base, order, lines, receipt)?;
        Ok(groups.into_iter().flat_map(|g| g.moves).collect())
    }

    /// Create the moves for every line of `order`.
    pub fn create_order_moves<S, F>(
        &self,
        store: &S,
        base: &F,
        order: &PurchaseOrder,
        receipt: Option<ReceiptId>,
    ) -> DomainResult<Vec<StockMove>>
    where
        S: ReceiptStore + ?Sized,
        F: StockMoveFactory + ?Sized,
    {
        self.create_stock_moves(store, base, order, order.lines(), receipt)
    }
}
