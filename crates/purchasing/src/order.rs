use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use splitdate_core::{DomainError, DomainResult, Entity, record_id};
use splitdate_inventory::ProductId;

record_id!(
    /// Purchase order identifier.
    PurchaseOrderId
);

record_id!(
    /// Purchase order line identifier.
    LineId
);

/// Purchase order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: LineId,
    pub order_id: PurchaseOrderId,
    pub product_id: ProductId,
    pub quantity: i64,
    /// When the supplier is expected to deliver this line.
    pub date_planned: DateTime<Utc>,
}

impl Entity for OrderLine {
    type Id = LineId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A purchase order and its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    id: PurchaseOrderId,
    name: String,
    supplier: String,
    lines: Vec<OrderLine>,
}

impl PurchaseOrder {
    pub fn new(name: impl Into<String>, supplier: impl Into<String>) -> Self {
        Self {
            id: PurchaseOrderId::generate(),
            name: name.into(),
            supplier: supplier.into(),
            lines: Vec::new(),
        }
    }

    pub fn id_typed(&self) -> PurchaseOrderId {
        self.id
    }

    /// Order reference, e.g. `PO00012`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn supplier(&self) -> &str {
        &self.supplier
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Append a line and return its id.
    pub fn add_line(
        &mut self,
        product_id: ProductId,
        quantity: i64,
        date_planned: DateTime<Utc>,
    ) -> DomainResult<LineId> {
        if quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }

        let id = LineId::generate();
        self.lines.push(OrderLine {
            id,
            order_id: self.id,
            product_id,
            quantity,
            date_planned,
        });
        Ok(id)
    }

    pub fn line(&self, id: LineId) -> Option<&OrderLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    pub(crate) fn ensure_owns(&self, line: &OrderLine) -> DomainResult<()> {
        if line.order_id != self.id {
            return Err(DomainError::invariant(format!(
                "line {} does not belong to purchase order {}",
                line.id, self.name
            )));
        }
        Ok(())
    }
}

impl Entity for PurchaseOrder {
    type Id = PurchaseOrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
