use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use splitdate_core::{Entity, RecordId, record_id};

use crate::receipt::ReceiptId;

record_id!(
    /// Stock move identifier.
    MoveId
);

record_id!(
    /// Product identifier.
    ProductId
);

/// A planned movement of goods into stock, created from one purchase line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMove {
    pub id: MoveId,
    pub receipt_id: Option<ReceiptId>,
    pub purchase_line_id: RecordId,
    pub product_id: ProductId,
    pub quantity: i64,
    pub date_expected: DateTime<Utc>,
}

impl Entity for StockMove {
    type Id = MoveId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
