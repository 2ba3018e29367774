//! Purchasing domain module: purchase orders and delivery splitting.
//!
//! When goods are requested on several planned dates, the receipt created for a
//! purchase order is split so each planned day gets its own receipt. The split
//! composes over host services from `splitdate-inventory` (receipt store) and an
//! injected base move factory.

pub mod config;
pub mod dimension;
pub mod group_key;
pub mod moves;
pub mod order;
pub mod split;

pub use config::SplitConfig;
pub use dimension::{DATE_PLANNED, GroupingDimension, PlannedDateDimension};
pub use group_key::{GroupKey, GroupKeyEntry};
pub use moves::{ReceiptMoveFactory, StockMoveFactory};
pub use order::{LineId, OrderLine, PurchaseOrder, PurchaseOrderId};
pub use split::{DeliveryGroup, ReceiptSplitter};
