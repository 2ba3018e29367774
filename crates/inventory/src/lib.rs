//! Inventory side of the purchase-to-stock flow.
//!
//! Receipts (incoming pickings), the stock moves attached to them and the store
//! through which they are persisted, copied and updated. This is the "host"
//! surface the purchasing crate composes over when it splits deliveries.

pub mod receipt;
pub mod stock_move;
pub mod store;

pub use receipt::{Receipt, ReceiptCopyValues, ReceiptId, ReceiptState};
pub use stock_move::{MoveId, ProductId, StockMove};
pub use store::{InMemoryReceiptStore, ReceiptStore};
