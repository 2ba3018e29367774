//! Receipt persistence.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryReceiptStore;
pub use r#trait::ReceiptStore;
