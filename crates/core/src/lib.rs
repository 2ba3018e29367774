//! `splitdate-core` — shared domain building blocks.
//!
//! Identifiers, the domain error model and the entity/value-object markers used
//! by the purchasing and inventory crates. No infrastructure concerns live here.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::RecordId;
pub use value_object::ValueObject;
