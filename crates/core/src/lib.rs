//! `innkeep-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the error model, typed identifiers, integer money arithmetic, business
//! identifier generation and the JSON response envelope shape.

pub mod business_id;
pub mod envelope;
pub mod error;
pub mod id;
pub mod money;

pub use business_id::{BusinessId, RecordKind};
pub use envelope::Envelope;
pub use error::{DomainError, DomainResult};
pub use id::{TenantId, UserId};
pub use money::{Currency, Money, RateBps};
