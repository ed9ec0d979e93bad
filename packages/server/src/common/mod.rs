// Common types and utilities shared across the application

pub mod auth;
pub mod entity_ids;
pub mod errors;
pub mod id;

pub use auth::{Actor, AuthError, Capability, Role};
pub use entity_ids::*;
pub use errors::{is_foreign_key_violation, is_unique_violation, DomainError};
pub use id::Id;
