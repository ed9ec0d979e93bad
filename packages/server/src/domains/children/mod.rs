//! Children domain - child records and the claim step of registration
//!
//! A child with no parent reference is "unclaimed". Registration claims a child
//! by its caring identifier; admins manage the records themselves.

pub mod actions;
pub mod models;

pub use actions::{add_child, claim_child, ClaimError, NewChild};
pub use models::{Child, ChildStatus, ChildWithParent, Gender};
