//! Children domain actions - business logic functions

mod add_child;
mod claim_child;

pub use add_child::{add_child, NewChild};
pub use claim_child::{claim_child, ClaimError};
