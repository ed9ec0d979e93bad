pub mod parent;

pub use parent::{HouseholdAttributes, NewParent, Parent, ParentSummary};
