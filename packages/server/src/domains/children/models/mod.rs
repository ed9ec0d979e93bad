pub mod child;

pub use child::{ClaimCandidate, Child, ChildStatus, ChildWithParent, Gender};
