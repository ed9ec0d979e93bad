//! Adoptions domain - staff-driven assignment of children to parents
//!
//! Works on the `children` table; unlike the registration claim, assignment
//! may overwrite an existing parent reference.

pub mod actions;

pub use actions::{assign_child, set_adoption_status, AssignChild};
