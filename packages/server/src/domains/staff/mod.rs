//! Staff domain - case workers who schedule visits and review requests

pub mod actions;
pub mod models;

pub use actions::{create_staff, NewStaffMember};
pub use models::StaffMember;
