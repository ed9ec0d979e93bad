//! Parents domain - registration (with optional child claim), profile, dashboard
//!
//! Registration is the one multi-step write in the system: the parent insert
//! and the child claim commit together or not at all. See
//! `actions::register_parent`.

pub mod actions;
pub mod errors;
pub mod models;

pub use actions::{
    load_dashboard, register_parent, update_profile, DashboardStats, ParentDashboard,
    RegistrationOutcome, RegistrationRequest,
};
pub use errors::RegistrationError;
pub use models::{HouseholdAttributes, Parent, ParentSummary};
