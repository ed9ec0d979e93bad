//! Parents domain actions - business logic functions

mod dashboard;
mod register_parent;
mod update_profile;

pub use dashboard::{load_dashboard, DashboardStats, ParentDashboard};
pub use register_parent::{register_parent, RegistrationOutcome, RegistrationRequest};
pub use update_profile::update_profile;
