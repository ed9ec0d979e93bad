mod create_admin;
mod dashboard;

pub use create_admin::{create_admin, ensure_bootstrap_admin, NewAdmin};
pub use dashboard::{load_admin_dashboard, AdminDashboard};
