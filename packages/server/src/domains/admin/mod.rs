//! Admin domain - administrator accounts and the system overview

pub mod actions;
pub mod models;

pub use actions::{
    create_admin, ensure_bootstrap_admin, load_admin_dashboard, AdminDashboard, NewAdmin,
};
pub use models::Admin;
