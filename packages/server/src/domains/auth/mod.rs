//! Auth domain - email/password login and JWT issuance
//!
//! Parents, staff and admins each live in their own table; login picks the
//! table by role, verifies the credential through the injected hasher and
//! issues a role-scoped token.

pub mod actions;
pub mod jwt;
pub mod models;

pub use actions::{login, LoginResult};
pub use jwt::{Claims, JwtService};
pub use models::StoredCredentials;
