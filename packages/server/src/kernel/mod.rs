//! Kernel module - server infrastructure and dependencies.

pub mod credentials;
pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use credentials::Argon2CredentialHasher;
pub use deps::ServerDeps;
pub use test_dependencies::PlaintextCredentialHasher;
pub use traits::*;
