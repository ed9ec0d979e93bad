//! Server dependencies (using traits for testability)
//!
//! Central dependency container handed to HTTP handlers. External services sit
//! behind trait objects so tests can swap them out.

use sqlx::PgPool;
use std::path::PathBuf;
use std::sync::Arc;

use crate::domains::auth::JwtService;
use crate::kernel::BaseCredentialHasher;

/// Server dependencies accessible to handlers and actions
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub credential_hasher: Arc<dyn BaseCredentialHasher>,
    /// JWT service for token creation
    pub jwt_service: Arc<JwtService>,
    /// Where uploaded parent documents are written
    pub upload_dir: PathBuf,
}

impl ServerDeps {
    pub fn new(
        db_pool: PgPool,
        credential_hasher: Arc<dyn BaseCredentialHasher>,
        jwt_service: Arc<JwtService>,
        upload_dir: PathBuf,
    ) -> Self {
        Self {
            db_pool,
            credential_hasher,
            jwt_service,
            upload_dir,
        }
    }
}
