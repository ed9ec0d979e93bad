use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;

use crate::common::{is_unique_violation, DomainError};
use crate::domains::admin::models::Admin;
use crate::kernel::BaseCredentialHasher;

#[derive(Debug, Clone, Deserialize)]
pub struct NewAdmin {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub async fn create_admin(
    input: NewAdmin,
    hasher: &dyn BaseCredentialHasher,
    pool: &PgPool,
) -> Result<Admin, DomainError> {
    let username = input.username.trim();
    let email = input.email.trim();
    if username.is_empty() || email.is_empty() || input.password.is_empty() {
        return Err(DomainError::invalid(
            "Username, email and password are required",
        ));
    }

    if Admin::find_by_email(email, pool).await?.is_some() {
        return Err(DomainError::Conflict(
            "Admin with this email already exists".to_string(),
        ));
    }

    let password_hash = hasher.hash(&input.password).await?;
    let admin = Admin::insert(username, email, &password_hash, pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Conflict("Admin with this email already exists".to_string())
            } else {
                e.into()
            }
        })?;

    info!(admin_id = %admin.id, "Admin created");
    Ok(admin)
}

/// Create the configured first administrator unless an admin with that email
/// already exists. Returns true when an account was created.
pub async fn ensure_bootstrap_admin(
    email: &str,
    password: &str,
    hasher: &dyn BaseCredentialHasher,
    pool: &PgPool,
) -> Result<bool, DomainError> {
    if Admin::find_by_email(email, pool).await?.is_some() {
        return Ok(false);
    }

    let username = email.split('@').next().unwrap_or(email);
    let input = NewAdmin {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    };

    match create_admin(input, hasher, pool).await {
        Ok(_) => Ok(true),
        // Another instance created it between the check and the insert
        Err(DomainError::Conflict(_)) => Ok(false),
        Err(e) => Err(e),
    }
}
