//! Login action - email/password for any role

use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::common::{AuthError, Role};
use crate::domains::auth::models::StoredCredentials;
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub token: String,
    pub account_id: Uuid,
    pub role: Role,
}

/// Verify an email/password pair for `role` and issue a token.
///
/// Unknown email and wrong password produce the same error and both pay for
/// one credential verification, so neither the response nor its timing
/// reveals which accounts exist.
pub async fn login(
    role: Role,
    email: &str,
    password: &str,
    deps: &ServerDeps,
) -> Result<LoginResult, AuthError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::InvalidCredentials);
    }

    let Some(account) = StoredCredentials::find(role, email, &deps.db_pool).await? else {
        debug!(%role, "Login for unknown email");
        deps.credential_hasher.verify_missing(password).await?;
        return Err(AuthError::InvalidCredentials);
    };

    let matches = deps
        .credential_hasher
        .verify(password, &account.password_hash)
        .await?;
    if !matches {
        debug!(%role, account_id = %account.id, "Login with wrong password");
        return Err(AuthError::InvalidCredentials);
    }

    let token = deps
        .jwt_service
        .create_token(account.id, role, account.email.clone())?;

    info!(%role, account_id = %account.id, "Login succeeded");

    Ok(LoginResult {
        token,
        account_id: account.id,
        role,
    })
}
