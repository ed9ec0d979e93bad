//! Register parent action - atomic parent creation with optional child claim
//!
//! Protocol, all on one transaction:
//! 1. Uniqueness guard on the email
//! 2. Hash the credential and insert the parent
//! 3. If a caring identifier was given, claim that child for the new parent
//! 4. Commit; any failure rolls back everything, including the parent row

use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use tracing::{debug, error, info, warn};

use crate::common::{is_unique_violation, ChildId, ParentId};
use crate::domains::children::claim_child;
use crate::domains::parents::errors::RegistrationError;
use crate::domains::parents::models::{HouseholdAttributes, NewParent, Parent};
use crate::kernel::BaseCredentialHasher;

/// Registration input as submitted by the sign-up form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub contact: Option<String>,
    #[serde(flatten)]
    pub household: HouseholdAttributes,
    pub caring_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegistrationOutcome {
    pub parent_id: ParentId,
    /// Set when a caring identifier was supplied and the child was claimed
    pub child_id: Option<ChildId>,
}

/// A request that passed input checks; fields are trimmed and blanks dropped
#[derive(Debug)]
struct ValidatedRegistration {
    email: String,
    password: String,
    name: Option<String>,
    contact: Option<String>,
    household: HouseholdAttributes,
    caring_id: Option<String>,
}

impl RegistrationRequest {
    fn validate(self) -> Result<ValidatedRegistration, RegistrationError> {
        let email = self.email.trim().to_string();
        if email.is_empty() {
            return Err(RegistrationError::InvalidRequest("email is required".into()));
        }
        if !email.contains('@') {
            return Err(RegistrationError::InvalidRequest(
                "email is not a valid address".into(),
            ));
        }
        if self.password.is_empty() {
            return Err(RegistrationError::InvalidRequest(
                "password is required".into(),
            ));
        }
        self.household
            .check()
            .map_err(|reason| RegistrationError::InvalidRequest(reason.into()))?;

        let non_blank = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Ok(ValidatedRegistration {
            email,
            password: self.password,
            name: non_blank(self.name),
            contact: non_blank(self.contact),
            household: self.household.normalized(),
            caring_id: non_blank(self.caring_id),
        })
    }
}

/// Register a parent and, if a caring identifier is supplied, claim that child.
///
/// Either the parent row and the child link both persist, or nothing does.
/// The storage session is acquired here and released on every path.
pub async fn register_parent(
    request: RegistrationRequest,
    hasher: &dyn BaseCredentialHasher,
    pool: &PgPool,
) -> Result<RegistrationOutcome, RegistrationError> {
    let request = request.validate()?;

    info!(
        email = %request.email,
        with_caring_id = request.caring_id.is_some(),
        "Registering parent"
    );

    let mut tx = pool.begin().await.map_err(RegistrationError::storage)?;

    let result = write_registration(&request, hasher, &mut tx).await;

    match result {
        Ok(outcome) => {
            tx.commit().await.map_err(RegistrationError::storage)?;
            info!(
                parent_id = %outcome.parent_id,
                child_id = ?outcome.child_id,
                "Parent registered"
            );
            Ok(outcome)
        }
        Err(e) => {
            if let Err(rollback_error) = tx.rollback().await {
                // The connection is discarded, which aborts the transaction server-side
                warn!(error = %rollback_error, "Rollback failed after registration error");
            }
            if e.is_user_correctable() {
                info!(email = %request.email, reason = %e, "Registration rejected");
            } else {
                error!(email = %request.email, error = ?e, "Registration failed");
            }
            Err(e)
        }
    }
}

async fn write_registration(
    request: &ValidatedRegistration,
    hasher: &dyn BaseCredentialHasher,
    conn: &mut PgConnection,
) -> Result<RegistrationOutcome, RegistrationError> {
    // Early exit only: the UNIQUE constraint below is what actually decides
    if Parent::email_exists(&request.email, conn)
        .await
        .map_err(RegistrationError::storage)?
    {
        return Err(RegistrationError::DuplicateIdentity);
    }

    let password_hash = hasher
        .hash(&request.password)
        .await
        .map_err(RegistrationError::Credential)?;

    let new_parent = NewParent {
        name: request.name.as_deref(),
        email: &request.email,
        password_hash: &password_hash,
        contact: request.contact.as_deref(),
        household: &request.household,
    };
    let parent = Parent::insert(&new_parent, conn).await.map_err(|e| {
        if is_unique_violation(&e) {
            RegistrationError::DuplicateIdentity
        } else {
            RegistrationError::storage(e)
        }
    })?;
    debug!(parent_id = %parent.id, "Parent row inserted");

    let child_id = match request.caring_id.as_deref() {
        Some(caring_id) => Some(claim_child(caring_id, parent.id, conn).await?),
        None => None,
    };

    Ok(RegistrationOutcome {
        parent_id: parent.id,
        child_id,
    })
}
