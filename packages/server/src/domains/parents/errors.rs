use thiserror::Error;

use crate::domains::children::ClaimError;

/// Why a registration did not persist. In every case nothing was written.
#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("Invalid registration: {0}")]
    InvalidRequest(String),

    #[error("Email already registered")]
    DuplicateIdentity,

    #[error("Invalid Caring ID: no child found")]
    InvalidCaringIdentifier,

    #[error("This child is already adopted")]
    ChildAlreadyAdopted,

    /// Several children share the caring identifier; never resolved by guessing
    #[error("Caring ID is ambiguous ({matches} children share it)")]
    DataIntegrityError { matches: usize },

    /// The store could not be reached or aborted the transaction. Safe to retry.
    #[error("Storage temporarily unavailable")]
    StorageUnavailable(#[source] sqlx::Error),

    /// The store rejected the write; retrying the same request fails again
    #[error("Registration could not be stored")]
    StorageRejected(#[source] sqlx::Error),

    #[error("Credential hashing failed")]
    Credential(#[source] anyhow::Error),
}

impl RegistrationError {
    /// Classify a storage failure by whether resubmitting can help
    pub fn storage(e: sqlx::Error) -> Self {
        if is_transient_storage_error(&e) {
            Self::StorageUnavailable(e)
        } else {
            Self::StorageRejected(e)
        }
    }

    /// True when the caller can fix the request and resubmit
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest(_)
                | Self::DuplicateIdentity
                | Self::InvalidCaringIdentifier
                | Self::ChildAlreadyAdopted
        )
    }

    /// True when resubmitting the identical request may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }
}

impl From<ClaimError> for RegistrationError {
    fn from(e: ClaimError) -> Self {
        match e {
            ClaimError::ChildNotFound => Self::InvalidCaringIdentifier,
            ClaimError::ChildAlreadyClaimed(_) => Self::ChildAlreadyAdopted,
            ClaimError::DataIntegrity { matches } => Self::DataIntegrityError { matches },
            ClaimError::Storage(e) => Self::storage(e),
        }
    }
}

/// Connection, pool and I/O failures, plus the SQLSTATEs Postgres uses for
/// connection loss (class 08), serialization failure, deadlock and shutdown
fn is_transient_storage_error(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => true,
        sqlx::Error::Database(db) => db.code().is_some_and(|code| {
            code.starts_with("08")
                || matches!(&*code, "40001" | "40P01" | "57P01" | "57P03")
        }),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ChildId;

    #[test]
    fn test_claim_errors_map_to_registration_errors() {
        assert!(matches!(
            RegistrationError::from(ClaimError::ChildNotFound),
            RegistrationError::InvalidCaringIdentifier
        ));
        assert!(matches!(
            RegistrationError::from(ClaimError::ChildAlreadyClaimed(ChildId::new())),
            RegistrationError::ChildAlreadyAdopted
        ));
        assert!(matches!(
            RegistrationError::from(ClaimError::DataIntegrity { matches: 2 }),
            RegistrationError::DataIntegrityError { matches: 2 }
        ));
        assert!(matches!(
            RegistrationError::from(ClaimError::Storage(sqlx::Error::PoolTimedOut)),
            RegistrationError::StorageUnavailable(_)
        ));
    }

    #[test]
    fn test_user_correctable_vs_system() {
        assert!(RegistrationError::DuplicateIdentity.is_user_correctable());
        assert!(RegistrationError::ChildAlreadyAdopted.is_user_correctable());
        assert!(!RegistrationError::DataIntegrityError { matches: 3 }.is_user_correctable());

        let storage = RegistrationError::storage(sqlx::Error::PoolTimedOut);
        assert!(!storage.is_user_correctable());
        assert!(storage.is_transient());
    }

    #[test]
    fn test_deterministic_storage_errors_are_not_transient() {
        let rejected = RegistrationError::storage(sqlx::Error::ColumnNotFound("id".into()));
        assert!(matches!(rejected, RegistrationError::StorageRejected(_)));
        assert!(!rejected.is_transient());
        assert!(!rejected.is_user_correctable());

        let closed = RegistrationError::storage(sqlx::Error::PoolClosed);
        assert!(matches!(closed, RegistrationError::StorageUnavailable(_)));
        assert!(matches!(
            RegistrationError::from(ClaimError::Storage(sqlx::Error::RowNotFound)),
            RegistrationError::StorageRejected(_)
        ));
    }

    #[test]
    fn test_storage_message_hides_driver_detail() {
        let err = RegistrationError::storage(sqlx::Error::Protocol("secret detail".into()));
        assert!(!err.to_string().contains("secret detail"));
    }
}
