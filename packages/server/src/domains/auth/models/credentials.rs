use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::Role;

/// The login-relevant columns of a parent, staff member or admin row
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct StoredCredentials {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}

impl StoredCredentials {
    /// Find the account for `role` with this exact email.
    ///
    /// Deactivated staff members are treated as unknown.
    pub async fn find(role: Role, email: &str, pool: &PgPool) -> Result<Option<Self>> {
        let query = match role {
            Role::Parent => "SELECT id, email, password_hash FROM parents WHERE email = $1",
            Role::Staff => {
                "SELECT id, email, password_hash FROM staff_members WHERE email = $1 AND active = true"
            }
            Role::Admin => "SELECT id, email, password_hash FROM admins WHERE email = $1",
        };

        sqlx::query_as::<_, Self>(query)
            .bind(email)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }
}
