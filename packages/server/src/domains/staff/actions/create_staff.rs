use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;

use crate::common::{is_unique_violation, DomainError};
use crate::domains::staff::models::staff_member::{
    StaffMember, DEFAULT_DEPARTMENT, DEFAULT_ROLE_TITLE,
};
use crate::kernel::BaseCredentialHasher;

#[derive(Debug, Clone, Deserialize)]
pub struct NewStaffMember {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub role_title: Option<String>,
    pub department: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub async fn create_staff(
    input: NewStaffMember,
    hasher: &dyn BaseCredentialHasher,
    pool: &PgPool,
) -> Result<StaffMember, DomainError> {
    let name = input.name.trim();
    let email = input.email.trim();
    if name.is_empty() || email.is_empty() || input.password.is_empty() {
        return Err(DomainError::invalid("Name, email and password are required"));
    }

    if StaffMember::email_exists(email, pool).await? {
        return Err(DomainError::Conflict(
            "Staff member with this email already exists".to_string(),
        ));
    }

    let password_hash = hasher.hash(&input.password).await?;
    let staff = StaffMember::insert(
        name,
        email,
        &password_hash,
        non_blank(input.phone.as_deref()),
        non_blank(input.role_title.as_deref()).unwrap_or(DEFAULT_ROLE_TITLE),
        non_blank(input.department.as_deref()).unwrap_or(DEFAULT_DEPARTMENT),
        pool,
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            DomainError::Conflict("Staff member with this email already exists".to_string())
        } else {
            e.into()
        }
    })?;

    info!(staff_id = %staff.id, "Staff member created");
    Ok(staff)
}
