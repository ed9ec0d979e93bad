//! Add child action - admin data entry

use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;

use crate::common::{is_foreign_key_violation, ChildId, DomainError, ParentId};
use crate::domains::children::models::{Child, ChildStatus, Gender};

const DEFAULT_PHOTO: &str = "noimage.jpg";

#[derive(Debug, Clone, Deserialize)]
pub struct NewChild {
    pub name: String,
    pub parent_id: Option<ParentId>,
    pub caring_id: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub background: Option<String>,
    pub photo: Option<String>,
    pub placement_date: Option<NaiveDate>,
    pub adoption_date: Option<NaiveDate>,
    pub status: Option<ChildStatus>,
}

/// Insert a child record. Blank caring identifiers are stored as NULL so they
/// can never be matched at registration.
pub async fn add_child(input: NewChild, pool: &PgPool) -> Result<Child, DomainError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(DomainError::invalid("Child name is required"));
    }

    let gender = match input.gender.as_deref().filter(|g| !g.trim().is_empty()) {
        Some(raw) => Some(
            Gender::parse_loose(raw)
                .ok_or_else(|| DomainError::invalid(format!("Unknown gender: {}", raw)))?,
        ),
        None => None,
    };
    let caring_id = input
        .caring_id
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());
    let photo = input
        .photo
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PHOTO.to_string());

    let child = sqlx::query_as::<_, Child>(
        "INSERT INTO children (
            id, parent_id, caring_id, name, date_of_birth, gender, background,
            photo, placement_date, adoption_date, status
         )
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
         RETURNING *",
    )
    .bind(ChildId::new())
    .bind(input.parent_id)
    .bind(&caring_id)
    .bind(name)
    .bind(input.date_of_birth)
    .bind(gender)
    .bind(&input.background)
    .bind(&photo)
    .bind(input.placement_date)
    .bind(input.adoption_date)
    .bind(input.status.unwrap_or_default())
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_foreign_key_violation(&e) {
            DomainError::NotFound("Parent")
        } else {
            e.into()
        }
    })?;

    info!(child_id = %child.id, caring_id = ?child.caring_id, "Child added");
    Ok(child)
}
