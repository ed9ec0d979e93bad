use sqlx::PgPool;
use tracing::info;

use crate::common::{DomainError, ParentId};
use crate::domains::parents::models::{HouseholdAttributes, Parent};

/// Replace the household attributes on a parent's profile
pub async fn update_profile(
    parent_id: ParentId,
    household: HouseholdAttributes,
    pool: &PgPool,
) -> Result<Parent, DomainError> {
    let household = household.normalized();
    household.check().map_err(DomainError::invalid)?;

    let parent = Parent::update_household(parent_id, &household, pool)
        .await?
        .ok_or(DomainError::NotFound("Parent"))?;

    info!(parent_id = %parent_id, "Parent profile updated");
    Ok(parent)
}
