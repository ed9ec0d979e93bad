use sqlx::PgPool;
use tracing::info;

use crate::common::{ChildId, DomainError};
use crate::domains::children::models::{Child, ChildStatus};

/// Move a child through its lifecycle; `adopted` stamps the adoption date
/// unless one was already recorded.
pub async fn set_adoption_status(
    child_id: ChildId,
    status: ChildStatus,
    pool: &PgPool,
) -> Result<Child, DomainError> {
    let child = Child::update_status(child_id, status, pool)
        .await?
        .ok_or(DomainError::NotFound("Child"))?;

    info!(child_id = %child_id, status = ?status, "Adoption status updated");
    Ok(child)
}
