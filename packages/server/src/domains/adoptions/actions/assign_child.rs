use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;

use crate::common::{is_foreign_key_violation, ChildId, DomainError, ParentId};
use crate::domains::children::models::Child;
use crate::domains::parents::models::Parent;

#[derive(Debug, Clone, Deserialize)]
pub struct AssignChild {
    pub child_id: ChildId,
    pub parent_id: ParentId,
}

/// Link a child to a parent and move it to `pending`
pub async fn assign_child(input: AssignChild, pool: &PgPool) -> Result<Child, DomainError> {
    Parent::find_by_id(input.parent_id, pool)
        .await?
        .ok_or(DomainError::NotFound("Parent"))?;

    let child = Child::assign_to_parent(input.child_id, input.parent_id, pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                DomainError::NotFound("Parent")
            } else {
                e.into()
            }
        })?
        .ok_or(DomainError::NotFound("Child"))?;

    info!(child_id = %child.id, parent_id = %input.parent_id, "Child assigned to parent");
    Ok(child)
}
