//! Claim a child for a freshly inserted parent, by caring identifier.
//!
//! Runs on the registration transaction's connection; the caller owns commit
//! and rollback.

use sqlx::PgConnection;
use thiserror::Error;
use tracing::{debug, error};

use crate::common::{ChildId, ParentId};
use crate::domains::children::models::Child;

#[derive(Error, Debug)]
pub enum ClaimError {
    #[error("No child has this caring identifier")]
    ChildNotFound,

    #[error("Child {0} is already claimed")]
    ChildAlreadyClaimed(ChildId),

    /// Caring identifiers are assumed unique but not enforced by the schema
    #[error("{matches} children share one caring identifier")]
    DataIntegrity { matches: usize },

    #[error("Storage error while claiming child: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Resolve `caring_id` to exactly one unclaimed child and point it at `parent_id`.
///
/// Matching is exact and case-sensitive on the stored value. Callers pass the
/// identifier already trimmed, and `add_child` trims before storing, so
/// surrounding whitespace never takes part in the comparison on either side.
///
/// - no match: `ChildNotFound`
/// - one match that already has a parent: `ChildAlreadyClaimed`
/// - several matches: `DataIntegrity`, nothing is claimed
pub async fn claim_child(
    caring_id: &str,
    parent_id: ParentId,
    conn: &mut PgConnection,
) -> Result<ChildId, ClaimError> {
    let candidates = Child::lock_by_caring_id(caring_id, conn).await?;

    let child = match candidates.as_slice() {
        [] => return Err(ClaimError::ChildNotFound),
        [only] => *only,
        many => {
            error!(
                caring_id = %caring_id,
                matches = many.len(),
                "Caring identifier matches more than one child; refusing to claim"
            );
            return Err(ClaimError::DataIntegrity {
                matches: many.len(),
            });
        }
    };

    if let Some(owner) = child.parent_id {
        debug!(child_id = %child.id, owner = %owner, "Child already claimed");
        return Err(ClaimError::ChildAlreadyClaimed(child.id));
    }

    if !Child::set_parent_if_unclaimed(child.id, parent_id, conn).await? {
        return Err(ClaimError::ChildAlreadyClaimed(child.id));
    }

    debug!(child_id = %child.id, parent_id = %parent_id, "Child claimed");
    Ok(child.id)
}
