use serde::Serialize;
use sqlx::PgPool;

use crate::common::{DomainError, ParentId};
use crate::domains::children::models::Child;
use crate::domains::documents::models::Document;
use crate::domains::parents::models::Parent;
use crate::domains::visits::models::Visit;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DashboardStats {
    pub documents: i64,
    pub scheduled_visits: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParentDashboard {
    pub parent: Parent,
    pub children: Vec<Child>,
    pub stats: DashboardStats,
}

/// Everything the parent landing page shows, in one call
pub async fn load_dashboard(
    parent_id: ParentId,
    pool: &PgPool,
) -> Result<ParentDashboard, DomainError> {
    let parent = Parent::find_by_id(parent_id, pool)
        .await?
        .ok_or(DomainError::NotFound("Parent"))?;

    let (children, documents, scheduled_visits) = tokio::try_join!(
        Child::find_by_parent(parent_id, pool),
        Document::count_by_parent(parent_id, pool),
        Visit::count_scheduled_for_parent(parent_id, pool),
    )?;

    Ok(ParentDashboard {
        parent,
        children,
        stats: DashboardStats {
            documents,
            scheduled_visits,
        },
    })
}
