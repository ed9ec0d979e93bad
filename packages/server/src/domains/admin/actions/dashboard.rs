use serde::Serialize;
use sqlx::PgPool;

use crate::common::DomainError;
use crate::domains::children::models::Child;
use crate::domains::documents::models::Document;
use crate::domains::parents::models::Parent;
use crate::domains::staff::models::StaffMember;
use crate::domains::visits::models::RescheduleRequest;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AdminDashboard {
    pub parents: i64,
    pub children: i64,
    pub staff: i64,
    pub unclaimed_children: i64,
    pub pending_reschedule_requests: i64,
    pub pending_documents: i64,
}

pub async fn load_admin_dashboard(pool: &PgPool) -> Result<AdminDashboard, DomainError> {
    let (parents, children, staff, unclaimed_children, pending_reschedule_requests, pending_documents) =
        tokio::try_join!(
            Parent::count(pool),
            Child::count(pool),
            StaffMember::count_active(pool),
            Child::count_unclaimed(pool),
            RescheduleRequest::count_pending(pool),
            Document::count_awaiting_review(pool),
        )?;

    Ok(AdminDashboard {
        parents,
        children,
        staff,
        unclaimed_children,
        pending_reschedule_requests,
        pending_documents,
    })
}
