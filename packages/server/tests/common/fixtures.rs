//! Test fixtures for creating test data.
//!
//! Fixtures go through the domain actions so rows look like production rows.
//! Every identifier carries a fresh UUID because the database is shared.

use adoptlink_core::common::{ChildId, ParentId};
use adoptlink_core::domains::children::{add_child, Child, NewChild};
use adoptlink_core::domains::parents::{register_parent, RegistrationRequest};
use adoptlink_core::domains::staff::{create_staff, NewStaffMember, StaffMember};
use adoptlink_core::kernel::BaseCredentialHasher;
use sqlx::PgPool;
use uuid::Uuid;

pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@test.local", prefix, Uuid::now_v7())
}

pub fn unique_caring_id() -> String {
    format!("CARE-{}", Uuid::now_v7().simple())
}

pub fn registration(email: &str, password: &str, caring_id: Option<&str>) -> RegistrationRequest {
    RegistrationRequest {
        email: email.to_string(),
        password: password.to_string(),
        name: Some("Test Parent".to_string()),
        caring_id: caring_id.map(str::to_string),
        ..Default::default()
    }
}

/// Unclaimed child unless `parent_id` is given
pub async fn create_test_child(
    pool: &PgPool,
    caring_id: Option<&str>,
    parent_id: Option<ParentId>,
) -> Child {
    add_child(
        NewChild {
            name: "Test Child".to_string(),
            parent_id,
            caring_id: caring_id.map(str::to_string),
            date_of_birth: None,
            gender: Some("female".to_string()),
            background: None,
            photo: None,
            placement_date: None,
            adoption_date: None,
            status: None,
        },
        pool,
    )
    .await
    .expect("Failed to create test child")
}

pub async fn create_test_parent(pool: &PgPool, hasher: &dyn BaseCredentialHasher) -> ParentId {
    register_parent(
        registration(&unique_email("parent"), "secret", None),
        hasher,
        pool,
    )
    .await
    .expect("Failed to register test parent")
    .parent_id
}

pub async fn create_test_staff(pool: &PgPool, hasher: &dyn BaseCredentialHasher) -> StaffMember {
    create_staff(
        NewStaffMember {
            name: "Case Worker".to_string(),
            email: unique_email("staff"),
            password: "secret".to_string(),
            phone: None,
            role_title: None,
            department: None,
        },
        hasher,
        pool,
    )
    .await
    .expect("Failed to create test staff member")
}

pub async fn parent_exists(pool: &PgPool, email: &str) -> bool {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM parents WHERE email = $1)")
        .bind(email)
        .fetch_one(pool)
        .await
        .expect("Failed to query parents")
}

pub async fn child_parent(pool: &PgPool, child_id: ChildId) -> Option<ParentId> {
    Child::find_by_id(child_id, pool)
        .await
        .expect("Failed to query child")
        .expect("Child should exist")
        .parent_id
}
