use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{ChildId, ParentId};
use crate::domains::children::models::ChildStatus;

/// Parent model - SQL persistence layer
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Parent {
    pub id: ParentId,
    pub name: Option<String>,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub contact: Option<String>,
    pub marital_status: Option<String>,
    pub spouse_name: Option<String>,
    pub children_count: i32,
    pub occupation: Option<String>,
    pub annual_income: Option<Decimal>,
    pub home_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Household fields supplied at registration and editable from the profile
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HouseholdAttributes {
    pub marital_status: Option<String>,
    pub spouse_name: Option<String>,
    pub children_count: Option<i32>,
    pub occupation: Option<String>,
    pub annual_income: Option<Decimal>,
    pub home_type: Option<String>,
}

/// Exclusive upper bound of the `NUMERIC(12, 2)` income column
pub const ANNUAL_INCOME_LIMIT: Decimal = Decimal::from_parts(1_410_065_408, 2, 0, false, 0);

impl HouseholdAttributes {
    /// Reject values the household columns cannot hold
    pub fn check(&self) -> Result<(), &'static str> {
        if let Some(income) = self.annual_income {
            if income.is_sign_negative() {
                return Err("annual income cannot be negative");
            }
            if income.round_dp(2) >= ANNUAL_INCOME_LIMIT {
                return Err("annual income is too large");
            }
        }
        if self.children_count.is_some_and(|count| count < 0) {
            return Err("children count cannot be negative");
        }
        Ok(())
    }

    /// Blank strings become NULL, as form submissions send "" for untouched fields
    pub fn normalized(self) -> Self {
        fn blank_to_none(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            marital_status: blank_to_none(self.marital_status),
            spouse_name: blank_to_none(self.spouse_name),
            children_count: self.children_count,
            occupation: blank_to_none(self.occupation),
            annual_income: self.annual_income,
            home_type: blank_to_none(self.home_type),
        }
    }
}

/// Insert payload; the credential is already hashed
#[derive(Debug, Clone)]
pub struct NewParent<'a> {
    pub name: Option<&'a str>,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub contact: Option<&'a str>,
    pub household: &'a HouseholdAttributes,
}

/// One row per parent/child pair; parents without children appear once with
/// empty child columns
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct ParentSummary {
    pub id: ParentId,
    pub name: Option<String>,
    pub email: String,
    pub contact: Option<String>,
    pub marital_status: Option<String>,
    pub spouse_name: Option<String>,
    pub occupation: Option<String>,
    pub annual_income: Option<Decimal>,
    pub home_type: Option<String>,
    pub child_id: Option<ChildId>,
    pub caring_id: Option<String>,
    pub adopted_child: Option<String>,
    pub child_status: Option<ChildStatus>,
    pub created_at: DateTime<Utc>,
}

impl Parent {
    /// Find parent by ID
    pub async fn find_by_id(id: ParentId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM parents WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find parent by email (exact match)
    pub async fn find_by_email(email: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM parents WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Uniqueness guard read, on the caller's transaction
    pub async fn email_exists(email: &str, conn: &mut PgConnection) -> sqlx::Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM parents WHERE email = $1)")
            .bind(email)
            .fetch_one(conn)
            .await
    }

    /// Insert on the caller's transaction. A duplicate email surfaces as a
    /// unique violation from the `parents.email` constraint.
    pub async fn insert(new: &NewParent<'_>, conn: &mut PgConnection) -> sqlx::Result<Self> {
        let household = new.household;
        sqlx::query_as::<_, Self>(
            "INSERT INTO parents (
                id, name, email, password_hash, contact, marital_status,
                spouse_name, children_count, occupation, annual_income, home_type
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING *",
        )
        .bind(ParentId::new())
        .bind(new.name)
        .bind(new.email)
        .bind(new.password_hash)
        .bind(new.contact)
        .bind(&household.marital_status)
        .bind(&household.spouse_name)
        .bind(household.children_count.unwrap_or(0))
        .bind(&household.occupation)
        .bind(household.annual_income)
        .bind(&household.home_type)
        .fetch_one(conn)
        .await
    }

    /// Replace household attributes. Returns None if the parent does not exist.
    pub async fn update_household(
        id: ParentId,
        household: &HouseholdAttributes,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE parents
             SET marital_status = $2,
                 spouse_name = $3,
                 children_count = COALESCE($4, children_count),
                 occupation = $5,
                 annual_income = $6,
                 home_type = $7,
                 updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&household.marital_status)
        .bind(&household.spouse_name)
        .bind(household.children_count)
        .bind(&household.occupation)
        .bind(household.annual_income)
        .bind(&household.home_type)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Parents with their linked children, for staff and admin listings
    pub async fn find_all_with_children(pool: &PgPool) -> Result<Vec<ParentSummary>> {
        sqlx::query_as::<_, ParentSummary>(
            "SELECT
                p.id, p.name, p.email, p.contact,
                p.marital_status, p.spouse_name, p.occupation,
                p.annual_income, p.home_type,
                c.id AS child_id, c.caring_id, c.name AS adopted_child,
                c.status AS child_status,
                p.created_at
             FROM parents p
             LEFT JOIN children c ON p.id = c.parent_id
             ORDER BY p.created_at ASC, p.id ASC, c.id ASC",
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn count(pool: &PgPool) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM parents")
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_household_normalized_drops_blank_strings() {
        let attrs = HouseholdAttributes {
            marital_status: Some("  married ".to_string()),
            spouse_name: Some("".to_string()),
            children_count: Some(2),
            occupation: Some("   ".to_string()),
            annual_income: Some(Decimal::from_str("52000.50").unwrap()),
            home_type: None,
        }
        .normalized();

        assert_eq!(attrs.marital_status.as_deref(), Some("married"));
        assert_eq!(attrs.spouse_name, None);
        assert_eq!(attrs.occupation, None);
        assert_eq!(attrs.children_count, Some(2));
    }

    #[test]
    fn test_household_check_enforces_column_bounds() {
        let income = |value: &str| HouseholdAttributes {
            annual_income: Some(Decimal::from_str(value).unwrap()),
            ..Default::default()
        };

        assert_eq!(ANNUAL_INCOME_LIMIT, Decimal::from_str("10000000000").unwrap());
        assert!(income("9999999999.99").check().is_ok());
        assert!(income("10000000000").check().is_err());
        assert!(income("99999999999999").check().is_err());
        assert!(income("9999999999.999").check().is_err());
        assert!(income("-1").check().is_err());

        let negative_children = HouseholdAttributes {
            children_count: Some(-1),
            ..Default::default()
        };
        assert!(negative_children.check().is_err());
        assert!(HouseholdAttributes::default().check().is_ok());
    }

    #[test]
    fn test_household_accepts_numeric_or_string_income() {
        let from_number: HouseholdAttributes =
            serde_json::from_str(r#"{"annual_income": 45000}"#).unwrap();
        let from_string: HouseholdAttributes =
            serde_json::from_str(r#"{"annual_income": "45000"}"#).unwrap();

        assert_eq!(from_number.annual_income, from_string.annual_income);
    }

    #[test]
    fn test_password_hash_is_never_serialized() {
        let parent = Parent {
            id: ParentId::new(),
            name: Some("Asha".to_string()),
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            contact: None,
            marital_status: None,
            spouse_name: None,
            children_count: 0,
            occupation: None,
            annual_income: None,
            home_type: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&parent).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2id"));
    }
}
