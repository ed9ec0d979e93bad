use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::str::FromStr;

use crate::common::{DocumentId, ParentId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "document_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    IdProof,
    AddressProof,
    IncomeProof,
    BackgroundCheck,
}

impl FromStr for DocumentType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id_proof" => Ok(Self::IdProof),
            "address_proof" => Ok(Self::AddressProof),
            "income_proof" => Ok(Self::IncomeProof),
            "background_check" => Ok(Self::BackgroundCheck),
            other => Err(anyhow::anyhow!("unknown document type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "document_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    #[default]
    Pending,
    Uploaded,
    Verified,
    Rejected,
}

#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Document {
    pub id: DocumentId,
    pub parent_id: ParentId,
    pub document_type: DocumentType,
    pub file_name: String,
    #[serde(skip_serializing)]
    pub file_path: String,
    pub status: DocumentStatus,
    pub uploaded_at: DateTime<Utc>,
}

impl Document {
    pub async fn insert(
        id: DocumentId,
        parent_id: ParentId,
        document_type: DocumentType,
        file_name: &str,
        file_path: &str,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO documents (id, parent_id, document_type, file_name, file_path, status)
             VALUES ($1, $2, $3, $4, $5, 'uploaded')
             RETURNING *",
        )
        .bind(id)
        .bind(parent_id)
        .bind(document_type)
        .bind(file_name)
        .bind(file_path)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_parent(parent_id: ParentId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM documents WHERE parent_id = $1 ORDER BY uploaded_at DESC",
        )
        .bind(parent_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn count_by_parent(parent_id: ParentId, pool: &PgPool) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM documents WHERE parent_id = $1")
            .bind(parent_id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    /// Documents waiting for staff review
    pub async fn count_awaiting_review(pool: &PgPool) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM documents WHERE status IN ('pending', 'uploaded')",
        )
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
