use std::time::Duration;

use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;
use sqlx::PgPool;

use crate::server::app::AppState;

const DATABASE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    database: DatabaseHealth,
    connection_pool: PoolStats,
}

#[derive(Serialize)]
pub struct DatabaseHealth {
    status: &'static str,
    /// Latest applied migration; absent when the database did not answer
    #[serde(skip_serializing_if = "Option::is_none")]
    schema_version: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
pub struct PoolStats {
    size: u32,
    idle: usize,
    max: u32,
}

impl DatabaseHealth {
    fn failed(error: String) -> Self {
        Self {
            status: "error",
            schema_version: None,
            error: Some(error),
        }
    }
}

/// Reads the schema version, which doubles as the liveness query
async fn check_database(pool: &PgPool) -> DatabaseHealth {
    let query = sqlx::query_scalar::<_, Option<i64>>(
        "SELECT MAX(version) FROM _sqlx_migrations WHERE success",
    )
    .fetch_one(pool);

    match tokio::time::timeout(DATABASE_TIMEOUT, query).await {
        Ok(Ok(schema_version)) => DatabaseHealth {
            status: "ok",
            schema_version,
            error: None,
        },
        Ok(Err(e)) => DatabaseHealth::failed(format!("Query failed: {}", e)),
        Err(_) => DatabaseHealth::failed(format!(
            "No answer within {}s",
            DATABASE_TIMEOUT.as_secs()
        )),
    }
}

/// `GET /health`: 200 while the database answers, 503 otherwise
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let database = check_database(&state.db_pool).await;
    let pool = &state.db_pool;
    let connection_pool = PoolStats {
        size: pool.size(),
        idle: pool.num_idle(),
        max: pool.options().get_max_connections(),
    };

    let (code, status) = match database.error {
        None => (StatusCode::OK, "healthy"),
        Some(_) => (StatusCode::SERVICE_UNAVAILABLE, "unhealthy"),
    };

    (
        code,
        Json(HealthResponse {
            status,
            database,
            connection_pool,
        }),
    )
}
