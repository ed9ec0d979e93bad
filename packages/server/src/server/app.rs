//! Application setup and server configuration.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{DefaultBodyLimit, Extension},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domains::documents::MAX_DOCUMENT_BYTES;
use crate::kernel::ServerDeps;
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::*;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub deps: Arc<ServerDeps>,
}

fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer> {
    let origin = if allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        let origins = allowed_origins
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .with_context(|| format!("Invalid allowed origin: {}", o))
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]))
}

/// Build the Axum application router
///
/// Registration and login share a per-IP rate limit; everything else is
/// unlimited. Authentication is resolved once by the JWT middleware, and each
/// handler checks the capability it needs.
pub fn build_app(deps: ServerDeps, allowed_origins: &[String]) -> Result<Router> {
    let jwt_service = deps.jwt_service.clone();
    let app_state = AppState {
        db_pool: deps.db_pool.clone(),
        deps: Arc::new(deps),
    };

    // One request every 6 seconds per peer address, bursts of 10. Keyed on the
    // socket, so the server must be served with connect info.
    let rate_limit_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(6)
            .burst_size(10)
            .use_headers()
            .finish()
            .context("Invalid rate limiter configuration")?,
    );
    let rate_limit_layer = GovernorLayer {
        config: rate_limit_config,
    };

    let credential_routes = Router::new()
        .route("/api/parents/register", post(register_parent_handler))
        .route("/api/parents/login", post(parent_login_handler))
        .route("/api/staff/login", post(staff_login_handler))
        .route("/api/admin/login", post(admin_login_handler))
        .layer(rate_limit_layer);

    let document_routes = Router::new()
        .route(
            "/api/parents/documents",
            post(upload_document_handler).get(list_documents_handler),
        )
        // Multipart framing on top of the largest accepted file
        .layer(DefaultBodyLimit::max(MAX_DOCUMENT_BYTES + 64 * 1024));

    let app = Router::new()
        // Parents
        .route("/api/parents", get(list_parents_handler))
        .route("/api/parents/dashboard", get(parent_dashboard_handler))
        .route("/api/parents/profile", put(update_profile_handler))
        .route("/api/parents/child", get(parent_child_handler))
        // Children
        .route(
            "/api/children",
            post(add_child_handler).get(list_children_handler),
        )
        .route(
            "/api/children/with-parents",
            get(list_children_with_parents_handler),
        )
        .route("/api/children/:id", delete(delete_child_handler))
        // Adoptions
        .route(
            "/api/adoptions",
            post(assign_child_handler).get(list_adoptions_handler),
        )
        .route(
            "/api/adoptions/:child_id/status",
            put(update_adoption_status_handler),
        )
        // Visits
        .route("/api/visits", post(schedule_visit_handler))
        .route("/api/visits/parent", get(parent_visits_handler))
        .route("/api/visits/reschedule", post(request_reschedule_handler))
        .route(
            "/api/visits/reschedule-requests",
            get(list_reschedule_requests_handler),
        )
        .route(
            "/api/visits/reschedule-requests/:id",
            put(review_reschedule_handler),
        )
        // Staff
        .route(
            "/api/staff",
            get(list_staff_handler).post(create_staff_handler),
        )
        // Admin
        .route("/api/admin", post(create_admin_handler))
        .route("/api/admin/dashboard", get(admin_dashboard_handler))
        // Health check (no rate limit)
        .route("/health", get(health_handler))
        .merge(credential_routes)
        .merge(document_routes)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service.clone(), req, next)
        }))
        .layer(Extension(app_state))
        .layer(cors_layer(allowed_origins)?)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_rejects_invalid_origin() {
        assert!(cors_layer(&["http://localhost:3000".to_string()]).is_ok());
        assert!(cors_layer(&[]).is_ok());
        assert!(cors_layer(&["bad\norigin".to_string()]).is_err());
    }
}
