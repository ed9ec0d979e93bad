use crate::common::{Actor, AuthError, Capability, Role};
use crate::domains::auth::JwtService;
use axum::{extract::Extension, middleware::Next, response::Response};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Authenticated account information from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub subject: Uuid,
    pub role: Role,
    pub email: String,
}

impl AuthUser {
    pub fn actor(&self) -> Actor {
        Actor::new(self.subject, self.role)
    }
}

/// JWT authentication middleware
///
/// Extracts JWT token from Authorization header, verifies it, and adds AuthUser to request extensions.
/// If no token or invalid token, request continues without AuthUser; handlers decide.
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let auth_user = extract_auth_user(&request, &jwt_service);

    if let Some(user) = auth_user {
        debug!(subject = %user.subject, role = %user.role, "Authenticated request");
        request.extensions_mut().insert(user);
    } else {
        debug!("No valid authentication token");
    }

    next.run(request).await
}

/// Handler-side check: the request must be authenticated and its role must
/// hold `capability`.
pub fn authorize(
    auth: Option<Extension<AuthUser>>,
    capability: Capability,
) -> Result<AuthUser, AuthError> {
    let Extension(user) = auth.ok_or(AuthError::AuthenticationRequired)?;
    user.actor().can(capability).check()?;
    Ok(user)
}

/// Extract and verify JWT token from request
fn extract_auth_user(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Option<AuthUser> {
    let auth_header = request.headers().get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;

    // Handle both "Bearer <token>" and raw token
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    let claims = jwt_service.verify_token(token).ok()?;

    Some(AuthUser {
        subject: claims.sub,
        role: claims.role,
        email: claims.email,
    })
}
