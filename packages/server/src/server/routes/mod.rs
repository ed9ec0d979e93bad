// HTTP routes
pub mod admin;
pub mod adoptions;
pub mod auth;
pub mod children;
pub mod health;
pub mod parents;
pub mod staff;
pub mod visits;

pub use admin::*;
pub use adoptions::*;
pub use auth::*;
pub use children::*;
pub use health::*;
pub use parents::*;
pub use staff::*;
pub use visits::*;

use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

/// `{ "success": true, "data": ... }`
pub(crate) fn success<T: Serialize>(data: T) -> Json<Value> {
    Json(json!({ "success": true, "data": data }))
}

/// `{ "success": true, "message": ..., "data": ... }`
pub(crate) fn success_with_message<T: Serialize>(message: &str, data: T) -> Json<Value> {
    Json(json!({ "success": true, "message": message, "data": data }))
}
