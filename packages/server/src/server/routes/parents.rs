use axum::{
    extract::{Extension, Multipart},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::common::{Capability, ParentId};
use crate::domains::children::Child;
use crate::domains::documents::{upload_document, Document, UploadedFile};
use crate::domains::parents::{
    load_dashboard, register_parent, update_profile, HouseholdAttributes, Parent,
    RegistrationRequest,
};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::middleware::{authorize, AuthUser};
use crate::server::routes::{success, success_with_message};

/// Public registration; claims the child named by `caring_id` when given
pub async fn register_parent_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<RegistrationRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let outcome = register_parent(
        request,
        state.deps.credential_hasher.as_ref(),
        &state.db_pool,
    )
    .await?;

    let message = if outcome.child_id.is_some() {
        "Parent registered and linked to child"
    } else {
        "Parent registered"
    };
    Ok((StatusCode::CREATED, success_with_message(message, outcome)))
}

pub async fn list_parents_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
) -> Result<Json<Value>, ApiError> {
    authorize(auth, Capability::ViewParents)?;
    let parents = Parent::find_all_with_children(&state.db_pool).await?;
    Ok(success(parents))
}

pub async fn parent_dashboard_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
) -> Result<Json<Value>, ApiError> {
    let user = authorize(auth, Capability::ActAsParent)?;
    let dashboard = load_dashboard(ParentId::from_uuid(user.subject), &state.db_pool).await?;
    Ok(success(dashboard))
}

pub async fn update_profile_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Json(household): Json<HouseholdAttributes>,
) -> Result<Json<Value>, ApiError> {
    let user = authorize(auth, Capability::ActAsParent)?;
    let parent = update_profile(
        ParentId::from_uuid(user.subject),
        household,
        &state.db_pool,
    )
    .await?;
    Ok(success_with_message("Profile updated", parent))
}

/// The parent's first linked child, or null
pub async fn parent_child_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
) -> Result<Json<Value>, ApiError> {
    let user = authorize(auth, Capability::ActAsParent)?;
    let child = Child::find_by_parent(ParentId::from_uuid(user.subject), &state.db_pool)
        .await?
        .into_iter()
        .next();
    Ok(success(child))
}

/// Multipart fields: `type` (document type) and `document` (the file)
pub async fn upload_document_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let user = authorize(auth, Capability::ActAsParent)?;

    let mut document_type: Option<String> = None;
    let mut file: Option<UploadedFile> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed upload: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("type") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Malformed upload: {}", e)))?;
                document_type = Some(text);
            }
            Some("document") => {
                let original_name = field.file_name().unwrap_or("document").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Malformed upload: {}", e)))?;
                file = Some(UploadedFile {
                    original_name,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    let document_type =
        document_type.ok_or_else(|| ApiError::bad_request("Missing document type"))?;
    let file = file.ok_or_else(|| ApiError::bad_request("No file uploaded"))?;

    let document = upload_document(
        ParentId::from_uuid(user.subject),
        document_type.trim(),
        file,
        &state.deps.upload_dir,
        &state.db_pool,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        success_with_message("Document uploaded", document),
    ))
}

pub async fn list_documents_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
) -> Result<Json<Value>, ApiError> {
    let user = authorize(auth, Capability::ActAsParent)?;
    let documents =
        Document::find_by_parent(ParentId::from_uuid(user.subject), &state.db_pool).await?;
    Ok(success(documents))
}
