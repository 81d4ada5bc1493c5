use axum::{extract::Extension, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::Role;
use crate::error::ApiError;
use crate::middleware::{assert_role, AuthUser};
use crate::services::SchoolService;

#[derive(Debug, Deserialize)]
pub struct SchoolRequest {
    pub name: String,
}

/// GET /api/schools
pub async fn list(Extension(auth): Extension<AuthUser>) -> Result<Json<Value>, ApiError> {
    let service = SchoolService::new().await?;
    let schools = service.list_schools(auth.tenant_id).await?;
    Ok(Json(json!({ "success": true, "data": schools })))
}

/// POST /api/schools
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<SchoolRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    assert_role(&auth, Role::TenantAdmin)?;

    if payload.name.trim().is_empty() {
        return Err(ApiError::validation_error("School name cannot be empty", None));
    }

    let service = SchoolService::new().await?;
    let school = service.create_school(auth.tenant_id, payload.name.trim()).await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "data": school }))))
}
