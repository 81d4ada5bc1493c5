use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::Role;
use crate::error::ApiError;
use crate::middleware::{assert_role, AuthUser};
use crate::services::SchoolService;

#[derive(Debug, Deserialize)]
pub struct SectionRequest {
    pub name: String,
}

/// GET /api/grades/:id/sections
pub async fn list(
    Extension(auth): Extension<AuthUser>,
    Path(grade_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let service = SchoolService::new().await?;
    let sections = service.list_sections(auth.tenant_id, grade_id).await?;
    Ok(Json(json!({ "success": true, "data": sections })))
}

/// POST /api/grades/:id/sections
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Path(grade_id): Path<Uuid>,
    Json(payload): Json<SectionRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    assert_role(&auth, Role::SchoolAdmin)?;

    let service = SchoolService::new().await?;
    let section = service.create_section(auth.tenant_id, grade_id, &payload.name).await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "data": section }))))
}
