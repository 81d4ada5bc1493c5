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
pub struct GradeRequest {
    pub name: String,
    pub level: i32,
}

/// GET /api/schools/:id/grades
pub async fn list(
    Extension(auth): Extension<AuthUser>,
    Path(school_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let service = SchoolService::new().await?;
    let grades = service.list_grades(auth.tenant_id, school_id).await?;
    Ok(Json(json!({ "success": true, "data": grades })))
}

/// POST /api/schools/:id/grades - level is ordinal and unique per school
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Path(school_id): Path<Uuid>,
    Json(payload): Json<GradeRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    assert_role(&auth, Role::TenantAdmin)?;

    let service = SchoolService::new().await?;
    let grade = service
        .create_grade(auth.tenant_id, school_id, &payload.name, payload.level)
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "data": grade }))))
}
