use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::Role;
use crate::error::ApiError;
use crate::handlers::ListQuery;
use crate::middleware::{assert_role, AuthUser};
use crate::services::SchoolService;

#[derive(Debug, Deserialize)]
pub struct StudentRequest {
    pub first_name: String,
    pub last_name: String,
}

/// GET /api/students
pub async fn list(
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, ApiError> {
    let (limit, offset) = query.page();
    let service = SchoolService::new().await?;
    let students = service.list_students(auth.tenant_id, limit, offset).await?;
    Ok(Json(json!({ "success": true, "data": students })))
}

/// POST /api/students - register a student in the tenant; the school
/// assignment comes later through an approved admission
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<StudentRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    assert_role(&auth, Role::SchoolAdmin)?;

    if payload.first_name.trim().is_empty() || payload.last_name.trim().is_empty() {
        return Err(ApiError::validation_error("Student name cannot be empty", None));
    }

    let service = SchoolService::new().await?;
    let student = service
        .create_student(auth.tenant_id, payload.first_name.trim(), payload.last_name.trim())
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "data": student }))))
}
