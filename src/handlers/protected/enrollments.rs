use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::Role;
use crate::enrollment::EnrollmentAction;
use crate::error::ApiError;
use crate::handlers::ListQuery;
use crate::middleware::{assert_role, AuthUser};
use crate::services::EnrollmentService;

#[derive(Debug, Deserialize)]
pub struct EnrollmentRequest {
    pub section_id: Uuid,
    pub student_id: Uuid,
}

/// GET /api/enrollments
pub async fn list(
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, ApiError> {
    let (limit, offset) = query.page();
    let service = EnrollmentService::new().await?;
    let enrollments = service.list_enrollments(auth.tenant_id, limit, offset).await?;
    Ok(Json(json!({ "success": true, "data": enrollments })))
}

/// POST /api/enrollments - enroll a student into an active section
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<EnrollmentRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    assert_role(&auth, Role::SchoolAdmin)?;

    let service = EnrollmentService::new().await?;
    let enrollment = service
        .create_enrollment(auth.tenant_id, payload.section_id, payload.student_id)
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "data": enrollment }))))
}

/// POST /api/enrollments/:id/withdraw
pub async fn withdraw(
    Extension(auth): Extension<AuthUser>,
    Path(enrollment_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    transition(auth, enrollment_id, EnrollmentAction::Withdraw).await
}

/// POST /api/enrollments/:id/transfer
pub async fn transfer(
    Extension(auth): Extension<AuthUser>,
    Path(enrollment_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    transition(auth, enrollment_id, EnrollmentAction::Transfer).await
}

async fn transition(auth: AuthUser, enrollment_id: Uuid, action: EnrollmentAction) -> Result<Json<Value>, ApiError> {
    assert_role(&auth, Role::SchoolAdmin)?;

    let service = EnrollmentService::new().await?;
    let enrollment = service.transition_enrollment(auth.tenant_id, enrollment_id, action).await?;
    Ok(Json(json!({ "success": true, "data": enrollment })))
}
