use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::Role;
use crate::enrollment::AdmissionAction;
use crate::error::ApiError;
use crate::handlers::ListQuery;
use crate::middleware::{assert_role, AuthUser};
use crate::services::EnrollmentService;

#[derive(Debug, Deserialize)]
pub struct AdmissionRequest {
    pub student_id: Uuid,
    pub school_id: Uuid,
    pub grade_id: Uuid,
    pub admission_date: NaiveDate,
    pub remarks: Option<String>,
}

/// GET /api/admissions
pub async fn list(
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, ApiError> {
    let (limit, offset) = query.page();
    let service = EnrollmentService::new().await?;
    let admissions = service.list_admissions(auth.tenant_id, limit, offset).await?;
    Ok(Json(json!({ "success": true, "data": admissions })))
}

/// POST /api/admissions - open a pending admission
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<AdmissionRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    assert_role(&auth, Role::SchoolAdmin)?;

    let service = EnrollmentService::new().await?;
    let admission = service
        .create_admission(
            auth.tenant_id,
            payload.student_id,
            payload.school_id,
            payload.grade_id,
            payload.admission_date,
            payload.remarks.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "data": admission }))))
}

/// POST /api/admissions/:id/approve - approve and assign the student's school
pub async fn approve(
    Extension(auth): Extension<AuthUser>,
    Path(admission_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    transition(auth, admission_id, AdmissionAction::Approve).await
}

/// POST /api/admissions/:id/reject
pub async fn reject(
    Extension(auth): Extension<AuthUser>,
    Path(admission_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    transition(auth, admission_id, AdmissionAction::Reject).await
}

async fn transition(auth: AuthUser, admission_id: Uuid, action: AdmissionAction) -> Result<Json<Value>, ApiError> {
    assert_role(&auth, Role::SchoolAdmin)?;

    let service = EnrollmentService::new().await?;
    let admission = service.transition_admission(auth.tenant_id, admission_id, action).await?;
    Ok(Json(json!({ "success": true, "data": admission })))
}
