use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::Role;
use crate::error::ApiError;
use crate::middleware::{assert_role, AuthUser};
use crate::services::CalendarService;

#[derive(Debug, Deserialize)]
pub struct TermRequest {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// GET /api/sessions/:id/terms
pub async fn list(
    Extension(auth): Extension<AuthUser>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let service = CalendarService::new().await?;
    let terms = service.list_terms(auth.tenant_id, session_id).await?;
    Ok(Json(json!({ "success": true, "data": terms })))
}

/// POST /api/sessions/:id/terms - create a term nested in the session range
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<TermRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    assert_role(&auth, Role::TenantAdmin)?;

    let service = CalendarService::new().await?;
    let term = service
        .create_term(auth.tenant_id, session_id, &payload.name, payload.start_date, payload.end_date)
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "data": term }))))
}
