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
pub struct HolidayRequest {
    pub name: String,
    pub date: NaiveDate,
    pub description: Option<String>,
}

/// GET /api/sessions/:id/holidays
pub async fn list(
    Extension(auth): Extension<AuthUser>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let service = CalendarService::new().await?;
    let holidays = service.list_holidays(auth.tenant_id, session_id).await?;
    Ok(Json(json!({ "success": true, "data": holidays })))
}

/// POST /api/sessions/:id/holidays - create a holiday inside the session range
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<HolidayRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    assert_role(&auth, Role::TenantAdmin)?;

    let service = CalendarService::new().await?;
    let holiday = service
        .create_holiday(
            auth.tenant_id,
            session_id,
            &payload.name,
            payload.date,
            payload.description.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "data": holiday }))))
}
