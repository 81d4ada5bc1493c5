use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::Role;
use crate::calendar::SessionCandidate;
use crate::error::ApiError;
use crate::middleware::{assert_role, AuthUser};
use crate::services::CalendarService;

/// GET /api/sessions - list the tenant's academic sessions
pub async fn list(Extension(auth): Extension<AuthUser>) -> Result<Json<Value>, ApiError> {
    let service = CalendarService::new().await?;
    let sessions = service.list_sessions(auth.tenant_id).await?;
    Ok(Json(json!({ "success": true, "data": sessions })))
}

/// GET /api/sessions/:id
pub async fn show(
    Extension(auth): Extension<AuthUser>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let service = CalendarService::new().await?;
    let session = service.get_session(auth.tenant_id, session_id).await?;
    Ok(Json(json!({ "success": true, "data": session })))
}

/// POST /api/sessions - create a session; an is_active candidate
/// deactivates every sibling in the same transaction
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Json(candidate): Json<SessionCandidate>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    assert_role(&auth, Role::TenantAdmin)?;

    let service = CalendarService::new().await?;
    let session = service.create_session(auth.tenant_id, &candidate).await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "data": session }))))
}

/// POST /api/sessions/:id/activate - make this the tenant's single active session
pub async fn activate(
    Extension(auth): Extension<AuthUser>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    assert_role(&auth, Role::TenantAdmin)?;

    let service = CalendarService::new().await?;
    let session = service.activate_session(auth.tenant_id, session_id).await?;
    Ok(Json(json!({ "success": true, "data": session })))
}
