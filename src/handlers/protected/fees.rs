use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use bigdecimal::BigDecimal;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::Role;
use crate::error::ApiError;
use crate::middleware::{assert_role, AuthUser};
use crate::services::SchoolService;

#[derive(Debug, Deserialize)]
pub struct FeeStructureRequest {
    pub name: String,
    pub amount: BigDecimal,
    pub frequency: String,
}

/// GET /api/grades/:id/fees
pub async fn list(
    Extension(auth): Extension<AuthUser>,
    Path(grade_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let service = SchoolService::new().await?;
    let fees = service.list_fee_structures(auth.tenant_id, grade_id).await?;
    Ok(Json(json!({ "success": true, "data": fees })))
}

/// POST /api/grades/:id/fees
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Path(grade_id): Path<Uuid>,
    Json(payload): Json<FeeStructureRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    assert_role(&auth, Role::SchoolAdmin)?;

    let service = SchoolService::new().await?;
    let fee = service
        .create_fee_structure(auth.tenant_id, grade_id, &payload.name, &payload.amount, &payload.frequency)
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "data": fee }))))
}
