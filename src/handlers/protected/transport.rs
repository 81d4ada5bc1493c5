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
pub struct TransportRouteRequest {
    pub name: String,
    pub description: Option<String>,
    pub monthly_fee: BigDecimal,
}

/// GET /api/schools/:id/transport-routes
pub async fn list(
    Extension(auth): Extension<AuthUser>,
    Path(school_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let service = SchoolService::new().await?;
    let routes = service.list_transport_routes(auth.tenant_id, school_id).await?;
    Ok(Json(json!({ "success": true, "data": routes })))
}

/// POST /api/schools/:id/transport-routes
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Path(school_id): Path<Uuid>,
    Json(payload): Json<TransportRouteRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    assert_role(&auth, Role::SchoolAdmin)?;

    let service = SchoolService::new().await?;
    let route = service
        .create_transport_route(
            auth.tenant_id,
            school_id,
            &payload.name,
            payload.description.as_deref(),
            &payload.monthly_fee,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "data": route }))))
}
