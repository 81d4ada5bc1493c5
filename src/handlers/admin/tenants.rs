use axum::{
    extract::Path,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::services::TenantService;

#[derive(Debug, Deserialize)]
pub struct TenantRequest {
    pub name: String,
    pub admin_username: String,
    pub admin_password: String,
}

/// GET /api/admin/tenants - list all tenants (superadmin)
pub async fn list() -> Result<Json<Value>, ApiError> {
    let service = TenantService::new().await?;
    let tenants = service.list_tenants().await?;
    Ok(Json(json!({ "success": true, "data": tenants })))
}

/// GET /api/admin/tenants/:id
pub async fn show(Path(tenant_id): Path<Uuid>) -> Result<Json<Value>, ApiError> {
    let service = TenantService::new().await?;
    let tenant = service.get_tenant(tenant_id).await?;
    Ok(Json(json!({ "success": true, "data": tenant })))
}

/// POST /api/admin/tenants - create a tenant with its first admin user
pub async fn create(Json(payload): Json<TenantRequest>) -> Result<(StatusCode, Json<Value>), ApiError> {
    if payload.admin_password.len() < 8 {
        return Err(ApiError::validation_error("Admin password must be at least 8 characters", None));
    }

    let service = TenantService::new().await?;
    let (tenant, admin) = service
        .create_tenant(&payload.name, &payload.admin_username, &payload.admin_password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": {
                "tenant": tenant,
                "admin": { "id": admin.id, "username": admin.username, "role": admin.role }
            }
        })),
    ))
}
