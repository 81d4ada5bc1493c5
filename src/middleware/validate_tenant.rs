use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use sqlx::Row;
use uuid::Uuid;

use super::auth::AuthUser;
use crate::database::manager::DatabaseManager;
use crate::error::ApiError;

/// Validated tenant information from the tenants registry
#[derive(Clone, Debug)]
pub struct ValidatedTenant {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
}

/// Middleware that validates the tenant from JWT claims against the tenants
/// table. Ensures the tenant exists and is active before any scoped handler
/// runs.
pub async fn validate_tenant_middleware(
    mut request: Request,
    next: Next,
) -> Result<Response, impl IntoResponse> {
    // Get AuthUser from previous JWT middleware
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| {
            let api_error = ApiError::unauthorized("JWT authentication required before tenant validation");
            (
                StatusCode::from_u16(api_error.status_code()).unwrap(),
                Json(api_error.to_json()),
            )
        })?
        .clone();

    let pool = DatabaseManager::main_pool().await.map_err(|e| {
        let api_error: ApiError = e.into();
        (
            StatusCode::from_u16(api_error.status_code()).unwrap(),
            Json(api_error.to_json()),
        )
    })?;

    let row = sqlx::query("SELECT id, name, is_active FROM tenants WHERE id = $1 AND is_active = true")
        .bind(auth_user.tenant_id)
        .fetch_optional(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Database error validating tenant: {}", e);
            let api_error = ApiError::internal_server_error("Failed to validate tenant");
            (
                StatusCode::from_u16(api_error.status_code()).unwrap(),
                Json(api_error.to_json()),
            )
        })?;

    let tenant_row = row.ok_or_else(|| {
        tracing::warn!("Tenant validation failed: tenant '{}' not found or inactive", auth_user.tenant_id);
        let api_error = ApiError::forbidden("Tenant is not active or does not exist");
        (
            StatusCode::from_u16(api_error.status_code()).unwrap(),
            Json(api_error.to_json()),
        )
    })?;

    let validated_tenant = ValidatedTenant {
        id: tenant_row.get("id"),
        name: tenant_row.get("name"),
        is_active: tenant_row.get("is_active"),
    };

    tracing::debug!("Tenant validation successful: {} ({})", validated_tenant.name, validated_tenant.id);

    request.extensions_mut().insert(validated_tenant);

    Ok::<_, (StatusCode, Json<serde_json::Value>)>(next.run(request).await)
}
