use axum::{http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{generate_jwt, password_digest, verify_password, Claims, Role};
use crate::config;
use crate::database::manager::DatabaseManager;
use crate::database::models::User;
use crate::error::ApiError;
use crate::services::TenantService;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub tenant: String,
    pub username: String,
    pub password: String,
}

/// POST /auth/login - authenticate against a tenant and receive a JWT
pub async fn login(Json(payload): Json<LoginRequest>) -> Result<Json<Value>, ApiError> {
    let tenant_service = TenantService::new().await?;
    let tenant = tenant_service
        .get_tenant_by_name(&payload.tenant)
        .await?
        .filter(|t| t.is_active)
        .ok_or_else(|| ApiError::unauthorized("Invalid tenant or credentials"))?;

    let pool = DatabaseManager::main_pool().await?;
    let user: Option<User> = sqlx::query_as(
        r#"
        SELECT id, tenant_id, username, password_digest, role, created_at, updated_at
        FROM users
        WHERE tenant_id = $1 AND username = $2
        "#,
    )
    .bind(tenant.id)
    .bind(&payload.username)
    .fetch_optional(&pool)
    .await?;

    // Same response for unknown user and wrong password
    let user = user.ok_or_else(|| ApiError::unauthorized("Invalid tenant or credentials"))?;
    if !verify_password(&payload.password, &user.password_digest) {
        tracing::warn!("Failed login for '{}' in tenant '{}'", payload.username, tenant.name);
        return Err(ApiError::unauthorized("Invalid tenant or credentials"));
    }

    let role: Role = user.role.parse().map_err(|e: String| {
        tracing::error!("Stored role is outside the hierarchy: {}", e);
        ApiError::internal_server_error("An error occurred while processing your request")
    })?;

    let claims = Claims::new(tenant.id, user.id, user.username.clone(), role);
    let expires_in = claims.exp - claims.iat;
    let token = generate_jwt(&claims)?;

    tracing::info!("User '{}' logged in to tenant '{}'", user.username, tenant.name);

    Ok(Json(json!({
        "success": true,
        "data": {
            "token": token,
            "user": {
                "id": user.id,
                "username": user.username,
                "tenant": tenant.name,
                "role": role
            },
            "expires_in": expires_in
        }
    })))
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub tenant: String,
    pub username: String,
    pub password: String,
}

/// POST /auth/register - self-register a student account in a tenant.
/// Disabled outside development unless explicitly enabled.
pub async fn register(Json(payload): Json<RegisterRequest>) -> Result<(StatusCode, Json<Value>), ApiError> {
    if !config::config().security.allow_self_registration {
        return Err(ApiError::forbidden("Self-registration is disabled"));
    }

    if payload.username.len() < 2 || payload.password.len() < 8 {
        return Err(ApiError::validation_error(
            "Username must be at least 2 characters and password at least 8",
            None,
        ));
    }

    let tenant_service = TenantService::new().await?;
    let tenant = tenant_service
        .get_tenant_by_name(&payload.tenant)
        .await?
        .filter(|t| t.is_active)
        .ok_or_else(|| ApiError::not_found("Tenant not found"))?;

    let pool = DatabaseManager::main_pool().await?;
    let taken: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE tenant_id = $1 AND username = $2)")
        .bind(tenant.id)
        .bind(&payload.username)
        .fetch_one(&pool)
        .await?;
    if taken.0 {
        return Err(ApiError::conflict("Username is already taken"));
    }

    let user: User = sqlx::query_as(
        r#"
        INSERT INTO users (tenant_id, username, password_digest, role)
        VALUES ($1, $2, $3, $4)
        RETURNING id, tenant_id, username, password_digest, role, created_at, updated_at
        "#,
    )
    .bind(tenant.id)
    .bind(&payload.username)
    .bind(password_digest(&payload.password))
    .bind(Role::Student.as_str())
    .fetch_one(&pool)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": {
                "id": user.id,
                "username": user.username,
                "tenant": tenant.name,
                "role": user.role
            }
        })),
    ))
}
