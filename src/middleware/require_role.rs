use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};

use super::auth::AuthUser;
use crate::auth::Role;
use crate::error::ApiError;

/// Handler-level guard: error unless the user holds at least `min`.
pub fn assert_role(auth_user: &AuthUser, min: Role) -> Result<(), ApiError> {
    if !auth_user.role.at_least(min) {
        tracing::warn!(
            "Role check failed: user '{}' has role {}, operation requires {}",
            auth_user.username,
            auth_user.role,
            min
        );
        return Err(ApiError::forbidden(format!("This operation requires the {} role", min)));
    }
    Ok(())
}

/// Route-level guard for the /api/admin group.
pub async fn require_superadmin(request: Request, next: Next) -> Result<Response, impl IntoResponse> {
    let auth_user = request.extensions().get::<AuthUser>().ok_or_else(|| {
        let api_error = ApiError::unauthorized("JWT authentication required before role check");
        (
            StatusCode::from_u16(api_error.status_code()).unwrap(),
            Json(api_error.to_json()),
        )
    })?;

    if let Err(api_error) = assert_role(auth_user, Role::Superadmin) {
        return Err((
            StatusCode::from_u16(api_error.status_code()).unwrap(),
            Json(api_error.to_json()),
        ));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn user(role: Role) -> AuthUser {
        AuthUser {
            tenant_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            username: "guard-test".to_string(),
            role,
        }
    }

    #[test]
    fn assert_role_respects_hierarchy() {
        assert!(assert_role(&user(Role::TenantAdmin), Role::SchoolAdmin).is_ok());
        assert!(assert_role(&user(Role::SchoolAdmin), Role::SchoolAdmin).is_ok());
        let err = assert_role(&user(Role::Teacher), Role::SchoolAdmin).unwrap_err();
        assert_eq!(err.status_code(), 403);
    }
}
