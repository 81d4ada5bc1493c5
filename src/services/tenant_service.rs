use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::{password_digest, Role};
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Tenant, User};
use crate::error::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum TenantError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Database manager error: {0}")]
    DatabaseManager(#[from] DatabaseError),
    #[error("Tenant already exists: {0}")]
    AlreadyExists(String),
    #[error("Tenant not found: {0}")]
    NotFound(Uuid),
    #[error("Invalid tenant name: {0}")]
    InvalidName(String),
}

impl From<TenantError> for ApiError {
    fn from(err: TenantError) -> Self {
        match err {
            TenantError::AlreadyExists(name) => ApiError::conflict(format!("Tenant already exists: {}", name)),
            TenantError::NotFound(id) => ApiError::not_found(format!("Tenant not found: {}", id)),
            TenantError::InvalidName(msg) => ApiError::bad_request(msg),
            TenantError::Database(e) => e.into(),
            TenantError::DatabaseManager(e) => e.into(),
        }
    }
}

/// Registry of tenants (school districts) and their bootstrap admin users
pub struct TenantService {
    pool: PgPool,
}

impl TenantService {
    pub async fn new() -> Result<Self, TenantError> {
        let pool = DatabaseManager::main_pool().await?;
        Ok(Self { pool })
    }

    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new tenant with an initial tenant_admin user
    pub async fn create_tenant(
        &self,
        tenant_name: &str,
        admin_username: &str,
        admin_password: &str,
    ) -> Result<(Tenant, User), TenantError> {
        self.validate_tenant_name(tenant_name)?;

        if self.tenant_exists(tenant_name).await? {
            return Err(TenantError::AlreadyExists(tenant_name.to_string()));
        }

        // Tenant row and its first admin land together or not at all
        let mut tx = self.pool.begin().await?;

        let tenant: Tenant = sqlx::query_as(
            r#"
            INSERT INTO tenants (name, is_active)
            VALUES ($1, true)
            RETURNING id, name, is_active, created_at, updated_at
            "#,
        )
        .bind(tenant_name)
        .fetch_one(&mut *tx)
        .await?;

        let admin: User = sqlx::query_as(
            r#"
            INSERT INTO users (tenant_id, username, password_digest, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, tenant_id, username, password_digest, role, created_at, updated_at
            "#,
        )
        .bind(tenant.id)
        .bind(admin_username)
        .bind(password_digest(admin_password))
        .bind(Role::TenantAdmin.as_str())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!("Created tenant '{}' ({})", tenant.name, tenant.id);
        Ok((tenant, admin))
    }

    /// Validate tenant name follows rules
    fn validate_tenant_name(&self, name: &str) -> Result<(), TenantError> {
        if name.len() < 2 {
            return Err(TenantError::InvalidName("Tenant name must be at least 2 characters".to_string()));
        }

        if name.len() > 100 {
            return Err(TenantError::InvalidName("Tenant name must be less than 100 characters".to_string()));
        }

        if !name.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_') {
            return Err(TenantError::InvalidName(
                "Tenant name can only contain letters, numbers, hyphens, and underscores".to_string(),
            ));
        }

        Ok(())
    }

    async fn tenant_exists(&self, tenant_name: &str) -> Result<bool, TenantError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tenants WHERE name = $1")
            .bind(tenant_name)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0 > 0)
    }

    pub async fn get_tenant(&self, tenant_id: Uuid) -> Result<Tenant, TenantError> {
        sqlx::query_as(
            "SELECT id, name, is_active, created_at, updated_at FROM tenants WHERE id = $1",
        )
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(TenantError::NotFound(tenant_id))
    }

    pub async fn get_tenant_by_name(&self, tenant_name: &str) -> Result<Option<Tenant>, TenantError> {
        let tenant = sqlx::query_as(
            "SELECT id, name, is_active, created_at, updated_at FROM tenants WHERE name = $1",
        )
        .bind(tenant_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tenant)
    }

    pub async fn list_tenants(&self) -> Result<Vec<Tenant>, TenantError> {
        let tenants = sqlx::query_as(
            "SELECT id, name, is_active, created_at, updated_at FROM tenants ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tenants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // validate_tenant_name is pure; exercise it without a database
    fn validate(name: &str) -> Result<(), TenantError> {
        let svc = TenantService {
            pool: sqlx::postgres::PgPoolOptions::new().connect_lazy("postgres://localhost/campus_main").unwrap(),
        };
        svc.validate_tenant_name(name)
    }

    #[tokio::test]
    async fn accepts_reasonable_names() {
        assert!(validate("north-district").is_ok());
        assert!(validate("district_42").is_ok());
    }

    #[tokio::test]
    async fn rejects_bad_names() {
        assert!(matches!(validate("x"), Err(TenantError::InvalidName(_))));
        assert!(matches!(validate("bad name!"), Err(TenantError::InvalidName(_))));
        let long = "a".repeat(101);
        assert!(matches!(validate(&long), Err(TenantError::InvalidName(_))));
    }
}
