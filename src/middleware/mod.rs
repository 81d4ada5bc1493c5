pub mod auth;
pub mod require_role;
pub mod validate_tenant;

pub use auth::{jwt_auth_middleware, AuthUser};
pub use require_role::{assert_role, require_superadmin};
pub use validate_tenant::{validate_tenant_middleware, ValidatedTenant};
