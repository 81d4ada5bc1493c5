use std::fmt;
use std::str::FromStr;

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config;

/// Role hierarchy, weakest to strongest. Variant order drives the ordering
/// used by route guards, so keep it sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Teacher,
    SchoolAdmin,
    TenantAdmin,
    Superadmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::SchoolAdmin => "school_admin",
            Role::TenantAdmin => "tenant_admin",
            Role::Superadmin => "superadmin",
        }
    }

    pub fn at_least(&self, min: Role) -> bool {
        *self >= min
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "teacher" => Ok(Role::Teacher),
            "school_admin" => Ok(Role::SchoolAdmin),
            "tenant_admin" => Ok(Role::TenantAdmin),
            "superadmin" => Ok(Role::Superadmin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(tenant_id: Uuid, user_id: Uuid, username: String, role: Role) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            tenant_id,
            user_id,
            username,
            role,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
    #[error("JWT secret not configured")]
    MissingSecret,
}

pub fn generate_jwt(claims: &Claims) -> Result<String, JwtError> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err(JwtError::MissingSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

/// Sha-256 hex digest for stored passwords.
pub fn password_digest(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub fn verify_password(password: &str, stored_digest: &str) -> bool {
    password_digest(password) == stored_digest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_ordering_follows_hierarchy() {
        assert!(Role::Superadmin.at_least(Role::TenantAdmin));
        assert!(Role::TenantAdmin.at_least(Role::SchoolAdmin));
        assert!(Role::SchoolAdmin.at_least(Role::SchoolAdmin));
        assert!(!Role::Teacher.at_least(Role::SchoolAdmin));
        assert!(!Role::Student.at_least(Role::Teacher));
    }

    #[test]
    fn role_round_trips_through_strings() {
        for role in [Role::Student, Role::Teacher, Role::SchoolAdmin, Role::TenantAdmin, Role::Superadmin] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("principal".parse::<Role>().is_err());
    }

    #[test]
    fn digest_is_stable_and_password_sensitive() {
        let digest = password_digest("letmein");
        assert_eq!(digest.len(), 64);
        assert!(verify_password("letmein", &digest));
        assert!(!verify_password("letmeout", &digest));
    }

    #[test]
    fn claims_expire_after_issue() {
        let claims = Claims::new(Uuid::new_v4(), Uuid::new_v4(), "admin".to_string(), Role::TenantAdmin);
        assert!(claims.exp > claims.iat);
    }
}
