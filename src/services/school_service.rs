use bigdecimal::BigDecimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{FeeStructure, Grade, School, Section, Student, TransportRoute};
use crate::error::ApiError;

/// Billing cadences accepted for fee structures
const FEE_FREQUENCIES: &[&str] = &["one_time", "monthly", "quarterly", "annual"];

#[derive(Debug, thiserror::Error)]
pub enum SchoolServiceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Database manager error: {0}")]
    DatabaseManager(#[from] DatabaseError),
    #[error("School not found: {0}")]
    SchoolNotFound(Uuid),
    #[error("Grade not found: {0}")]
    GradeNotFound(Uuid),
    #[error("Grade level {level} already exists in school {school_id}")]
    LevelTaken { school_id: Uuid, level: i32 },
    #[error("Invalid fee frequency: {0}")]
    InvalidFrequency(String),
    #[error("Amount must not be negative")]
    NegativeAmount,
}

impl From<SchoolServiceError> for ApiError {
    fn from(err: SchoolServiceError) -> Self {
        match err {
            SchoolServiceError::SchoolNotFound(_) | SchoolServiceError::GradeNotFound(_) => {
                ApiError::not_found(err.to_string())
            }
            SchoolServiceError::LevelTaken { .. } => ApiError::conflict(err.to_string()),
            SchoolServiceError::InvalidFrequency(_) | SchoolServiceError::NegativeAmount => {
                ApiError::validation_error(err.to_string(), None)
            }
            SchoolServiceError::Database(e) => e.into(),
            SchoolServiceError::DatabaseManager(e) => e.into(),
        }
    }
}

/// Directory of schools, grades, sections and students within a tenant
pub struct SchoolService {
    pool: PgPool,
}

impl SchoolService {
    pub async fn new() -> Result<Self, SchoolServiceError> {
        let pool = DatabaseManager::main_pool().await?;
        Ok(Self { pool })
    }

    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---- schools --------------------------------------------------------

    pub async fn create_school(&self, tenant_id: Uuid, name: &str) -> Result<School, SchoolServiceError> {
        let school = sqlx::query_as(
            r#"
            INSERT INTO schools (tenant_id, name)
            VALUES ($1, $2)
            RETURNING id, tenant_id, name, created_at, updated_at
            "#,
        )
        .bind(tenant_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(school)
    }

    pub async fn list_schools(&self, tenant_id: Uuid) -> Result<Vec<School>, SchoolServiceError> {
        let schools = sqlx::query_as(
            "SELECT id, tenant_id, name, created_at, updated_at FROM schools WHERE tenant_id = $1 ORDER BY name",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(schools)
    }

    pub async fn get_school(&self, tenant_id: Uuid, school_id: Uuid) -> Result<School, SchoolServiceError> {
        sqlx::query_as(
            "SELECT id, tenant_id, name, created_at, updated_at FROM schools WHERE id = $1 AND tenant_id = $2",
        )
        .bind(school_id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(SchoolServiceError::SchoolNotFound(school_id))
    }

    // ---- grades ---------------------------------------------------------

    /// Create a grade in a school. Levels are ordinal and unique per school.
    pub async fn create_grade(
        &self,
        tenant_id: Uuid,
        school_id: Uuid,
        name: &str,
        level: i32,
    ) -> Result<Grade, SchoolServiceError> {
        self.get_school(tenant_id, school_id).await?;

        let level_taken: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM grades WHERE school_id = $1 AND level = $2)")
                .bind(school_id)
                .bind(level)
                .fetch_one(&self.pool)
                .await?;
        if level_taken.0 {
            return Err(SchoolServiceError::LevelTaken { school_id, level });
        }

        let grade = sqlx::query_as(
            r#"
            INSERT INTO grades (school_id, name, level)
            VALUES ($1, $2, $3)
            RETURNING id, school_id, name, level, created_at, updated_at
            "#,
        )
        .bind(school_id)
        .bind(name)
        .bind(level)
        .fetch_one(&self.pool)
        .await?;

        Ok(grade)
    }

    pub async fn list_grades(&self, tenant_id: Uuid, school_id: Uuid) -> Result<Vec<Grade>, SchoolServiceError> {
        self.get_school(tenant_id, school_id).await?;

        let grades = sqlx::query_as(
            "SELECT id, school_id, name, level, created_at, updated_at FROM grades WHERE school_id = $1 ORDER BY level",
        )
        .bind(school_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(grades)
    }

    pub async fn get_grade(&self, tenant_id: Uuid, grade_id: Uuid) -> Result<Grade, SchoolServiceError> {
        sqlx::query_as(
            r#"
            SELECT g.id, g.school_id, g.name, g.level, g.created_at, g.updated_at
            FROM grades g
            JOIN schools s ON s.id = g.school_id
            WHERE g.id = $1 AND s.tenant_id = $2
            "#,
        )
        .bind(grade_id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(SchoolServiceError::GradeNotFound(grade_id))
    }

    // ---- sections -------------------------------------------------------

    pub async fn create_section(&self, tenant_id: Uuid, grade_id: Uuid, name: &str) -> Result<Section, SchoolServiceError> {
        self.get_grade(tenant_id, grade_id).await?;

        let section = sqlx::query_as(
            r#"
            INSERT INTO sections (grade_id, name, is_active)
            VALUES ($1, $2, true)
            RETURNING id, grade_id, name, is_active, created_at, updated_at
            "#,
        )
        .bind(grade_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(section)
    }

    pub async fn list_sections(&self, tenant_id: Uuid, grade_id: Uuid) -> Result<Vec<Section>, SchoolServiceError> {
        self.get_grade(tenant_id, grade_id).await?;

        let sections = sqlx::query_as(
            "SELECT id, grade_id, name, is_active, created_at, updated_at FROM sections WHERE grade_id = $1 ORDER BY name",
        )
        .bind(grade_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sections)
    }

    // ---- fee structures -------------------------------------------------

    /// Create a fee structure for a grade.
    pub async fn create_fee_structure(
        &self,
        tenant_id: Uuid,
        grade_id: Uuid,
        name: &str,
        amount: &BigDecimal,
        frequency: &str,
    ) -> Result<FeeStructure, SchoolServiceError> {
        self.get_grade(tenant_id, grade_id).await?;

        if !FEE_FREQUENCIES.contains(&frequency) {
            return Err(SchoolServiceError::InvalidFrequency(frequency.to_string()));
        }
        if amount < &BigDecimal::from(0) {
            return Err(SchoolServiceError::NegativeAmount);
        }

        let fee = sqlx::query_as(
            r#"
            INSERT INTO fee_structures (grade_id, name, amount, frequency)
            VALUES ($1, $2, $3, $4)
            RETURNING id, grade_id, name, amount, frequency, created_at, updated_at
            "#,
        )
        .bind(grade_id)
        .bind(name)
        .bind(amount)
        .bind(frequency)
        .fetch_one(&self.pool)
        .await?;

        Ok(fee)
    }

    pub async fn list_fee_structures(
        &self,
        tenant_id: Uuid,
        grade_id: Uuid,
    ) -> Result<Vec<FeeStructure>, SchoolServiceError> {
        self.get_grade(tenant_id, grade_id).await?;

        let fees = sqlx::query_as(
            r#"
            SELECT id, grade_id, name, amount, frequency, created_at, updated_at
            FROM fee_structures
            WHERE grade_id = $1
            ORDER BY name
            "#,
        )
        .bind(grade_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(fees)
    }

    // ---- transport routes -----------------------------------------------

    pub async fn create_transport_route(
        &self,
        tenant_id: Uuid,
        school_id: Uuid,
        name: &str,
        description: Option<&str>,
        monthly_fee: &BigDecimal,
    ) -> Result<TransportRoute, SchoolServiceError> {
        self.get_school(tenant_id, school_id).await?;

        if monthly_fee < &BigDecimal::from(0) {
            return Err(SchoolServiceError::NegativeAmount);
        }

        let route = sqlx::query_as(
            r#"
            INSERT INTO transport_routes (school_id, name, description, monthly_fee)
            VALUES ($1, $2, $3, $4)
            RETURNING id, school_id, name, description, monthly_fee, created_at, updated_at
            "#,
        )
        .bind(school_id)
        .bind(name)
        .bind(description)
        .bind(monthly_fee)
        .fetch_one(&self.pool)
        .await?;

        Ok(route)
    }

    pub async fn list_transport_routes(
        &self,
        tenant_id: Uuid,
        school_id: Uuid,
    ) -> Result<Vec<TransportRoute>, SchoolServiceError> {
        self.get_school(tenant_id, school_id).await?;

        let routes = sqlx::query_as(
            r#"
            SELECT id, school_id, name, description, monthly_fee, created_at, updated_at
            FROM transport_routes
            WHERE school_id = $1
            ORDER BY name
            "#,
        )
        .bind(school_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(routes)
    }

    // ---- students -------------------------------------------------------

    pub async fn create_student(
        &self,
        tenant_id: Uuid,
        first_name: &str,
        last_name: &str,
    ) -> Result<Student, SchoolServiceError> {
        let student = sqlx::query_as(
            r#"
            INSERT INTO students (tenant_id, first_name, last_name)
            VALUES ($1, $2, $3)
            RETURNING id, tenant_id, school_id, first_name, last_name, created_at, updated_at
            "#,
        )
        .bind(tenant_id)
        .bind(first_name)
        .bind(last_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(student)
    }

    pub async fn list_students(
        &self,
        tenant_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Student>, SchoolServiceError> {
        let students = sqlx::query_as(
            r#"
            SELECT id, tenant_id, school_id, first_name, last_name, created_at, updated_at
            FROM students
            WHERE tenant_id = $1
            ORDER BY last_name, first_name
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(tenant_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }
}
