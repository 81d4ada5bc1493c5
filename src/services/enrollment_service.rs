use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Admission, Enrollment, Section, Student};
use crate::enrollment::{AdmissionAction, AdmissionSideEffect, AdmissionStatus, EnrollmentAction, EnrollmentStatus, TransitionError};
use crate::error::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum EnrollmentServiceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Database manager error: {0}")]
    DatabaseManager(#[from] DatabaseError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("Student not found: {0}")]
    StudentNotFound(Uuid),
    #[error("School not found: {0}")]
    SchoolNotFound(Uuid),
    #[error("Grade not found: {0}")]
    GradeNotFound(Uuid),
    #[error("Section not found: {0}")]
    SectionNotFound(Uuid),
    #[error("Section is not active: {0}")]
    SectionInactive(Uuid),
    #[error("Student {student_id} already has an active enrollment in section {section_id}")]
    AlreadyEnrolled { student_id: Uuid, section_id: Uuid },
}

impl From<EnrollmentServiceError> for ApiError {
    fn from(err: EnrollmentServiceError) -> Self {
        match err {
            EnrollmentServiceError::Transition(e) => e.into(),
            EnrollmentServiceError::StudentNotFound(_)
            | EnrollmentServiceError::SchoolNotFound(_)
            | EnrollmentServiceError::GradeNotFound(_)
            | EnrollmentServiceError::SectionNotFound(_) => ApiError::not_found(err.to_string()),
            EnrollmentServiceError::SectionInactive(_) => ApiError::bad_request(err.to_string()),
            EnrollmentServiceError::AlreadyEnrolled { .. } => ApiError::conflict(err.to_string()),
            EnrollmentServiceError::Database(e) => e.into(),
            EnrollmentServiceError::DatabaseManager(e) => e.into(),
        }
    }
}

/// Admission workflow and section enrollments. Status changes go through
/// the transition tables in `crate::enrollment`; this service only loads
/// current state and executes the accepted outcome.
pub struct EnrollmentService {
    pool: PgPool,
}

impl EnrollmentService {
    pub async fn new() -> Result<Self, EnrollmentServiceError> {
        let pool = DatabaseManager::main_pool().await?;
        Ok(Self { pool })
    }

    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---- admissions -----------------------------------------------------

    /// Create a pending admission for a student into a school and grade.
    pub async fn create_admission(
        &self,
        tenant_id: Uuid,
        student_id: Uuid,
        school_id: Uuid,
        grade_id: Uuid,
        admission_date: NaiveDate,
        remarks: Option<&str>,
    ) -> Result<Admission, EnrollmentServiceError> {
        self.get_student(tenant_id, student_id).await?;

        let school_exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM schools WHERE id = $1 AND tenant_id = $2)")
                .bind(school_id)
                .bind(tenant_id)
                .fetch_one(&self.pool)
                .await?;
        if !school_exists.0 {
            return Err(EnrollmentServiceError::SchoolNotFound(school_id));
        }

        let grade_exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM grades WHERE id = $1 AND school_id = $2)")
                .bind(grade_id)
                .bind(school_id)
                .fetch_one(&self.pool)
                .await?;
        if !grade_exists.0 {
            return Err(EnrollmentServiceError::GradeNotFound(grade_id));
        }

        let admission = sqlx::query_as(
            r#"
            INSERT INTO admissions (student_id, school_id, grade_id, admission_date, status, remarks)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, student_id, school_id, grade_id, admission_date, status, remarks, created_at, updated_at
            "#,
        )
        .bind(student_id)
        .bind(school_id)
        .bind(grade_id)
        .bind(admission_date)
        .bind(AdmissionStatus::Pending.as_str())
        .bind(remarks)
        .fetch_one(&self.pool)
        .await?;

        Ok(admission)
    }

    /// Apply an approve/reject action to an admission. Approval also
    /// assigns the student to the admitting school; both writes commit in
    /// one transaction. Illegal transitions leave the rows untouched.
    pub async fn transition_admission(
        &self,
        tenant_id: Uuid,
        admission_id: Uuid,
        action: AdmissionAction,
    ) -> Result<Admission, EnrollmentServiceError> {
        let admission = self.get_admission(tenant_id, admission_id).await?;

        let current: AdmissionStatus = admission.status.parse()?;
        let transition = current.apply(action)?;

        let mut tx = self.pool.begin().await?;

        let updated: Admission = sqlx::query_as(
            r#"
            UPDATE admissions
            SET status = $1, updated_at = now()
            WHERE id = $2
            RETURNING id, student_id, school_id, grade_id, admission_date, status, remarks, created_at, updated_at
            "#,
        )
        .bind(transition.status.as_str())
        .bind(admission_id)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(AdmissionSideEffect::SetStudentSchool) = transition.side_effect {
            sqlx::query("UPDATE students SET school_id = $1, updated_at = now() WHERE id = $2")
                .bind(admission.school_id)
                .bind(admission.student_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(
            "Admission {} transitioned {} -> {} via {}",
            admission_id,
            current,
            transition.status,
            action
        );
        Ok(updated)
    }

    pub async fn get_admission(&self, tenant_id: Uuid, admission_id: Uuid) -> Result<Admission, EnrollmentServiceError> {
        sqlx::query_as(
            r#"
            SELECT a.id, a.student_id, a.school_id, a.grade_id, a.admission_date, a.status, a.remarks,
                   a.created_at, a.updated_at
            FROM admissions a
            JOIN students s ON s.id = a.student_id
            WHERE a.id = $1 AND s.tenant_id = $2
            "#,
        )
        .bind(admission_id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| TransitionError::NotFound(format!("admission {}", admission_id)).into())
    }

    pub async fn list_admissions(
        &self,
        tenant_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Admission>, EnrollmentServiceError> {
        let admissions = sqlx::query_as(
            r#"
            SELECT a.id, a.student_id, a.school_id, a.grade_id, a.admission_date, a.status, a.remarks,
                   a.created_at, a.updated_at
            FROM admissions a
            JOIN students s ON s.id = a.student_id
            WHERE s.tenant_id = $1
            ORDER BY a.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(tenant_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(admissions)
    }

    // ---- enrollments ----------------------------------------------------

    /// Enroll a student into a section. The section must exist, belong to
    /// the tenant, and be active; one active enrollment per (student,
    /// section) is enforced here and by a partial unique index.
    pub async fn create_enrollment(
        &self,
        tenant_id: Uuid,
        section_id: Uuid,
        student_id: Uuid,
    ) -> Result<Enrollment, EnrollmentServiceError> {
        self.get_student(tenant_id, student_id).await?;

        let section = self.get_section(tenant_id, section_id).await?;
        if !section.is_active {
            return Err(EnrollmentServiceError::SectionInactive(section_id));
        }

        let already_active: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM enrollments WHERE student_id = $1 AND section_id = $2 AND status = 'active')",
        )
        .bind(student_id)
        .bind(section_id)
        .fetch_one(&self.pool)
        .await?;
        if already_active.0 {
            return Err(EnrollmentServiceError::AlreadyEnrolled { student_id, section_id });
        }

        let enrollment = sqlx::query_as(
            r#"
            INSERT INTO enrollments (section_id, student_id, enrolled_at, status)
            VALUES ($1, $2, now(), $3)
            RETURNING id, section_id, student_id, enrolled_at, status, created_at, updated_at
            "#,
        )
        .bind(section_id)
        .bind(student_id)
        .bind(EnrollmentStatus::Active.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(enrollment)
    }

    /// Apply a withdraw/transfer action to an enrollment.
    pub async fn transition_enrollment(
        &self,
        tenant_id: Uuid,
        enrollment_id: Uuid,
        action: EnrollmentAction,
    ) -> Result<Enrollment, EnrollmentServiceError> {
        let enrollment = self.get_enrollment(tenant_id, enrollment_id).await?;

        let current: EnrollmentStatus = enrollment.status.parse()?;
        let next = current.apply(action)?;

        let updated = sqlx::query_as(
            r#"
            UPDATE enrollments
            SET status = $1, updated_at = now()
            WHERE id = $2
            RETURNING id, section_id, student_id, enrolled_at, status, created_at, updated_at
            "#,
        )
        .bind(next.as_str())
        .bind(enrollment_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("Enrollment {} transitioned {} -> {} via {}", enrollment_id, current, next, action);
        Ok(updated)
    }

    pub async fn get_enrollment(&self, tenant_id: Uuid, enrollment_id: Uuid) -> Result<Enrollment, EnrollmentServiceError> {
        sqlx::query_as(
            r#"
            SELECT e.id, e.section_id, e.student_id, e.enrolled_at, e.status, e.created_at, e.updated_at
            FROM enrollments e
            JOIN students s ON s.id = e.student_id
            WHERE e.id = $1 AND s.tenant_id = $2
            "#,
        )
        .bind(enrollment_id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| TransitionError::NotFound(format!("enrollment {}", enrollment_id)).into())
    }

    pub async fn list_enrollments(
        &self,
        tenant_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Enrollment>, EnrollmentServiceError> {
        let enrollments = sqlx::query_as(
            r#"
            SELECT e.id, e.section_id, e.student_id, e.enrolled_at, e.status, e.created_at, e.updated_at
            FROM enrollments e
            JOIN students s ON s.id = e.student_id
            WHERE s.tenant_id = $1
            ORDER BY e.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(tenant_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(enrollments)
    }

    // ---- lookups --------------------------------------------------------

    async fn get_student(&self, tenant_id: Uuid, student_id: Uuid) -> Result<Student, EnrollmentServiceError> {
        sqlx::query_as(
            r#"
            SELECT id, tenant_id, school_id, first_name, last_name, created_at, updated_at
            FROM students
            WHERE id = $1 AND tenant_id = $2
            "#,
        )
        .bind(student_id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(EnrollmentServiceError::StudentNotFound(student_id))
    }

    async fn get_section(&self, tenant_id: Uuid, section_id: Uuid) -> Result<Section, EnrollmentServiceError> {
        sqlx::query_as(
            r#"
            SELECT sec.id, sec.grade_id, sec.name, sec.is_active, sec.created_at, sec.updated_at
            FROM sections sec
            JOIN grades g ON g.id = sec.grade_id
            JOIN schools sch ON sch.id = g.school_id
            WHERE sec.id = $1 AND sch.tenant_id = $2
            "#,
        )
        .bind(section_id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(EnrollmentServiceError::SectionNotFound(section_id))
    }
}
