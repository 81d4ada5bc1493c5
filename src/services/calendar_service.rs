use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::calendar::{
    plan_activation, validate_session_period, validate_sub_period, ActivationPlan, CalendarError, DateRange,
    ExistingSession, SessionCandidate, SubPeriod,
};
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{AcademicSession, Holiday, Term};
use crate::error::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum CalendarServiceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Database manager error: {0}")]
    DatabaseManager(#[from] DatabaseError),
    #[error(transparent)]
    Validation(#[from] CalendarError),
    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),
}

impl From<CalendarServiceError> for ApiError {
    fn from(err: CalendarServiceError) -> Self {
        match err {
            CalendarServiceError::Validation(e) => e.into(),
            CalendarServiceError::SessionNotFound(id) => ApiError::not_found(format!("Session not found: {}", id)),
            CalendarServiceError::Database(e) => e.into(),
            CalendarServiceError::DatabaseManager(e) => e.into(),
        }
    }
}

/// Academic sessions, terms and holidays for a tenant. All writes go
/// through the pure validators in `crate::calendar` first.
pub struct CalendarService {
    pool: PgPool,
}

impl CalendarService {
    pub async fn new() -> Result<Self, CalendarServiceError> {
        let pool = DatabaseManager::main_pool().await?;
        Ok(Self { pool })
    }

    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_sessions(&self, tenant_id: Uuid) -> Result<Vec<AcademicSession>, CalendarServiceError> {
        let sessions = sqlx::query_as(
            r#"
            SELECT id, tenant_id, name, start_date, end_date, is_active, created_at, updated_at
            FROM academic_sessions
            WHERE tenant_id = $1
            ORDER BY start_date DESC
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sessions)
    }

    pub async fn get_session(&self, tenant_id: Uuid, session_id: Uuid) -> Result<AcademicSession, CalendarServiceError> {
        sqlx::query_as(
            r#"
            SELECT id, tenant_id, name, start_date, end_date, is_active, created_at, updated_at
            FROM academic_sessions
            WHERE id = $1 AND tenant_id = $2
            "#,
        )
        .bind(session_id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(CalendarServiceError::SessionNotFound(session_id))
    }

    /// Create a session for a tenant. When the candidate is flagged active,
    /// sibling deactivation and the insert run in one transaction so the
    /// tenant never observes zero or two active sessions.
    pub async fn create_session(
        &self,
        tenant_id: Uuid,
        candidate: &SessionCandidate,
    ) -> Result<AcademicSession, CalendarServiceError> {
        let existing = self.existing_sessions(tenant_id).await?;
        let plan = validate_session_period(candidate, &existing)?;

        let mut tx = self.pool.begin().await?;
        Self::execute_plan(&mut tx, &plan).await?;

        let session: AcademicSession = sqlx::query_as(
            r#"
            INSERT INTO academic_sessions (tenant_id, name, start_date, end_date, is_active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, tenant_id, name, start_date, end_date, is_active, created_at, updated_at
            "#,
        )
        .bind(tenant_id)
        .bind(&candidate.name)
        .bind(candidate.start_date)
        .bind(candidate.end_date)
        .bind(candidate.is_active)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            "Created session '{}' ({}) for tenant {}, deactivated {} sibling(s)",
            session.name,
            session.id,
            tenant_id,
            plan.deactivate.len()
        );
        Ok(session)
    }

    /// Activate a stored session, deactivating every other active sibling
    /// in the same transaction.
    pub async fn activate_session(
        &self,
        tenant_id: Uuid,
        session_id: Uuid,
    ) -> Result<AcademicSession, CalendarServiceError> {
        let existing = self.existing_sessions(tenant_id).await?;
        if !existing.iter().any(|s| s.id == session_id) {
            return Err(CalendarServiceError::SessionNotFound(session_id));
        }

        let plan = plan_activation(session_id, &existing);

        let mut tx = self.pool.begin().await?;
        Self::execute_plan(&mut tx, &plan).await?;

        let session: AcademicSession = sqlx::query_as(
            r#"
            UPDATE academic_sessions
            SET is_active = true, updated_at = now()
            WHERE id = $1 AND tenant_id = $2
            RETURNING id, tenant_id, name, start_date, end_date, is_active, created_at, updated_at
            "#,
        )
        .bind(session_id)
        .bind(tenant_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(session)
    }

    pub async fn create_term(
        &self,
        tenant_id: Uuid,
        session_id: Uuid,
        name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Term, CalendarServiceError> {
        let session = self.get_session(tenant_id, session_id).await?;
        let bounds = Self::session_range(&session)?;
        validate_sub_period(SubPeriod::Term { start: start_date, end: end_date }, &bounds)?;

        let term = sqlx::query_as(
            r#"
            INSERT INTO terms (academic_session_id, name, start_date, end_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, academic_session_id, name, start_date, end_date, created_at, updated_at
            "#,
        )
        .bind(session_id)
        .bind(name)
        .bind(start_date)
        .bind(end_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(term)
    }

    pub async fn create_holiday(
        &self,
        tenant_id: Uuid,
        session_id: Uuid,
        name: &str,
        date: NaiveDate,
        description: Option<&str>,
    ) -> Result<Holiday, CalendarServiceError> {
        let session = self.get_session(tenant_id, session_id).await?;
        let bounds = Self::session_range(&session)?;
        validate_sub_period(SubPeriod::Holiday { date }, &bounds)?;

        let holiday = sqlx::query_as(
            r#"
            INSERT INTO holidays (academic_session_id, name, date, description)
            VALUES ($1, $2, $3, $4)
            RETURNING id, academic_session_id, name, date, description, created_at, updated_at
            "#,
        )
        .bind(session_id)
        .bind(name)
        .bind(date)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        Ok(holiday)
    }

    pub async fn list_terms(&self, tenant_id: Uuid, session_id: Uuid) -> Result<Vec<Term>, CalendarServiceError> {
        // Scope through the session so one tenant cannot read another's terms
        self.get_session(tenant_id, session_id).await?;

        let terms = sqlx::query_as(
            r#"
            SELECT id, academic_session_id, name, start_date, end_date, created_at, updated_at
            FROM terms
            WHERE academic_session_id = $1
            ORDER BY start_date
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(terms)
    }

    pub async fn list_holidays(&self, tenant_id: Uuid, session_id: Uuid) -> Result<Vec<Holiday>, CalendarServiceError> {
        self.get_session(tenant_id, session_id).await?;

        let holidays = sqlx::query_as(
            r#"
            SELECT id, academic_session_id, name, date, description, created_at, updated_at
            FROM holidays
            WHERE academic_session_id = $1
            ORDER BY date
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(holidays)
    }

    async fn existing_sessions(&self, tenant_id: Uuid) -> Result<Vec<ExistingSession>, CalendarServiceError> {
        let rows: Vec<(Uuid, bool)> =
            sqlx::query_as("SELECT id, is_active FROM academic_sessions WHERE tenant_id = $1")
                .bind(tenant_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(id, is_active)| ExistingSession { id, is_active })
            .collect())
    }

    async fn execute_plan(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        plan: &ActivationPlan,
    ) -> Result<(), CalendarServiceError> {
        if plan.is_empty() {
            return Ok(());
        }

        sqlx::query("UPDATE academic_sessions SET is_active = false, updated_at = now() WHERE id = ANY($1)")
            .bind(&plan.deactivate)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    fn session_range(session: &AcademicSession) -> Result<DateRange, CalendarServiceError> {
        // Stored sessions were validated on the way in; a violation here
        // means the row was edited out-of-band
        Ok(DateRange::new(session.start_date, session.end_date)?)
    }
}
