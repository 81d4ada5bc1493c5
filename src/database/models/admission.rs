use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Admission {
    pub id: Uuid,
    pub student_id: Uuid,
    pub school_id: Uuid,
    pub grade_id: Uuid,
    pub admission_date: NaiveDate,
    // One of the AdmissionStatus storage strings
    pub status: String,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
