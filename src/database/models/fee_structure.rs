use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FeeStructure {
    pub id: Uuid,
    pub grade_id: Uuid,
    pub name: String,
    pub amount: BigDecimal,
    // One of: one_time, monthly, quarterly, annual
    pub frequency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
