use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Dashboard listing row — the columns promoted out of the report JSON so
/// owner listings never deserialize full reports.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReportSummaryRow {
    pub id: Uuid,
    pub username: String,
    pub candidate_name: String,
    pub score: i32,
    pub authenticity_level: String,
    pub source_is_live: bool,
    pub created_at: DateTime<Utc>,
}
