//! Report persistence boundary. Reports are insert-once, read-many:
//! there is no update path.

use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::Session;
use crate::models::report::ReportSummaryRow;
use crate::report::assembler::CandidateReport;

pub async fn insert_report(
    pool: &PgPool,
    report: &CandidateReport,
    owner: &Session,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO reports \
         (id, owner_id, owner_role, username, candidate_name, score, \
          authenticity_level, source_is_live, report, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
    )
    .bind(report.id)
    .bind(owner.owner_id)
    .bind(owner.role.as_str())
    .bind(&report.username)
    .bind(&report.name)
    .bind(report.score as i32)
    .bind(report.authenticity_level.to_string())
    .bind(report.source_is_live)
    .bind(Json(report))
    .bind(report.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn get_report(pool: &PgPool, id: Uuid) -> Result<Option<CandidateReport>, sqlx::Error> {
    let row: Option<Json<CandidateReport>> =
        sqlx::query_scalar("SELECT report FROM reports WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

    Ok(row.map(|json| json.0))
}

/// All reports owned by `owner_id`, newest first.
pub async fn list_reports_by_owner(
    pool: &PgPool,
    owner_id: Uuid,
) -> Result<Vec<ReportSummaryRow>, sqlx::Error> {
    sqlx::query_as::<_, ReportSummaryRow>(
        "SELECT id, username, candidate_name, score, authenticity_level, \
                source_is_live, created_at \
         FROM reports WHERE owner_id = $1 ORDER BY created_at DESC",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await
}
