//! Axum route handlers for the scan/report API.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::{resolve_session, Session, SessionResolution};
use crate::errors::AppError;
use crate::github::collect;
use crate::insights::{CandidateSnapshot, InterviewProfile};
use crate::models::report::ReportSummaryRow;
use crate::report::assembler::{assemble, CandidateReport};
use crate::report::store;
use crate::scoring::derive;
use crate::scoring::derived::{
    confidence_band, evidence_signals, score_breakdown, AuthenticityLevel, EvidenceInputs,
    EvidenceSignal, ScoreBreakdown,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub username: String,
    /// Optional recruiter-supplied display name; defaults to the GitHub
    /// profile name, then the username.
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub confidence: AuthenticityLevel,
    pub signals: Vec<EvidenceSignal>,
    pub breakdown: ScoreBreakdown,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/scan
///
/// Full pipeline: collect signals → derive score → generate insights →
/// assemble → persist. Signal collection and insight generation both fall
/// back internally, so this either returns a complete report or a
/// structural error — never an upstream one.
pub async fn handle_scan(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ScanRequest>,
) -> Result<Json<CandidateReport>, AppError> {
    let username = request.username.trim();
    if username.is_empty() {
        return Err(AppError::Validation("username cannot be empty".to_string()));
    }
    if username.contains(['/', ' ']) {
        return Err(AppError::Validation(
            "username must be a bare GitHub handle".to_string(),
        ));
    }

    let session = require_session(&state, &headers).await?;

    let signals = collect(&state.github, username).await;
    let result = derive(&signals.bundle);

    // Score is final before the generative step; its failure can only
    // affect the narrative lists, never the score.
    let snapshot = CandidateSnapshot {
        name: request.name.clone().unwrap_or_else(|| username.to_string()),
        username: username.to_string(),
        score: result.score,
        skills: result.skills,
        languages: signals.bundle.languages.iter().cloned().collect(),
        repo_count: signals.bundle.own_repo_count,
        estimated_commit_volume: signals.bundle.estimated_commit_volume(),
    };
    let insights = state.insights.generate_insights(&snapshot).await;

    let report = assemble(&signals, &result, insights, request.name)?;
    store::insert_report(&state.db, &report, &session).await?;

    info!(
        "Scanned {username}: score={} level={} live={}",
        report.score, report.authenticity_level, report.source_is_live
    );

    Ok(Json(report))
}

/// GET /api/v1/candidate/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CandidateReport>, AppError> {
    let report = store::get_report(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Report {id} not found")))?;

    Ok(Json(report))
}

/// GET /api/v1/candidates
///
/// The caller's reports, newest first.
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ReportSummaryRow>>, AppError> {
    let session = require_session(&state, &headers).await?;
    let reports = store::list_reports_by_owner(&state.db, session.owner_id).await?;
    Ok(Json(reports))
}

/// GET /api/v1/candidate/:id/metrics
///
/// Presentation metrics recomputed from the stored report through the
/// shared derivation module — every view reads these, none recompute
/// thresholds locally.
pub async fn handle_candidate_metrics(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MetricsResponse>, AppError> {
    let report = store::get_report(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Report {id} not found")))?;

    let monitoring = &report.github_monitoring;
    let signals = evidence_signals(EvidenceInputs {
        score: report.score,
        contribution_consistency: monitoring.contribution_consistency,
        complexity: monitoring.complexity_score,
        collaboration: monitoring.collaboration_score,
        top_repo_count: report.top_repos.len(),
    });

    Ok(Json(MetricsResponse {
        confidence: confidence_band(report.score),
        signals,
        breakdown: score_breakdown(report.score),
    }))
}

/// POST /api/v1/interview-questions
///
/// Tailored interview questions for an already-scored candidate; always
/// responds with 1–8 questions (fallback set on any generation failure).
pub async fn handle_interview_questions(
    State(state): State<AppState>,
    Json(profile): Json<InterviewProfile>,
) -> Result<Json<QuestionsResponse>, AppError> {
    if profile.name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }

    let questions = state.insights.generate_interview_questions(&profile).await;
    Ok(Json(QuestionsResponse { questions }))
}

async fn require_session(state: &AppState, headers: &HeaderMap) -> Result<Session, AppError> {
    match resolve_session(&state.session_providers, headers).await {
        SessionResolution::Authenticated(session) => Ok(session),
        _ => Err(AppError::Unauthorized),
    }
}
