//! Report Assembler — pure merge of signals, score, and insights into the
//! one artifact that gets persisted and rendered. Fails only when a required
//! identity field is structurally absent; never produces a partial report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::github::CollectedSignals;
use crate::insights::AiInsights;
use crate::scoring::derive::sub_scores;
use crate::scoring::{AuthenticityLevel, ScoreResult, Skills};

/// Candidate profile block carried into the report when the live fetch
/// succeeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubProfile {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub html_url: String,
    pub bio: Option<String>,
    pub followers: u32,
    pub following: u32,
    pub public_repos: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopRepo {
    pub name: String,
    pub stars: u64,
    pub description: Option<String>,
    pub language: Option<String>,
    pub url: String,
    pub last_updated: DateTime<Utc>,
}

/// Monitoring metrics block — the sub-scores display surfaces recompute
/// signal tiers from. `estimated_commit_volume` is named as the proxy it
/// is; there is no real commit count anywhere in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubMonitoring {
    pub username: String,
    pub repo_count: u32,
    pub estimated_commit_volume: u32,
    pub contribution_consistency: u32,
    pub complexity_score: u32,
    pub collaboration_score: u32,
}

/// The persisted, immutable-once-created aggregate: score + skills +
/// insights + repo metadata + identity. Every consumer-required field is
/// present — list fields are empty rather than omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateReport {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub profile_url: String,
    pub score: u32,
    pub authenticity_level: AuthenticityLevel,
    pub skills: Skills,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub risks: Vec<String>,
    pub questions: Vec<String>,
    /// False when the signal bundle came from the synthetic fallback.
    pub source_is_live: bool,
    pub github_profile: Option<GithubProfile>,
    pub top_repos: Vec<TopRepo>,
    pub github_monitoring: GithubMonitoring,
    pub created_at: DateTime<Utc>,
}

/// Merges one scan's outputs into a report. No network, no recomputation —
/// the only failure is a structurally absent username.
pub fn assemble(
    signals: &CollectedSignals,
    result: &ScoreResult,
    insights: AiInsights,
    display_name: Option<String>,
) -> Result<CandidateReport, AppError> {
    let bundle = &signals.bundle;
    let username = bundle.username.trim();
    if username.is_empty() {
        return Err(AppError::Validation(
            "cannot assemble a report without a username".to_string(),
        ));
    }

    let github_profile = bundle.raw_user.as_ref().map(|user| GithubProfile {
        login: user.login.clone(),
        name: user.name.clone(),
        avatar_url: user.avatar_url.clone(),
        html_url: user.html_url.clone(),
        bio: user.bio.clone(),
        followers: user.followers,
        following: user.following,
        public_repos: user.public_repos,
        created_at: user.created_at,
    });

    let name = display_name
        .filter(|n| !n.trim().is_empty())
        .or_else(|| github_profile.as_ref().and_then(|p| p.name.clone()))
        .unwrap_or_else(|| username.to_string());

    let profile_url = github_profile
        .as_ref()
        .map(|p| p.html_url.clone())
        .unwrap_or_else(|| format!("https://github.com/{username}"));

    let top_repos = signals
        .top_repos
        .iter()
        .map(|repo| TopRepo {
            name: repo.name.clone(),
            stars: repo.stargazers_count,
            description: repo.description.clone(),
            language: repo.language.clone(),
            url: repo.html_url.clone(),
            last_updated: repo.updated_at,
        })
        .collect();

    let subs = sub_scores(bundle);
    let github_monitoring = GithubMonitoring {
        username: username.to_string(),
        repo_count: bundle.own_repo_count,
        estimated_commit_volume: bundle.estimated_commit_volume(),
        contribution_consistency: subs.consistency,
        complexity_score: subs.complexity,
        collaboration_score: subs.collaboration,
    };

    Ok(CandidateReport {
        id: Uuid::new_v4(),
        name,
        username: username.to_string(),
        profile_url,
        score: result.score,
        authenticity_level: result.authenticity_level,
        skills: result.skills,
        strengths: insights.strengths,
        weaknesses: insights.weaknesses,
        risks: insights.risks,
        questions: insights.questions,
        source_is_live: signals.source_is_live,
        github_profile,
        top_repos,
        github_monitoring,
        created_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::collector::synthetic_bundle;
    use crate::scoring::derive;

    fn fallback_signals(username: &str) -> CollectedSignals {
        CollectedSignals {
            bundle: synthetic_bundle(username),
            top_repos: Vec::new(),
            source_is_live: false,
        }
    }

    #[test]
    fn test_assemble_produces_complete_report_from_fallback_data() {
        let signals = fallback_signals("alice");
        let result = derive(&signals.bundle);

        let report = assemble(&signals, &result, AiInsights::fallback(), None).unwrap();

        assert_eq!(report.username, "alice");
        assert_eq!(report.name, "alice"); // no profile, no display name
        assert_eq!(report.profile_url, "https://github.com/alice");
        assert!(!report.source_is_live);
        assert!(report.github_profile.is_none());
        assert!(report.top_repos.is_empty());
        assert!(!report.strengths.is_empty());
        assert_eq!(report.score, result.score);
        assert_eq!(report.authenticity_level, result.authenticity_level);
        assert_eq!(
            report.github_monitoring.estimated_commit_volume,
            signals.bundle.estimated_commit_volume()
        );
    }

    #[test]
    fn test_assemble_rejects_empty_username() {
        let mut signals = fallback_signals("alice");
        signals.bundle.username = "   ".to_string();
        let result = derive(&signals.bundle);

        let err = assemble(&signals, &result, AiInsights::fallback(), None).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_display_name_overrides_profile_name() {
        let signals = fallback_signals("alice");
        let result = derive(&signals.bundle);

        let report = assemble(
            &signals,
            &result,
            AiInsights::fallback(),
            Some("Alice Example".to_string()),
        )
        .unwrap();

        assert_eq!(report.name, "Alice Example");
    }

    #[test]
    fn test_rescan_creates_distinct_report_ids() {
        let signals = fallback_signals("alice");
        let result = derive(&signals.bundle);

        let first = assemble(&signals, &result, AiInsights::fallback(), None).unwrap();
        let second = assemble(&signals, &result, AiInsights::fallback(), None).unwrap();

        assert_ne!(first.id, second.id);
        // Both internally consistent against the same bundle.
        assert_eq!(first.score, second.score);
        assert_eq!(first.skills, second.skills);
    }

    #[test]
    fn test_report_round_trips_through_json() {
        let signals = fallback_signals("alice");
        let result = derive(&signals.bundle);
        let report = assemble(&signals, &result, AiInsights::fallback(), None).unwrap();

        let value = serde_json::to_value(&report).unwrap();
        let back: CandidateReport = serde_json::from_value(value).unwrap();
        assert_eq!(back.id, report.id);
        assert_eq!(back.score, report.score);
        assert_eq!(back.questions, report.questions);
    }
}
