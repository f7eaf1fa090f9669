//! Signal bundle assembly — turns raw profile/repo data into the normalized
//! facts the deriver consumes, with a deterministic synthetic fallback.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::github::client::{GithubClient, GithubRepo, GithubUser};

/// Number of top-starred repositories carried into the report.
const TOP_REPO_COUNT: usize = 5;

/// Normalized facts extracted from a candidate's public GitHub footprint.
/// Produced fresh per scan; never persisted directly — only derived outputs
/// survive into the report.
///
/// Invariant: `recent_repo_count <= own_repo_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubSignalBundle {
    pub username: String,
    /// Non-fork repositories only. Forks are excluded from every aggregate.
    pub own_repo_count: u32,
    pub languages: BTreeSet<String>,
    /// Sum of each non-fork repo's reported size metric. A proxy for commit
    /// volume, not a commit count.
    pub total_size_units: u64,
    /// Non-fork repos touched within the trailing 6-month window.
    pub recent_repo_count: u32,
    pub total_stars: u64,
    pub total_forks_received: u64,
    pub followers: u32,
    /// Profile record; `None` when the upstream source was unavailable.
    pub raw_user: Option<GithubUser>,
}

impl GithubSignalBundle {
    /// Capped heuristic estimate of commit volume from repo sizes.
    /// Explicitly an approximation — do not read as a real commit count.
    pub fn estimated_commit_volume(&self) -> u32 {
        let rounded = (self.total_size_units + 25) / 50;
        rounded.min(500) as u32
    }
}

/// Output of one collection pass. `source_is_live` distinguishes real data
/// from the synthetic fallback so consumers and tests can assert which path
/// produced a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectedSignals {
    pub bundle: GithubSignalBundle,
    /// Top non-fork repositories by stars, for report metadata.
    pub top_repos: Vec<GithubRepo>,
    pub source_is_live: bool,
}

/// Collects profile + repository signals for `username`.
///
/// Issues the profile and repo fetches concurrently and joins both; either
/// failing fails the whole collection over to the synthetic bundle. This
/// function is total: it always returns a usable bundle.
pub async fn collect(client: &GithubClient, username: &str) -> CollectedSignals {
    match tokio::try_join!(client.fetch_user(username), client.fetch_repos(username)) {
        Ok((user, repos)) => {
            let (bundle, top_repos) = aggregate(username, user, repos, Utc::now());
            info!(
                "Live GitHub data for {username}: {} repos, {} langs, ~{} est. commits",
                bundle.own_repo_count,
                bundle.languages.len(),
                bundle.estimated_commit_volume()
            );
            CollectedSignals {
                bundle,
                top_repos,
                source_is_live: true,
            }
        }
        Err(err) => {
            warn!("GitHub fetch failed for {username}, using synthetic fallback: {err}");
            CollectedSignals {
                bundle: synthetic_bundle(username),
                top_repos: Vec::new(),
                source_is_live: false,
            }
        }
    }
}

/// Pure aggregation of a live fetch into a bundle plus top-repo metadata.
/// Split out from `collect` so the window logic is testable with a fixed
/// wall-clock.
fn aggregate(
    username: &str,
    user: GithubUser,
    repos: Vec<GithubRepo>,
    now: DateTime<Utc>,
) -> (GithubSignalBundle, Vec<GithubRepo>) {
    let mut own_repos: Vec<GithubRepo> = repos.into_iter().filter(|r| !r.fork).collect();

    let languages: BTreeSet<String> = own_repos
        .iter()
        .filter_map(|r| r.language.clone())
        .collect();

    let total_size_units: u64 = own_repos.iter().map(|r| r.size).sum();
    let total_stars: u64 = own_repos.iter().map(|r| r.stargazers_count).sum();
    let total_forks_received: u64 = own_repos.iter().map(|r| r.forks_count).sum();

    let window_start = now - Duration::days(183);
    let recent_repo_count = own_repos
        .iter()
        .filter(|r| r.updated_at > window_start)
        .count() as u32;

    let bundle = GithubSignalBundle {
        username: username.to_string(),
        own_repo_count: own_repos.len() as u32,
        languages,
        total_size_units,
        recent_repo_count,
        total_stars,
        total_forks_received,
        followers: user.followers,
        raw_user: Some(user),
    };

    own_repos.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    own_repos.truncate(TOP_REPO_COUNT);

    (bundle, own_repos)
}

/// Deterministic synthetic bundle seeded by the username length, so retries
/// for the same username are stable. Used whenever the live fetch fails;
/// the pipeline always produces a report.
pub fn synthetic_bundle(username: &str) -> GithubSignalBundle {
    let seed = username.len() as u64;

    let own_repo_count = (3 + seed % 12) as u32;
    let recency_pct = 40 + (seed * 9) % 60;
    // Floor division keeps the recent <= own invariant for any seed.
    let recent_repo_count = (own_repo_count as u64 * recency_pct / 100) as u32;

    // Sized so the commit-volume estimate lands at 20 + (seed*7 % 220).
    let total_size_units = (20 + (seed * 7) % 220) * 50;

    GithubSignalBundle {
        username: username.to_string(),
        own_repo_count,
        languages: ["TypeScript", "Python", "SQL"]
            .into_iter()
            .map(str::to_string)
            .collect(),
        total_size_units,
        recent_repo_count,
        total_stars: 5 + (seed * 11) % 45,
        total_forks_received: (seed * 13) % 12,
        followers: ((35 + (seed * 13) % 65) / 2) as u32,
        raw_user: None,
    }
}
