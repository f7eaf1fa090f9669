//! Score & Skill Deriver — pure, total, deterministic. Turns a signal
//! bundle into the bounded authenticity score and the 5-dimension skill
//! vector. No failure mode: any well-formed bundle produces a value.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::github::GithubSignalBundle;
use crate::scoring::derived::{confidence_band, AuthenticityLevel};

/// Fixed 5-key skill vector; each value independently clamped to [0,10].
/// No sum constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skills {
    pub frontend: u8,
    pub backend: u8,
    pub dsa: u8,
    pub system: u8,
    pub testing: u8,
}

impl Skills {
    pub fn as_array(&self) -> [u8; 5] {
        [self.frontend, self.backend, self.dsa, self.system, self.testing]
    }

    pub fn labels() -> [&'static str; 5] {
        ["frontend", "backend", "dsa", "system", "testing"]
    }
}

/// Output of one derivation. `authenticity_level` is always
/// `confidence_band(score)` — never set independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u32,
    pub authenticity_level: AuthenticityLevel,
    pub skills: Skills,
}

/// The intermediate 0–100 sub-scores the composite is blended from.
/// Also persisted into the report's monitoring block so display surfaces
/// can recompute signal tiers without re-deriving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubScores {
    pub activity: u32,
    pub complexity: u32,
    pub consistency: u32,
    pub collaboration: u32,
    pub originality: u32,
}

// Composite weights, in percent. Collaboration carries the least weight:
// followers are the easiest signal to inflate.
const WEIGHT_ACTIVITY: u64 = 30;
const WEIGHT_COMPLEXITY: u64 = 25;
const WEIGHT_CONSISTENCY: u64 = 20;
const WEIGHT_ORIGINALITY: u64 = 15;
const WEIGHT_COLLABORATION: u64 = 10;

/// Computes the 0–100 sub-scores from raw signals.
pub fn sub_scores(bundle: &GithubSignalBundle) -> SubScores {
    let own = bundle.own_repo_count as u64;
    let langs = bundle.languages.len() as u64;

    // 500 estimated commits (the cap) maps to a full activity score.
    let activity = (bundle.estimated_commit_volume() as u64 / 5).min(100);

    let complexity = (langs * 12 + bundle.total_stars * 2 + (own * 3).min(30)).min(100);

    let consistency = ((bundle.recent_repo_count as f64 / own.max(1) as f64) * 100.0)
        .round()
        .clamp(0.0, 100.0) as u64;

    let collaboration =
        (bundle.followers as u64 * 2 + bundle.total_forks_received * 3).min(100);

    // Originality rewards a body of own (non-fork) work; stars contribute
    // but are capped so one viral repo cannot dominate.
    let originality = (own * 6 + bundle.total_stars.min(40)).min(100);

    SubScores {
        activity: activity as u32,
        complexity: complexity as u32,
        consistency: consistency as u32,
        collaboration: collaboration as u32,
        originality: originality as u32,
    }
}

/// Derives the score result from a signal bundle. The stored score is
/// already net of any AI-risk adjustment; presentation surfaces apply the
/// adjustment bar separately and never below zero.
pub fn derive(bundle: &GithubSignalBundle) -> ScoreResult {
    let subs = sub_scores(bundle);

    let weighted = subs.activity as u64 * WEIGHT_ACTIVITY
        + subs.complexity as u64 * WEIGHT_COMPLEXITY
        + subs.consistency as u64 * WEIGHT_CONSISTENCY
        + subs.originality as u64 * WEIGHT_ORIGINALITY
        + subs.collaboration as u64 * WEIGHT_COLLABORATION;
    // Round the percent-weighted sum back to 0–100.
    let score = ((weighted + 50) / 100).min(100) as u32;

    ScoreResult {
        score,
        authenticity_level: confidence_band(score),
        skills: derive_skills(&bundle.languages, &subs),
    }
}

const FRONTEND_LANGS: [&str; 7] =
    ["JavaScript", "TypeScript", "HTML", "CSS", "Vue", "Svelte", "Dart"];
const BACKEND_LANGS: [&str; 9] = [
    "Rust", "Go", "Java", "Python", "Ruby", "PHP", "C#", "Kotlin", "TypeScript",
];
const DSA_LANGS: [&str; 6] = ["C", "C++", "Rust", "Go", "Java", "Python"];
const SYSTEMS_LANGS: [&str; 5] = ["Rust", "Go", "C", "C++", "Zig"];

fn uses_any(languages: &BTreeSet<String>, candidates: &[&str]) -> bool {
    candidates.iter().any(|lang| languages.contains(*lang))
}

fn clamp10(value: u32) -> u8 {
    value.min(10) as u8
}

/// Per-category skill heuristic: language-set membership provides the base,
/// sub-scores fill in depth. Each value independently clamped to [0,10];
/// pure function of the bundle, no hidden randomness.
fn derive_skills(languages: &BTreeSet<String>, subs: &SubScores) -> Skills {
    let lang_base = |candidates: &[&str], points: u32| {
        if uses_any(languages, candidates) {
            points
        } else {
            0
        }
    };

    Skills {
        frontend: clamp10(
            lang_base(&FRONTEND_LANGS, 3) + subs.complexity / 20 + subs.consistency / 25,
        ),
        backend: clamp10(lang_base(&BACKEND_LANGS, 3) + subs.complexity / 20 + subs.activity / 25),
        dsa: clamp10(lang_base(&DSA_LANGS, 2) + subs.complexity / 15),
        system: clamp10(
            lang_base(&SYSTEMS_LANGS, 3) + subs.complexity / 25 + subs.collaboration / 25,
        ),
        testing: clamp10(subs.consistency / 20 + subs.activity / 30 + subs.originality / 30),
    }
}
