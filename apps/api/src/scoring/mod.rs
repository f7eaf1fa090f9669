// Score & Skill Deriver plus the shared derived-metric module.
// `derive` is the only producer of scores; `derived` is the only place
// thresholds live. Every display surface recomputes presentation metrics
// through `derived` — no per-view threshold copies.

pub mod derive;
pub mod derived;

pub use derive::{derive, ScoreResult, Skills};
pub use derived::AuthenticityLevel;
