// GitHub Signal Collector.
// Fetches public profile + repository data and normalizes it into a signal
// bundle for the deriver. Any upstream failure falls back to a deterministic
// synthetic bundle so a scan always produces a report.

pub mod client;
pub mod collector;

pub use client::{GithubClient, GithubRepo, GithubUser};
pub use collector::{collect, CollectedSignals, GithubSignalBundle};
