// Report assembly, persistence, and the HTTP surface around reports.
// A report is immutable once assembled: a re-scan creates a new record,
// it never mutates the old one.

pub mod assembler;
pub mod handlers;
pub mod store;

pub use assembler::{assemble, CandidateReport, GithubMonitoring, GithubProfile, TopRepo};
