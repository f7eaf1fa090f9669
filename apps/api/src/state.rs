use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::SessionProvider;
use crate::config::Config;
use crate::github::GithubClient;
use crate::insights::InsightGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub github: GithubClient,
    /// Pluggable insight generator. Default: Gemini-backed with fallback;
    /// swapped for a canned implementation in tests.
    pub insights: Arc<dyn InsightGenerator>,
    /// Ordered session-resolution chain; first authenticated result wins.
    pub session_providers: Arc<Vec<Box<dyn SessionProvider>>>,
    pub config: Config,
}
