mod auth;
mod config;
mod db;
mod errors;
mod github;
mod insights;
mod llm_client;
mod models;
mod report;
mod routes;
mod scoring;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::default_providers;
use crate::config::Config;
use crate::db::create_pool;
use crate::github::GithubClient;
use crate::insights::GeminiInsightGenerator;
use crate::routes::build_router;
use crate::state::AppState;

/// Default filter directive when `RUST_LOG` is unset. Tracing targets use
/// the crate name with hyphens folded to underscores, so the package name
/// cannot be used verbatim.
fn default_log_directive(level: &str) -> String {
    format!("{}={level}", env!("CARGO_PKG_NAME").replace('-', "_"))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_directive(&config.rust_log))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting HireProof API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // GitHub collector client (token optional — affects rate limits only)
    let github = GithubClient::new(config.github_token.clone());
    info!(
        "GitHub client initialized (authenticated: {})",
        config.github_token.is_some()
    );

    // Insight generator; without a credential every request uses the
    // fixed fallback set.
    let insights = Arc::new(GeminiInsightGenerator::new(config.gemini_api_key.clone()));
    info!(
        "Insight generator initialized (model: {}, configured: {})",
        llm_client::MODEL,
        config.gemini_api_key.is_some()
    );

    // Session resolution chain: bearer token, then identity headers.
    let session_providers = Arc::new(default_providers());

    // Build app state
    let state = AppState {
        db,
        github,
        insights,
        session_providers,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;
    use tracing_subscriber::layer::{Context, Layer};

    #[test]
    fn test_default_log_directive_targets_the_crate_module_path() {
        let directive = default_log_directive("info");
        assert_eq!(directive, "hireproof_api=info");
        assert!(!directive.contains('-'));
    }

    #[test]
    fn test_default_filter_enables_crate_target_warnings() {
        #[derive(Clone)]
        struct Capture(std::sync::Arc<std::sync::atomic::AtomicUsize>);
        impl<S: tracing::Subscriber> Layer<S> for Capture {
            fn on_event(&self, _event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
                self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            }
        }

        let capture = Capture(std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0)));
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new(default_log_directive("info")))
            .with(capture.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::event!(
                target: "hireproof_api::github::collector",
                Level::WARN,
                "fallback engaged"
            );
            tracing::event!(target: "hyper::client", Level::WARN, "unrelated");
        });

        assert_eq!(capture.0.load(std::sync::atomic::Ordering::SeqCst), 1);
    }
}
