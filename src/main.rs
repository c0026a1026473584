//! Promptify Backend
//!
//! A production-grade REST backend turning free-text project ideas into tech
//! stack detections, AI tool recommendations, and generated prompts, with
//! SQLite persistence for saved prompts and the idea bank.

mod analysis;
mod api;
mod config;
mod db;
mod errors;
mod models;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use analysis::{AnalysisService, OpenAiBackend};
use config::Config;
use db::Repository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub analysis: Arc<AnalysisService>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Promptify Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Analysis model: {}", config.model);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if the analysis service is not configured
    if config.openai_api_key.is_none() {
        tracing::warn!("No API key configured (OPENAI_API_KEY). Analysis requests will fail!");
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Initialize the analysis service
    let backend = Arc::new(OpenAiBackend::new(&config));
    let analysis = Arc::new(AnalysisService::new(backend));

    // Create application state
    let state = AppState { repo, analysis };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Analysis
        .route("/analyze", post(api::analyze_project))
        // Prompts
        .route("/prompts", post(api::create_prompt))
        .route("/prompts", get(api::list_prompts))
        .route("/prompts/{id}", put(api::update_prompt))
        // Ideas
        .route("/ideas", post(api::create_idea))
        .route("/ideas", get(api::list_ideas))
        .route("/ideas/{id}", put(api::update_idea))
        .route("/ideas/{id}", delete(api::delete_idea))
        // Comments
        .route("/ideas/{id}/comments", get(api::list_comments))
        .route("/ideas/{id}/comments", post(api::add_comment))
        .route("/comments/{id}", delete(api::delete_comment));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
