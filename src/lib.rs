pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::services::{ai_service::AIService, upload_service::UploadService};
use crate::utils::ids::QuestionIds;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{services::ServeDir, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub ai_service: AIService,
    pub upload_service: UploadService,
    pub question_ids: Arc<QuestionIds>,
    pub default_topic: String,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.ai_timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        let question_ids = Arc::new(QuestionIds::new());
        let ai_service = AIService::new(config, http_client);
        let upload_service = UploadService::new(config.uploads_dir.clone(), question_ids.clone());

        Ok(Self {
            ai_service,
            upload_service,
            question_ids,
            default_topic: config.default_topic.clone(),
        })
    }
}

/// Builds the HTTP application: API routes, optional static frontend, and layers.
pub fn app(state: AppState, config: &Config) -> Router {
    let api = Router::new()
        .route("/health", get(routes::health::health))
        .route(
            "/api/quiz",
            get(routes::quiz::get_question).fallback(routes::method_not_allowed),
        )
        .route(
            "/api/upload",
            post(routes::upload::upload_questions).fallback(routes::method_not_allowed),
        );

    let router = match &config.static_dir {
        Some(dir) => {
            tracing::info!("Serving frontend from: {}", dir.display());
            api.fallback_service(ServeDir::new(dir))
        }
        None => api,
    };

    router
        .with_state(state)
        .layer(middleware::cors::frontend_cors())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
}
