//! HTTP surface: video lookup, title generation and the single-page UI.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{error, info};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::config::{Config, Credentials};
use crate::llm::{AnthropicCompleter, Completer, GroqCompleter, Provider};
use crate::titles::generate_variations;
use crate::youtube::YouTubeClient;
use crate::{Error, VideoSummary, extract_video_id};

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Shared, immutable per-process state
#[derive(Clone)]
pub struct AppState {
    pub catalog: YouTubeClient,
    pub youtube_api_key: Option<String>,
    pub provider: Provider,
    /// `None` when the selected provider has no credential configured
    pub completer: Option<Arc<dyn Completer>>,
    pub max_tokens: u32,
}

impl AppState {
    pub fn new(client: reqwest::Client, config: &Config, credentials: &Credentials, provider: Provider) -> Self {
        let completer = build_completer(client.clone(), config, credentials, provider);
        Self {
            catalog: YouTubeClient::new(client),
            youtube_api_key: credentials.youtube_api_key.clone(),
            provider,
            completer,
            max_tokens: config.max_tokens(),
        }
    }
}

fn build_completer(
    client: reqwest::Client,
    config: &Config,
    credentials: &Credentials,
    provider: Provider,
) -> Option<Arc<dyn Completer>> {
    let api_key = credentials.for_provider(provider)?;
    let model = config.model_for(provider);
    info!("Title generation backend: {provider} ({model})");

    let completer: Arc<dyn Completer> = match provider {
        Provider::Anthropic => Arc::new(AnthropicCompleter::new(client, api_key, model)),
        Provider::Groq => Arc::new(GroqCompleter::new(client, api_key, model)),
    };
    Some(completer)
}

/// Error wrapper rendered as `{ "error": ... }`
#[derive(Debug)]
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0 {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            // not-found and upstream failures share 500
            Error::Configuration(_) | Error::NotFound(_) | Error::Provider { .. } | Error::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfoQuery {
    pub video_id: Option<String>,
    /// A pasted link; the id is extracted server-side
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateTitlesRequest {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateTitlesResponse {
    pub variations: Vec<String>,
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/video-info", get(video_info_by_query).fallback(method_not_allowed))
        .route("/api/video-info/", get(video_info_by_query).fallback(method_not_allowed))
        .route("/api/video-info/:video_id", get(video_info_by_path).fallback(method_not_allowed))
        .route("/api/generate-titles", post(generate_titles).fallback(method_not_allowed))
        .fallback(not_found)
        .layer(middleware::from_fn(log_requests))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until Ctrl-C
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running on http://{}", listener.local_addr()?);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_on(tokio::signal::ctrl_c()))
        .await
}

/// Resolve when `signal` fires; never resolve if it could not be installed
async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("Shutting down"),
        Err(e) => {
            error!("Unable to listen for shutdown signal, running until killed: {e}");
            std::future::pending::<()>().await;
        }
    }
}

async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    info!(
        "{method} {path} -> {} in {:?}",
        response.status().as_u16(),
        start.elapsed()
    );
    response
}

fn error_body(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorBody>) {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
}

async fn method_not_allowed() -> (StatusCode, Json<ErrorBody>) {
    error_body(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    error_body(StatusCode::NOT_FOUND, "Not found")
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "provider": state.provider,
    }))
}

async fn video_info_by_path(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> Result<Json<VideoSummary>, ApiError> {
    lookup_video(&state, Some(video_id)).await
}

async fn video_info_by_query(
    State(state): State<AppState>,
    Query(query): Query<VideoInfoQuery>,
) -> Result<Json<VideoSummary>, ApiError> {
    let video_id = match (non_blank(query.video_id), non_blank(query.url)) {
        (Some(id), _) => Some(id),
        (None, Some(url)) => Some(
            extract_video_id(&url)
                .ok_or_else(|| Error::validation("Invalid YouTube URL. Please check and try again."))?,
        ),
        (None, None) => None,
    };
    lookup_video(&state, video_id).await
}

async fn lookup_video(state: &AppState, video_id: Option<String>) -> Result<Json<VideoSummary>, ApiError> {
    let video_id = non_blank(video_id).ok_or_else(|| Error::validation("Video ID is required"))?;
    let api_key = state
        .youtube_api_key
        .as_deref()
        .ok_or_else(|| Error::Configuration("YouTube".to_string()))?;

    match state.catalog.fetch_video_summary(&video_id, api_key).await {
        Ok(summary) => Ok(Json(summary)),
        Err(e) => {
            error!("Error fetching video info for {video_id}: {e}");
            Err(e.into())
        }
    }
}

async fn generate_titles(
    State(state): State<AppState>,
    payload: Result<Json<GenerateTitlesRequest>, JsonRejection>,
) -> Result<Json<GenerateTitlesResponse>, ApiError> {
    let Json(request) =
        payload.map_err(|rejection| Error::validation(format!("Invalid request body: {}", rejection.body_text())))?;

    let title = request
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| Error::validation("Title is required"))?;

    let completer = state
        .completer
        .as_deref()
        .ok_or_else(|| Error::Configuration(state.provider.service_name().to_string()))?;

    match generate_variations(completer, &title, state.max_tokens).await {
        Ok(variations) => Ok(Json(GenerateTitlesResponse { variations })),
        Err(e) => {
            error!("Error generating titles: {e}");
            Err(e.into())
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
