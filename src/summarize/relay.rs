// Summarization relay server.
// Forwards document text to the hosted model, adding the server-held API token.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use reqwest::Client;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::RelayConfig;
use crate::error::{AppError, Result};

use super::types::{
    ErrorBody, HealthResponse, HealthStatus, InferenceParameters, InferenceRequest,
    MAX_INPUT_CHARS, SummarizeRequest, truncate_chars,
};

pub const DEFAULT_MODEL_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-cnn";

/// Shared, immutable relay state.
#[derive(Debug)]
pub struct RelayState {
    http: Client,
    model_url: String,
    api_token: Option<String>,
}

impl RelayState {
    pub fn new(model_url: impl Into<String>, api_token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            model_url: model_url.into(),
            api_token,
        }
    }

    pub fn from_config(config: &RelayConfig) -> Self {
        Self::new(config.model_url.clone(), config.api_token.clone())
    }

    /// Forward `text` (truncated) to the model and return its JSON verbatim.
    async fn forward(&self, text: &str) -> Result<serde_json::Value> {
        let body = InferenceRequest {
            inputs: truncate_chars(text, MAX_INPUT_CHARS).to_string(),
            parameters: InferenceParameters::default(),
        };

        let mut request = self.http.post(&self.model_url).json(&body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(%status, body = %message, "Summarization API error");
            return Err(AppError::Http {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

/// Failures surfaced to relay callers.
#[derive(Debug)]
enum RelayError {
    MissingText,
    Upstream,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            RelayError::MissingText => (StatusCode::BAD_REQUEST, "Missing text in request body"),
            RelayError::Upstream => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to summarize text"),
        };
        (
            status,
            Json(ErrorBody {
                error: error.to_string(),
            }),
        )
            .into_response()
    }
}

/// POST /api/summarize
async fn summarize(
    State(state): State<Arc<RelayState>>,
    payload: std::result::Result<Json<SummarizeRequest>, JsonRejection>,
) -> std::result::Result<Json<serde_json::Value>, RelayError> {
    let request = match payload {
        Ok(Json(request)) if !request.text.is_empty() => request,
        Ok(_) => return Err(RelayError::MissingText),
        Err(rejection) => {
            tracing::debug!(%rejection, "Rejected summarize body");
            return Err(RelayError::MissingText);
        }
    };

    // The flag is accepted for compatibility but does not alter the model call.
    tracing::info!(
        chars = request.text.chars().count(),
        is_contributing = request.is_contributing,
        "Summarize request"
    );

    match state.forward(&request.text).await {
        Ok(body) => Ok(Json(body)),
        Err(e) => {
            tracing::error!(error = %e, "Error in summarize endpoint");
            Err(RelayError::Upstream)
        }
    }
}

/// GET /api/health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
    })
}

/// Build the CORS layer for the given origins.
pub fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// Build the relay router around `state`.
pub fn create_router(state: Arc<RelayState>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/api/summarize", post(summarize))
        .route("/api/health", get(health))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Run the relay until Ctrl-C.
pub async fn serve(config: RelayConfig) -> Result<()> {
    let state = Arc::new(RelayState::from_config(&config));
    let app = create_router(state, build_cors_layer(&config.allowed_origins()));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(%addr, mode = ?config.mode, "Server running on port {}", config.port);
    if config.api_token.is_none() {
        tracing::warn!("HUGGINGFACE_API_TOKEN is missing; upstream calls will be unauthenticated");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Shutdown signal received");
            }
        })
        .await?;

    Ok(())
}
