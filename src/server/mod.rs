//! Long-running HTTP service.
//!
//! Exposes the same generation engine as the one-shot CLI over two routes:
//!
//! - `GET /generate?target=<name>` renders a target (and its descendants)
//!   and returns the merged outputs as a JSON object of key to content.
//! - `POST /targets` adds or replaces a target definition in the live
//!   configuration.
//!
//! Responses for failures carry a structured envelope:
//! `{"level":"error","time":"<rfc3339>","message":"..."}`. When a JWKS URI
//! is configured every route sits behind the bearer-token gate in
//! [`auth`].

pub mod auth;

use crate::config::{Config, Target};
use crate::core::contents_to_string;
use crate::generator::Registry;
use crate::resolver::{drain, Resolver, RunOptions};
use auth::Authorizer;
use axum::error_handling::HandleErrorLayer;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tracing::{error, info};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Shared service state.
#[derive(Clone)]
pub struct AppState {
    /// Live configuration; `POST /targets` mutates the target graph.
    pub config: Arc<RwLock<Config>>,
    /// Generator registry built at startup (built-ins plus extensions).
    pub registry: Arc<Registry>,
    /// Bearer-token gate; open when no JWKS URI is configured.
    pub authorizer: Arc<Authorizer>,
}

/// Structured error body returned by every failing route.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub level: String,
    pub time: String,
    pub message: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let envelope = ErrorEnvelope {
        level: "error".to_string(),
        time: chrono::Utc::now().to_rfc3339(),
        message: message.into(),
    };
    (status, Json(envelope)).into_response()
}

/// Builds the service router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/generate", get(generate))
        .route("/targets", post(add_target))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(|err: BoxError| async move {
                    error_response(
                        StatusCode::REQUEST_TIMEOUT,
                        format!("request timed out: {err}"),
                    )
                }))
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT)),
        )
        .with_state(state)
}

/// Binds the listener and runs the service until shutdown.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let authorizer = Authorizer::new(&config.server.jwks);
    if authorizer.enabled() {
        info!(uri = %config.server.jwks.uri, "authorization gate enabled");
    }

    let registry = Registry::new();
    for dir in &config.extension_dirs {
        registry.load_directory(dir);
    }

    let state = AppState {
        config: Arc::new(RwLock::new(config)),
        registry: Arc::new(registry),
        authorizer: Arc::new(authorizer),
    };

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "confgen service listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn require_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: axum::extract::Request,
    next: Next,
) -> Response {
    match state.authorizer.authorize(&headers).await {
        Ok(()) => next.run(request).await,
        Err(err) => error_response(StatusCode::UNAUTHORIZED, err.to_string()),
    }
}

#[derive(Debug, Deserialize)]
struct GenerateParams {
    target: Option<String>,
}

async fn generate(
    State(state): State<AppState>,
    Query(params): Query<GenerateParams>,
) -> Response {
    let Some(target) = params.target.filter(|t| !t.is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "missing 'target' query parameter");
    };

    // snapshot the graph so generation never holds the lock across awaits
    let snapshot = match state.config.read() {
        Ok(config) => config.clone(),
        Err(_) => {
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "configuration lock poisoned");
        }
    };
    if !snapshot.targets.contains_key(&target) {
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("unknown target '{target}'"),
        );
    }

    let resolver = Resolver::new(&snapshot, &state.registry, RunOptions::default());
    match resolver.run(std::slice::from_ref(&target), &mut drain()).await {
        Ok(outputs) if outputs.is_empty() => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("target '{target}' produced no output"),
        ),
        Ok(outputs) => {
            info!(%target, files = outputs.len(), "served generation request");
            Json(contents_to_string(&outputs)).into_response()
        }
        Err(err) => {
            error!(%target, %err, "generation request failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

#[derive(Debug, Deserialize)]
struct TargetRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    plugin: String,
    #[serde(default)]
    templates: Vec<String>,
}

async fn add_target(
    State(state): State<AppState>,
    Json(request): Json<TargetRequest>,
) -> Response {
    if request.name.is_empty() || request.plugin.is_empty() || request.templates.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "'name', 'plugin', and 'templates' must all be non-empty",
        );
    }

    let definition = Target {
        plugin: request.plugin,
        template_paths: request.templates,
        ..Target::default()
    };
    match state.config.write() {
        Ok(mut config) => {
            let replaced = config
                .targets
                .insert(request.name.clone(), definition)
                .is_some();
            info!(target = %request.name, replaced, "registered target definition");
            (StatusCode::CREATED, Json(serde_json::json!({ "name": request.name })))
                .into_response()
        }
        Err(_) => error_response(StatusCode::INTERNAL_SERVER_ERROR, "configuration lock poisoned"),
    }
}
