use std::{net::SocketAddr, num::NonZeroUsize, sync::Arc, thread};

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::{
    engine::{EngineBuilder, EngineSettings, SimulationReport},
    error::SimulationError,
    params::SimulationParameters,
    scenario::Scenario,
};

/// Largest trial count one request may ask for.
pub const MAX_REQUEST_TRIALS: usize = 1_000_000;
/// Largest histogram bin count one request may ask for.
pub const MAX_REQUEST_BINS: usize = 1_000;

#[derive(Clone)]
struct AppState {
    scenario_name: String,
    parameters: SimulationParameters,
    settings: EngineSettings,
}

pub struct WebServerConfig {
    pub scenario: Scenario,
    pub settings: EngineSettings,
    pub host: String,
    pub port: u16,
}

/// Body of `POST /api/simulate`. Parameter fields sit at the top level;
/// omitted run settings fall back to the server's.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulateRequest {
    #[serde(flatten)]
    pub parameters: SimulationParameters,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub trials: Option<usize>,
    #[serde(default)]
    pub histogram_bins: Option<usize>,
    #[serde(default)]
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DefaultsResponse {
    pub scenario: String,
    pub parameters: SimulationParameters,
    pub settings: EngineSettings,
}

#[derive(Debug)]
enum ApiError {
    Invalid(SimulationError),
    Internal(String),
}

impl From<SimulationError> for ApiError {
    fn from(value: SimulationError) -> Self {
        ApiError::Invalid(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Invalid(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub fn router(scenario: &Scenario, settings: EngineSettings) -> Router {
    let state = Arc::new(AppState {
        scenario_name: scenario.name.clone(),
        parameters: scenario.parameters.clone(),
        settings,
    });
    Router::new()
        .route("/api/health", get(health))
        .route("/api/defaults", get(defaults))
        .route("/api/simulate", post(simulate))
        .with_state(state)
}

pub async fn run(config: WebServerConfig) -> Result<()> {
    let WebServerConfig {
        scenario,
        settings,
        host,
        port,
    } = config;

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("invalid listen address {host}:{port}"))?;
    let app = router(&scenario, settings);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, scenario = %scenario.name, "land-need API listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down land-need API");
}

async fn health() -> &'static str {
    "ok"
}

async fn defaults(State(state): State<Arc<AppState>>) -> Json<DefaultsResponse> {
    Json(DefaultsResponse {
        scenario: state.scenario_name.clone(),
        parameters: state.parameters.clone(),
        settings: state.settings,
    })
}

async fn simulate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SimulateRequest>,
) -> Result<Json<SimulationReport>, ApiError> {
    let mut builder = EngineBuilder::new(state.settings);
    if let Some(seed) = request.seed {
        builder = builder.with_seed(seed);
    }
    if let Some(trials) = request.trials {
        builder = builder.with_trials(check_limit("trials", trials, MAX_REQUEST_TRIALS)?);
    }
    if let Some(bins) = request.histogram_bins {
        builder =
            builder.with_histogram_bins(check_limit("histogram_bins", bins, MAX_REQUEST_BINS)?);
    }
    if let Some(workers) = request.workers {
        builder = builder.with_workers(workers.min(available_workers()));
    }
    let engine = builder.build()?;
    request.parameters.validate().map_err(|err| {
        warn!(%err, "rejected simulation request");
        ApiError::from(err)
    })?;

    let parameters = request.parameters;
    let report = tokio::task::spawn_blocking(move || engine.run(&parameters))
        .await
        .map_err(|err| {
            error!(?err, "simulation task failed");
            ApiError::Internal("simulation task failed".to_string())
        })??;
    Ok(Json(report))
}

fn check_limit(field: &'static str, requested: usize, limit: usize) -> Result<usize, ApiError> {
    if requested > limit {
        warn!(field, requested, limit, "rejected oversized simulation request");
        return Err(SimulationError::LimitExceeded {
            field,
            requested,
            limit,
        }
        .into());
    }
    Ok(requested)
}

fn available_workers() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
