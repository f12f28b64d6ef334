use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::config::Config;
use crate::distance::DistanceResolver;
use crate::error::EstimateError;
use crate::estimate::quick::{
    quick_crack_fill, quick_fuel, quick_patching, quick_sealcoat, quick_striping, QuickFuel,
    QuickSealcoat,
};
use crate::estimate::{
    CrackFillingMaterials, EstimationResult, Estimator, LineStripingMaterials, PatchingMaterials,
};
use crate::project::{
    CrackFillingDetails, LineStripingDetails, PatchingDetails, ProjectDetails, SealcoatingDetails,
};
use crate::rates::{RateBook, RateTables};

#[derive(Clone)]
struct ApiState {
    config: Config,
    config_path: Option<PathBuf>,
    rate_book: Arc<RateBook>,
    resolver: DistanceResolver,
}

#[derive(Debug, Serialize)]
struct ApiResponse<T: Serialize> {
    ok: bool,
    data: T,
}

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    ok: bool,
    error: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn internal(error: impl std::fmt::Display) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: error.to_string(),
        }
    }
}

impl From<EstimateError> for ApiError {
    fn from(error: EstimateError) -> Self {
        let status = if error.is_invalid_project() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            message: error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiErrorBody {
            ok: false,
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<ApiResponse<T>>, ApiError>;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FuelRequest {
    distance: Option<f64>,
    address: Option<String>,
    project_hours: Option<f64>,
}

#[derive(Debug, Serialize)]
struct ReloadResponse {
    source: String,
    rates: RateTables,
}

/// Builds the router without binding, so it can be served on any listener.
pub fn build_router(config: Config, config_path: Option<PathBuf>) -> Result<Router> {
    let resolver = DistanceResolver::from_config(&config)?;
    let state = ApiState {
        rate_book: Arc::new(RateBook::new(config.rates.clone())),
        config,
        config_path,
        resolver,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Ok(Router::new()
        .route("/health", get(health))
        .route("/v1/estimate", post(estimate))
        .route("/v1/quick/sealcoat", post(quick_sealcoat_handler))
        .route("/v1/quick/crackfill", post(quick_crack_fill_handler))
        .route("/v1/quick/striping", post(quick_striping_handler))
        .route("/v1/quick/patching", post(quick_patching_handler))
        .route("/v1/quick/fuel", post(quick_fuel_handler))
        .route("/v1/rates", get(show_rates))
        .route("/v1/rates/reload", post(reload_rates))
        .route("/v1/config", get(show_config))
        .layer(cors)
        .with_state(state))
}

pub async fn run_server(config: Config, config_path: Option<PathBuf>, bind: SocketAddr) -> Result<()> {
    let app = build_router(config, config_path)?;
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("REST API listening on http://{bind}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> Json<ApiResponse<HealthResponse>> {
    ok(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn show_config(State(state): State<ApiState>) -> Json<ApiResponse<Config>> {
    let mut config = state.config;
    config.rates = state.rate_book.snapshot().as_ref().clone();
    if !config.distance.api_key.is_empty() {
        config.distance.api_key = "***".to_string();
    }
    ok(config)
}

async fn show_rates(State(state): State<ApiState>) -> Json<ApiResponse<RateTables>> {
    ok(state.rate_book.snapshot().as_ref().clone())
}

async fn reload_rates(State(state): State<ApiState>) -> ApiResult<ReloadResponse> {
    let path = state.config_path.clone().unwrap_or_else(Config::default_path);
    let rates = state.rate_book.reload_from(&path).map_err(|err| {
        warn!("rate reload from {} failed: {err:#}", path.display());
        ApiError::internal(format!("{err:#}"))
    })?;
    Ok(ok(ReloadResponse {
        source: path.display().to_string(),
        rates: rates.as_ref().clone(),
    }))
}

async fn estimate(
    State(state): State<ApiState>,
    Json(project): Json<ProjectDetails>,
) -> ApiResult<EstimationResult> {
    let estimator = Estimator::new(state.rate_book.snapshot());
    let result = estimator.estimate(&project, &state.resolver).await?;
    Ok(ok(result))
}

async fn quick_sealcoat_handler(
    State(state): State<ApiState>,
    Json(details): Json<SealcoatingDetails>,
) -> ApiResult<QuickSealcoat> {
    Ok(ok(quick_sealcoat(&details, &state.rate_book.snapshot())?))
}

async fn quick_crack_fill_handler(
    State(state): State<ApiState>,
    Json(details): Json<CrackFillingDetails>,
) -> ApiResult<CrackFillingMaterials> {
    Ok(ok(quick_crack_fill(&details, &state.rate_book.snapshot())?))
}

async fn quick_striping_handler(
    State(state): State<ApiState>,
    Json(details): Json<LineStripingDetails>,
) -> ApiResult<LineStripingMaterials> {
    Ok(ok(quick_striping(&details, &state.rate_book.snapshot())?))
}

async fn quick_patching_handler(
    State(state): State<ApiState>,
    Json(details): Json<PatchingDetails>,
) -> ApiResult<PatchingMaterials> {
    Ok(ok(quick_patching(&details, &state.rate_book.snapshot())?))
}

async fn quick_fuel_handler(
    State(state): State<ApiState>,
    Json(request): Json<FuelRequest>,
) -> ApiResult<QuickFuel> {
    let rates = state.rate_book.snapshot();
    let resolver = state.resolver.for_business(&rates.business);
    let distance = match (request.distance, request.address.as_deref()) {
        (Some(miles), _) => miles,
        (None, Some(address)) => resolver.resolve_miles(address).await,
        (None, None) => resolver.default_miles(),
    };
    Ok(ok(quick_fuel(distance, request.project_hours, &rates)?))
}

fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse { ok: true, data })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use serde_json::{json, Value};
    use tempfile::TempDir;

    use super::build_router;
    use crate::config::Config;

    async fn spawn() -> String {
        spawn_with(None).await
    }

    async fn spawn_with(config_path: Option<PathBuf>) -> String {
        let app = build_router(Config::default(), config_path).expect("router");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn estimate_round_trip() {
        let base = spawn().await;
        let body = json!({
            "projectType": "sealcoating",
            "location": { "address": "Food Lion, Stuart VA", "distanceFromBase": 12.0 },
            "timeline": { "startDate": "2026-06-01", "estimatedDuration": 1 },
            "sealcoating": { "area": 5000.0, "surfaceCondition": "good" }
        });
        let response: Value = reqwest::Client::new()
            .post(format!("{base}/v1/estimate"))
            .json(&body)
            .send()
            .await
            .expect("request")
            .json()
            .await
            .expect("json");
        assert_eq!(response["ok"], json!(true));
        assert!(response["data"]["breakdown"]["total"].as_f64().expect("total") > 0.0);
    }

    #[tokio::test]
    async fn invalid_project_is_bad_request() {
        let base = spawn().await;
        let body = json!({
            "projectType": "sealcoating",
            "location": { "address": "", "distanceFromBase": 12.0 },
            "timeline": { "startDate": "2026-06-01", "estimatedDuration": 1 },
            "sealcoating": { "area": 5000.0 }
        });
        let response = reqwest::Client::new()
            .post(format!("{base}/v1/estimate"))
            .json(&body)
            .send()
            .await
            .expect("request");
        assert_eq!(response.status().as_u16(), 400);
        let payload: Value = response.json().await.expect("json");
        assert_eq!(payload["ok"], json!(false));
    }

    #[tokio::test]
    async fn quick_fuel_uses_default_distance() {
        let base = spawn().await;
        let response: Value = reqwest::Client::new()
            .post(format!("{base}/v1/quick/fuel"))
            .json(&json!({}))
            .send()
            .await
            .expect("request")
            .json()
            .await
            .expect("json");
        assert_eq!(response["data"]["fuel"]["roundTripMiles"], json!(100.0));
        assert_eq!(response["data"]["mobilization"], json!(250.0));
    }

    async fn post(url: String, body: Value) -> Value {
        reqwest::Client::new()
            .post(url)
            .json(&body)
            .send()
            .await
            .expect("request")
            .json()
            .await
            .expect("json")
    }

    #[tokio::test]
    async fn reload_moves_shop_and_default_distance() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[rates.business]\nbase_address = \"100 Depot St, Martinsville, VA\"\ndefault_distance_miles = 20.0\n",
        )
        .expect("write config");
        let base = spawn_with(Some(path)).await;

        let reloaded = post(format!("{base}/v1/rates/reload"), json!({})).await;
        assert_eq!(reloaded["data"]["rates"]["business"]["default_distance_miles"], json!(20.0));

        let estimate = post(
            format!("{base}/v1/estimate"),
            json!({
                "projectType": "sealcoating",
                "location": { "address": "Food Lion, Stuart VA" },
                "timeline": { "startDate": "2026-06-01", "estimatedDuration": 1 },
                "sealcoating": { "area": 5000.0 }
            }),
        )
        .await;
        assert_eq!(estimate["data"]["breakdown"]["fuel"]["roundTripMiles"], json!(40.0));

        let fuel = post(format!("{base}/v1/quick/fuel"), json!({})).await;
        assert_eq!(fuel["data"]["fuel"]["roundTripMiles"], json!(40.0));
        assert_eq!(fuel["data"]["mobilization"], json!(150.0));
    }

    #[tokio::test]
    async fn oversized_striping_is_bad_request() {
        let base = spawn().await;
        let response = reqwest::Client::new()
            .post(format!("{base}/v1/quick/striping"))
            .json(&json!({ "standardStalls": 4294967295u32, "handicapStalls": 1 }))
            .send()
            .await
            .expect("request");
        assert_eq!(response.status().as_u16(), 400);
    }
}
