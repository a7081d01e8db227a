//! API Handlers
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use nac_core::{Granularity, NacError, OrganizationConfig, ResultSet, MODEL_VERSION};
use nac_finance::{SensitivityParameter, SensitivityRequest, SensitivityResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    /// Partial organization config, missing fields take defaults
    #[serde(default)]
    pub config: Value,
    /// Selected vendor ids; all catalog vendors when absent
    #[serde(default)]
    pub vendors: Option<Vec<String>>,
    #[serde(default)]
    pub granularity: Option<Granularity>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    pub trace_id: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub model_version: &'static str,
    pub ranking_profile: String,
    #[serde(flatten)]
    pub result_set: ResultSet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityBody {
    #[serde(default)]
    pub config: Value,
    pub vendor: String,
    pub parameter: SensitivityParameter,
    #[serde(default)]
    pub range_percent: Option<f64>,
    #[serde(default)]
    pub steps: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityResponse {
    pub trace_id: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    #[serde(flatten)]
    pub result: SensitivityResult,
}

/// Request errors: bad input is a 400, an unknown vendor a 404
pub enum ApiError {
    Input(NacError),
    UnknownVendor(String),
}

impl From<NacError> for ApiError {
    fn from(err: NacError) -> Self {
        ApiError::Input(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Input(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::UnknownVendor(id) => (StatusCode::NOT_FOUND, format!("unknown vendor: {id}")),
        };
        tracing::warn!(status = status.as_u16(), error = %message, "rejected request");
        (status, Json(json!({ "error": message }))).into_response()
    }
}

fn parse_config(value: Value) -> Result<OrganizationConfig, NacError> {
    match value {
        Value::Null => Ok(OrganizationConfig::new()),
        value => OrganizationConfig::from_value(value),
    }
}

pub async fn calculate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CalculateRequest>,
) -> Result<Json<CalculateResponse>, ApiError> {
    let config = parse_config(request.config)?;
    let selected: Vec<String> = match request.vendors {
        Some(ids) => ids,
        None => state.engine.registry().vendors.ids().map(str::to_string).collect(),
    };

    let mut ctx = state.engine.context(config);
    if let Some(granularity) = request.granularity {
        ctx = ctx.with_granularity(granularity);
    }
    let result_set = state.engine.run(&ctx, &selected);

    state.metrics.calculations.inc();
    state.metrics.vendors_evaluated.inc_by(result_set.len() as u64);
    state.metrics.skipped_vendors.inc_by(result_set.skipped.len() as u64);
    tracing::info!(
        trace_id = %ctx.trace_id,
        vendors = result_set.len(),
        skipped = result_set.skipped.len(),
        "calculation served"
    );

    Ok(Json(CalculateResponse {
        trace_id: ctx.trace_id.clone(),
        generated_at: chrono::Utc::now(),
        model_version: MODEL_VERSION,
        ranking_profile: state.engine.ranking_profile().name.clone(),
        result_set,
    }))
}

pub async fn sensitivity(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SensitivityBody>,
) -> Result<Json<SensitivityResponse>, ApiError> {
    let ctx = state.engine.context(parse_config(body.config)?);
    let mut request = SensitivityRequest::new(body.parameter);
    if let Some(range) = body.range_percent {
        request = request.with_range(range);
    }
    if let Some(steps) = body.steps {
        request = request.with_steps(steps);
    }

    let result = state
        .engine
        .sensitivity(&ctx, &body.vendor, &request)
        .ok_or(ApiError::UnknownVendor(body.vendor))?;

    Ok(Json(SensitivityResponse {
        trace_id: ctx.trace_id.clone(),
        generated_at: chrono::Utc::now(),
        result,
    }))
}

pub async fn list_vendors(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let vendors: Vec<Value> = state
        .engine
        .registry()
        .vendors
        .iter()
        .map(|p| {
            json!({
                "id": p.id,
                "name": p.display_name(),
                "deploymentModel": p.deployment.model,
            })
        })
        .collect();
    (StatusCode::OK, Json(json!({ "vendors": vendors })))
}

pub async fn list_frameworks(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let frameworks: Vec<Value> = state
        .engine
        .registry()
        .frameworks
        .iter()
        .map(|(id, def)| {
            json!({
                "id": id,
                "name": def.name,
                "requirements": def.requirements.len(),
            })
        })
        .collect();
    (StatusCode::OK, Json(json!({ "frameworks": frameworks })))
}

pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
            "modelVersion": MODEL_VERSION,
            "vendors": state.engine.registry().vendors.len(),
        })),
    )
}

pub async fn metrics(State(state): State<Arc<AppState>>) -> Response {
    match state.metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
