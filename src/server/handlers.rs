//! HTTP request handlers

use std::sync::Arc;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    response::Html,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::form::{self, FormInputs, FormOutput, SLIDER_DEFAULT};

use super::error::Result;
use super::state::AppState;

/// Slider values as they arrive in a query string or JSON body; missing ones take the default
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureParams {
    sepal_length: Option<f64>,
    sepal_width: Option<f64>,
    petal_length: Option<f64>,
    petal_width: Option<f64>,
}

impl FeatureParams {
    fn values(&self) -> [f64; form::N_FEATURES] {
        [
            self.sepal_length,
            self.sepal_width,
            self.petal_length,
            self.petal_width,
        ]
        .map(|v| v.unwrap_or(SLIDER_DEFAULT))
    }
}

// ============================================================================
// UI Handler
// ============================================================================

/// The form page. Values are pinned to the slider range, like the range inputs themselves.
pub async fn serve_index(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<FeatureParams>, QueryRejection>,
) -> Result<Html<String>> {
    let Query(params) = params?;
    let inputs = FormInputs::clamped(params.values());
    let output = form::render(&inputs, &state.context);
    Ok(Html(form::render_page(&output)?))
}

// ============================================================================
// API Handlers
// ============================================================================

/// Render output as JSON
pub async fn get_form(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<FeatureParams>, QueryRejection>,
) -> Result<Json<FormOutput>> {
    let Query(params) = params?;
    let inputs = FormInputs::new(params.values())?;
    Ok(Json(form::render(&inputs, &state.context)))
}

pub async fn predict(
    State(state): State<Arc<AppState>>,
    request: std::result::Result<Json<FeatureParams>, JsonRejection>,
) -> Result<Json<serde_json::Value>> {
    let Json(request) = request?;
    let inputs = FormInputs::new(request.values())?;
    let label = form::predict_on_current_inputs(&inputs, &state.context)?;

    info!(label = %label, features = ?inputs.values(), "Served prediction");

    Ok(Json(serde_json::json!({
        "success": true,
        "label": label,
        "features": inputs.values(),
    })))
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.uptime_secs(),
        "classes": state.context.labels(),
    }))
}
