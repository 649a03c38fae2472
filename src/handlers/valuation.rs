// src/handlers/valuation.rs
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use crate::models::ValuationResult;
use crate::services::input::RawValuationInput;
use crate::services::report::{render_summary, report_path_in};
use crate::services::valuation::ValuationDesk;

/// Shared state for the valuation routes.
pub struct AppState {
    pub desk: ValuationDesk,
    pub report_dir: PathBuf,
}

#[derive(Serialize)]
struct ValuationResponse<'a> {
    #[serde(flatten)]
    result: &'a ValuationResult,
    summary: String,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub file_name: String,
}

fn reject(err: impl Into<ApiError>) -> Rejection {
    let err = err.into();
    error!("{}: {}", err.kind, err.message);
    warp::reject::custom(err)
}

pub async fn post_valuation(input: RawValuationInput, state: Arc<AppState>) -> Result<Json, Rejection> {
    info!("Handling valuation request for {:?}", input.ticker);

    let result = state.desk.calculate(&input).await.map_err(reject)?;
    Ok(warp::reply::json(&ValuationResponse {
        result: &result,
        summary: render_summary(&result),
    }))
}

pub async fn get_latest_valuation(state: Arc<AppState>) -> Result<Json, Rejection> {
    info!("Handling request for latest valuation");

    match state.desk.latest().await {
        Some(result) => Ok(warp::reply::json(&ValuationResponse {
            result: &result,
            summary: render_summary(&result),
        })),
        None => Err(reject(ApiError::not_found(
            "No calculation data available. Please perform a calculation first.",
        ))),
    }
}

pub async fn post_export(request: ExportRequest, state: Arc<AppState>) -> Result<Json, Rejection> {
    info!("Handling export request for {:?}", request.file_name);

    let path = report_path_in(&state.report_dir, &request.file_name).map_err(reject)?;
    tokio::fs::create_dir_all(&state.report_dir)
        .await
        .map_err(|e| reject(ApiError::new(format!("Error creating report directory: {}", e))))?;

    let written = state.desk.export(&path).await.map_err(reject)?;
    Ok(warp::reply::json(&serde_json::json!({
        "path": written.display().to_string(),
    })))
}
