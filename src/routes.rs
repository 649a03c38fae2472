// src/routes.rs
use std::convert::Infallible;
use std::sync::Arc;
use log::info;
use warp::reject::Rejection;
use warp::{Filter, Reply};

use crate::handlers::error::ApiError;
use crate::handlers::valuation::{get_latest_valuation, post_export, post_valuation, AppState};

const MAX_BODY_BYTES: u64 = 16 * 1024;

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (code, message, kind) = if err.is_not_found() {
        (warp::http::StatusCode::NOT_FOUND, "Not Found".to_string(), "NotFound")
    } else if let Some(api_error) = err.find::<ApiError>() {
        (api_error.status, api_error.message.clone(), api_error.kind)
    } else if let Some(body_error) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (warp::http::StatusCode::BAD_REQUEST, body_error.to_string(), "InputValidationError")
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (warp::http::StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed".to_string(), "MethodNotAllowed")
    } else {
        (warp::http::StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string(), "InternalError")
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
            "kind": kind,
        })),
        code,
    ))
}

pub fn routes(state: Arc<AppState>) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let state_filter = warp::any().map(move || state.clone());

    let valuation_route = warp::path!("api" / "v1" / "valuation")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(state_filter.clone())
        .and_then(post_valuation);

    let latest_route = warp::path!("api" / "v1" / "valuation" / "latest")
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(get_latest_valuation);

    let export_route = warp::path!("api" / "v1" / "valuation" / "export")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(state_filter.clone())
        .and_then(post_export);

    info!("All routes configured successfully.");

    valuation_route
        .or(latest_route)
        .or(export_route)
        .recover(handle_rejection)
}
