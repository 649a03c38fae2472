// src/handlers/error.rs
use std::fmt;
use warp::http::StatusCode;
use warp::reject::Reject;

use crate::error::ValuationError;

#[derive(Debug, Clone)]
pub struct ApiError {
    pub message: String,
    pub kind: &'static str,
    pub status: StatusCode,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        ApiError {
            message: message.into(),
            kind: "InternalError",
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError {
            message: message.into(),
            kind: "NotFound",
            status: StatusCode::NOT_FOUND,
        }
    }
}

impl From<ValuationError> for ApiError {
    fn from(err: ValuationError) -> Self {
        let status = match &err {
            ValuationError::InputValidation(_) | ValuationError::DegenerateAssumption(_) => StatusCode::BAD_REQUEST,
            ValuationError::DataFetch { .. } => StatusCode::BAD_GATEWAY,
            ValuationError::DataUnavailable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ValuationError::NoResultToExport => StatusCode::CONFLICT,
            ValuationError::ExportWrite { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiError {
            message: err.to_string(),
            kind: err.kind(),
            status,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}
impl Reject for ApiError {}
