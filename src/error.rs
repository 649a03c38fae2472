// src/error.rs
use std::path::PathBuf;

/// Every way a valuation request or an export can fail.
///
/// All variants are terminal for the current request only. The caller can
/// issue another request right away.
#[derive(Debug, thiserror::Error)]
pub enum ValuationError {
    #[error("Input error: {0}")]
    InputValidation(String),

    #[error("Error fetching data for {ticker}: {message}")]
    DataFetch { ticker: String, message: String },

    #[error("Could not retrieve Free Cash Flow data for {ticker}. {message}")]
    DataUnavailable { ticker: String, message: String },

    #[error("Degenerate assumptions: {0}")]
    DegenerateAssumption(String),

    #[error("No calculation data available. Please perform a calculation first.")]
    NoResultToExport,

    #[error("Error exporting data to {}: {source}", .path.display())]
    ExportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ValuationError {
    pub fn input(message: impl Into<String>) -> Self {
        ValuationError::InputValidation(message.into())
    }

    /// Stable name of the error kind, used in API responses and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ValuationError::InputValidation(_) => "InputValidationError",
            ValuationError::DataFetch { .. } => "DataFetchError",
            ValuationError::DataUnavailable { .. } => "DataUnavailableError",
            ValuationError::DegenerateAssumption(_) => "DegenerateAssumptionError",
            ValuationError::NoResultToExport | ValuationError::ExportWrite { .. } => "ExportError",
        }
    }
}

pub type Result<T> = std::result::Result<T, ValuationError>;
