// src/lib.rs

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use error::{Result, ValuationError};
pub use models::{ValuationAssumptions, ValuationResult, YearlyProjection};
pub use services::dcf::compute_valuation;
pub use services::source::CashFlowSource;
