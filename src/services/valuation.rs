// src/services/valuation.rs
use log::{error, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::error::{Result, ValuationError};
use crate::models::ValuationResult;
use crate::services::cash_flow::resolve_free_cash_flow;
use crate::services::dcf::compute_valuation;
use crate::services::input::{parse_request, RawValuationInput, ValuationRequest};
use crate::services::report::export_report;
use crate::services::source::CashFlowSource;

/// Fetch, resolve and value one parsed request.
pub async fn run_valuation(source: &dyn CashFlowSource, request: &ValuationRequest) -> Result<ValuationResult> {
    let ticker = request.ticker.as_str();
    info!(
        "Fetching data for {} from {} (assumptions: {:?})",
        ticker,
        source.name(),
        request.assumptions
    );

    let company = source.company_info(ticker).await?;

    // The statement is only needed when no free cash flow is reported.
    let statement = if company.free_cashflow.is_none() {
        match source.cash_flow_statement(ticker).await {
            Ok(statement) => Some(statement),
            Err(e) => {
                let message = match e {
                    ValuationError::DataFetch { message, .. } => message,
                    other => other.to_string(),
                };
                return Err(ValuationError::DataUnavailable {
                    ticker: ticker.to_string(),
                    message,
                });
            }
        }
    } else {
        None
    };

    let fcf = resolve_free_cash_flow(ticker, &company, statement.as_ref())?;
    let result = compute_valuation(
        ticker,
        fcf,
        request.assumptions,
        company.shares_outstanding,
        company.profile,
    )?;

    info!(
        "Enterprise value for {}: {} (per share: {:?})",
        ticker, result.enterprise_value, result.per_share_value
    );
    Ok(result)
}

/// Parse raw form input and run the valuation.
pub async fn calculate(source: &dyn CashFlowSource, raw: &RawValuationInput) -> Result<ValuationResult> {
    let request = parse_request(raw)?;
    run_valuation(source, &request).await
}

/// Runs calculations one at a time and keeps the latest completed result
/// for export.
///
/// A failed calculation never replaces the stored result.
pub struct ValuationDesk {
    source: Arc<dyn CashFlowSource>,
    gate: Mutex<()>,
    latest: RwLock<Option<Arc<ValuationResult>>>,
}

impl ValuationDesk {
    pub fn new(source: Arc<dyn CashFlowSource>) -> Self {
        ValuationDesk {
            source,
            gate: Mutex::new(()),
            latest: RwLock::new(None),
        }
    }

    pub async fn calculate(&self, raw: &RawValuationInput) -> Result<Arc<ValuationResult>> {
        let _in_flight = self.gate.lock().await;

        let result = calculate(self.source.as_ref(), raw).await.map_err(|e| {
            error!("{}: {}", e.kind(), e);
            e
        })?;

        let result = Arc::new(result);
        *self.latest.write().await = Some(Arc::clone(&result));
        Ok(result)
    }

    pub async fn latest(&self) -> Option<Arc<ValuationResult>> {
        self.latest.read().await.clone()
    }

    /// Export the latest completed result to `path`.
    pub async fn export(&self, path: &Path) -> Result<PathBuf> {
        let snapshot = self.latest().await;
        let target = path.to_path_buf();

        tokio::task::spawn_blocking(move || export_report(snapshot.as_deref(), &target))
            .await
            .map_err(|e| ValuationError::ExportWrite {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
            })?
    }
}
