// src/services/cash_flow.rs
use log::info;

use crate::error::{Result, ValuationError};
use crate::models::{
    CashFlowStatement, CompanyInfo, FcfOrigin, FreeCashFlowBase, CAPITAL_EXPENDITURES, OPERATING_CASH_FLOW,
};

/// Operating cash flow plus capital expenditures for the most recent period,
/// if both line items are reported for it.
pub fn reconstruct_free_cash_flow(statement: &CashFlowStatement) -> Option<FreeCashFlowBase> {
    let period = statement.most_recent_period()?;
    let operating_cash_flow = statement.value(OPERATING_CASH_FLOW, period)?;
    let capital_expenditures = statement.value(CAPITAL_EXPENDITURES, period)?;

    Some(FreeCashFlowBase {
        // Capex is reported as a non-positive number.
        value: operating_cash_flow + capital_expenditures,
        origin: FcfOrigin::Reconstructed {
            period,
            operating_cash_flow,
            capital_expenditures,
        },
    })
}

/// Pick the free-cash-flow base for `ticker`: the reported figure when
/// present, otherwise the statement reconstruction. No other fallback.
pub fn resolve_free_cash_flow(
    ticker: &str,
    info: &CompanyInfo,
    statement: Option<&CashFlowStatement>,
) -> Result<FreeCashFlowBase> {
    if let Some(fcf) = info.free_cashflow {
        info!("Using reported free cash flow for {}: {}", ticker, fcf);
        return Ok(FreeCashFlowBase::reported(fcf));
    }

    let reconstructed = statement.and_then(reconstruct_free_cash_flow).ok_or_else(|| {
        ValuationError::DataUnavailable {
            ticker: ticker.to_string(),
            message: "Necessary cash flow data not found.".to_string(),
        }
    })?;

    info!(
        "Reconstructed free cash flow for {} from cash flow statement: {}",
        ticker, reconstructed.value
    );
    Ok(reconstructed)
}
