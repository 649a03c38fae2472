// src/services/source.rs
use async_trait::async_trait;

use crate::error::Result;
use crate::models::{CashFlowStatement, CompanyInfo};

/// Capability for looking up a company's cash-flow data.
///
/// Implementations report lookup and transport failures as
/// [`ValuationError::DataFetch`](crate::error::ValuationError::DataFetch).
#[async_trait]
pub trait CashFlowSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Info bundle: reported free cash flow, shares outstanding and
    /// descriptive fields.
    async fn company_info(&self, ticker: &str) -> Result<CompanyInfo>;

    /// Historical cash-flow statement covering one or more periods.
    async fn cash_flow_statement(&self, ticker: &str) -> Result<CashFlowStatement>;
}
