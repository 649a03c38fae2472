//! Shared fixtures for the integration tests.
//!
//! `StaticSource` is an in-memory `CashFlowSource` keyed by ticker, so the
//! valuation flow can run without touching the network.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use dcf_valuation::models::{
    CashFlowStatement, CompanyInfo, CompanyProfile, CAPITAL_EXPENDITURES, OPERATING_CASH_FLOW,
};
use dcf_valuation::services::input::RawValuationInput;
use dcf_valuation::{CashFlowSource, Result, ValuationError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Default)]
pub struct Fixture {
    pub info: CompanyInfo,
    pub statement: Option<CashFlowStatement>,
}

#[derive(Default)]
pub struct StaticSource {
    fixtures: HashMap<String, Fixture>,
    pub info_calls: AtomicUsize,
    pub statement_calls: AtomicUsize,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, ticker: &str, fixture: Fixture) -> Self {
        self.fixtures.insert(ticker.to_string(), fixture);
        self
    }

    pub fn statement_calls(&self) -> usize {
        self.statement_calls.load(Ordering::SeqCst)
    }

    fn lookup(&self, ticker: &str) -> Result<&Fixture> {
        self.fixtures.get(ticker).ok_or_else(|| ValuationError::DataFetch {
            ticker: ticker.to_string(),
            message: "Quote not found for ticker symbol".to_string(),
        })
    }
}

#[async_trait]
impl CashFlowSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn company_info(&self, ticker: &str) -> Result<CompanyInfo> {
        self.info_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.lookup(ticker)?.info.clone())
    }

    async fn cash_flow_statement(&self, ticker: &str) -> Result<CashFlowStatement> {
        self.statement_calls.fetch_add(1, Ordering::SeqCst);
        self.lookup(ticker)?
            .statement
            .clone()
            .ok_or_else(|| ValuationError::DataFetch {
                ticker: ticker.to_string(),
                message: "cash flow statement request timed out".to_string(),
            })
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn acme_profile() -> CompanyProfile {
    CompanyProfile {
        long_name: Some("Acme Corporation".into()),
        sector: Some("Industrials".into()),
        industry: None,
        country: Some("United States".into()),
        website: Some("https://acme.example".into()),
    }
}

/// Reports FCF directly and has a statement that would give a different figure.
pub fn reported_fixture() -> Fixture {
    Fixture {
        info: CompanyInfo {
            free_cashflow: Some(1000.0),
            shares_outstanding: Some(100.0),
            profile: acme_profile(),
        },
        statement: Some(statement(5000.0, -1000.0)),
    }
}

/// No direct FCF; reconstruction from the statement is required.
pub fn statement_fixture(operating: f64, capex: f64) -> Fixture {
    Fixture {
        info: CompanyInfo::default(),
        statement: Some(statement(operating, capex)),
    }
}

pub fn statement(operating: f64, capex: f64) -> CashFlowStatement {
    CashFlowStatement::new()
        .with(OPERATING_CASH_FLOW, date(2023, 12, 31), operating)
        .with(CAPITAL_EXPENDITURES, date(2023, 12, 31), capex)
        .with(OPERATING_CASH_FLOW, date(2022, 12, 31), 1.0)
        .with(CAPITAL_EXPENDITURES, date(2022, 12, 31), -1.0)
}

pub fn input(ticker: &str, discount: &str, growth: &str, terminal: &str, years: &str) -> RawValuationInput {
    RawValuationInput {
        ticker: ticker.into(),
        discount_rate: discount.into(),
        growth_rate: growth.into(),
        terminal_growth_rate: terminal.into(),
        forecast_years: years.into(),
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    let tolerance = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {}, got {}",
        expected,
        actual
    );
}
