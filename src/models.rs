// src/models.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const OPERATING_CASH_FLOW: &str = "Total Cash From Operating Activities";
pub const CAPITAL_EXPENDITURES: &str = "Capital Expenditures";

/// User assumptions driving one DCF calculation. Rates are fractions (0.10 = 10%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationAssumptions {
    pub discount_rate: f64,
    pub growth_rate: f64,
    pub terminal_growth_rate: f64,
    pub forecast_years: u32,
}

impl Default for ValuationAssumptions {
    fn default() -> Self {
        ValuationAssumptions {
            discount_rate: 0.10,
            growth_rate: 0.05,
            terminal_growth_rate: 0.02,
            forecast_years: 5,
        }
    }
}

/// Where the free-cash-flow base figure came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FcfOrigin {
    /// Taken directly from the info bundle's `freeCashflow` field.
    Reported,
    /// Operating cash flow plus (non-positive) capital expenditures.
    Reconstructed {
        period: NaiveDate,
        operating_cash_flow: f64,
        capital_expenditures: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeCashFlowBase {
    pub value: f64,
    pub origin: FcfOrigin,
}

impl FreeCashFlowBase {
    pub fn reported(value: f64) -> Self {
        FreeCashFlowBase {
            value,
            origin: FcfOrigin::Reported,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyProjection {
    pub year: u32,
    pub projected: f64,
    pub discounted: f64,
}

/// Descriptive company fields carried into the report. Each one is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub long_name: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
}

impl CompanyProfile {
    /// Present fields in report order, keyed by their info-bundle names.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("longName", &self.long_name),
            ("sector", &self.sector),
            ("industry", &self.industry),
            ("country", &self.country),
            ("website", &self.website),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
    }
}

/// Info bundle returned by a cash-flow source for one ticker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    pub free_cashflow: Option<f64>,
    pub shares_outstanding: Option<f64>,
    #[serde(flatten)]
    pub profile: CompanyProfile,
}

/// Cash-flow statement: line items by name, one value per reporting period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashFlowStatement {
    line_items: HashMap<String, HashMap<NaiveDate, f64>>,
}

impl CashFlowStatement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, line_item: impl Into<String>, period: NaiveDate, value: f64) {
        self.line_items
            .entry(line_item.into())
            .or_default()
            .insert(period, value);
    }

    pub fn with(mut self, line_item: &str, period: NaiveDate, value: f64) -> Self {
        self.insert(line_item, period, value);
        self
    }

    pub fn has_line_item(&self, line_item: &str) -> bool {
        self.line_items.contains_key(line_item)
    }

    /// Latest period reported by any line item.
    pub fn most_recent_period(&self) -> Option<NaiveDate> {
        self.line_items
            .values()
            .flat_map(|periods| periods.keys().copied())
            .max()
    }

    pub fn value(&self, line_item: &str, period: NaiveDate) -> Option<f64> {
        self.line_items.get(line_item)?.get(&period).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }
}

/// Output of one completed DCF calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    pub ticker: String,
    pub free_cash_flow: FreeCashFlowBase,
    pub projections: Vec<YearlyProjection>,
    pub terminal_value: f64,
    pub discounted_terminal_value: f64,
    pub enterprise_value: f64,
    pub per_share_value: Option<f64>,
    pub assumptions: ValuationAssumptions,
    pub company: CompanyProfile,
}
