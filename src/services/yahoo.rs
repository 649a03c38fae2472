// src/services/yahoo.rs
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, error, info};
use reqwest::Client;
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::{Result, ValuationError};
use crate::models::{CashFlowStatement, CompanyInfo, CompanyProfile, CAPITAL_EXPENDITURES, OPERATING_CASH_FLOW};
use crate::services::source::CashFlowSource;

const INFO_MODULES: &str = "financialData,defaultKeyStatistics,price,assetProfile";
const CASH_FLOW_MODULES: &str = "cashflowStatementHistory";

/// Yahoo field name -> statement line item.
const LINE_ITEMS: &[(&str, &str)] = &[
    ("totalCashFromOperatingActivities", OPERATING_CASH_FLOW),
    ("capitalExpenditures", CAPITAL_EXPENDITURES),
];

/// [`CashFlowSource`] backed by Yahoo Finance's quote-summary JSON API.
pub struct YahooFinanceSource {
    client: Client,
    base_url: String,
}

impl YahooFinanceSource {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.http_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.yahoo_base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn quote_summary(&self, ticker: &str, modules: &str) -> Result<Value> {
        let url = format!("{}/v10/finance/quoteSummary/{}", self.base_url, ticker);
        info!("Fetching {} for {} from {}", modules, ticker, url);

        let fetch_error = |message: String| {
            error!("Yahoo lookup failed for {}: {}", ticker, message);
            ValuationError::DataFetch {
                ticker: ticker.to_string(),
                message,
            }
        };

        let resp = self
            .client
            .get(&url)
            .query(&[("modules", modules)])
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| fetch_error(e.to_string()))?;
        debug!("Yahoo response for {} ({}): {}", ticker, status, body);

        let payload: Value = serde_json::from_str(&body)
            .map_err(|e| fetch_error(format!("unreadable response (HTTP {}): {}", status, e)))?;

        summary_result(ticker, &payload)
            .cloned()
            .map_err(|e| match e {
                ValuationError::DataFetch { message, .. } => fetch_error(message),
                other => other,
            })
    }
}

#[async_trait]
impl CashFlowSource for YahooFinanceSource {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn company_info(&self, ticker: &str) -> Result<CompanyInfo> {
        let result = self.quote_summary(ticker, INFO_MODULES).await?;
        Ok(parse_company_info(&result))
    }

    async fn cash_flow_statement(&self, ticker: &str) -> Result<CashFlowStatement> {
        let result = self.quote_summary(ticker, CASH_FLOW_MODULES).await?;
        Ok(parse_cash_flow_statement(&result))
    }
}

/// First entry of `quoteSummary.result`, or the API's own error description.
pub fn summary_result<'a>(ticker: &str, payload: &'a Value) -> Result<&'a Value> {
    let summary = &payload["quoteSummary"];

    if let Some(err) = summary.get("error").filter(|e| !e.is_null()) {
        let message = err["description"]
            .as_str()
            .or_else(|| err["code"].as_str())
            .unwrap_or("unknown error")
            .to_string();
        return Err(ValuationError::DataFetch {
            ticker: ticker.to_string(),
            message,
        });
    }

    summary["result"]
        .as_array()
        .and_then(|results| results.first())
        .ok_or_else(|| ValuationError::DataFetch {
            ticker: ticker.to_string(),
            message: "No data found, symbol may be delisted".to_string(),
        })
}

/// Yahoo wraps numbers as `{"raw": 1.0, "fmt": "1.00"}`; empty objects mean absent.
fn raw_number(value: &Value) -> Option<f64> {
    value.get("raw").and_then(Value::as_f64).or_else(|| value.as_f64())
}

fn text(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub fn parse_company_info(result: &Value) -> CompanyInfo {
    let profile = &result["assetProfile"];
    let price = &result["price"];

    CompanyInfo {
        free_cashflow: raw_number(&result["financialData"]["freeCashflow"]),
        shares_outstanding: raw_number(&result["defaultKeyStatistics"]["sharesOutstanding"])
            .or_else(|| raw_number(&price["sharesOutstanding"])),
        profile: CompanyProfile {
            long_name: text(&price["longName"]),
            sector: text(&profile["sector"]),
            industry: text(&profile["industry"]),
            country: text(&profile["country"]),
            website: text(&profile["website"]),
        },
    }
}

fn end_date(value: &Value) -> Option<NaiveDate> {
    if let Some(secs) = value.get("raw").and_then(Value::as_i64) {
        return DateTime::<Utc>::from_timestamp(secs, 0).map(|dt| dt.date_naive());
    }
    value
        .get("fmt")
        .and_then(Value::as_str)
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

pub fn parse_cash_flow_statement(result: &Value) -> CashFlowStatement {
    let mut statement = CashFlowStatement::new();
    let periods = result["cashflowStatementHistory"]["cashflowStatements"]
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or_default();

    for period in periods {
        let Some(date) = end_date(&period["endDate"]) else {
            debug!("Skipping cash flow period without end date");
            continue;
        };
        for (field, line_item) in LINE_ITEMS {
            if let Some(value) = raw_number(&period[*field]) {
                statement.insert(*line_item, date, value);
            }
        }
    }

    statement
}
