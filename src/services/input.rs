// src/services/input.rs
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValuationError};
use crate::models::ValuationAssumptions;
use crate::services::dcf::MAX_FORECAST_YEARS;

/// The five form fields exactly as the user typed them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawValuationInput {
    pub ticker: String,
    pub discount_rate: String,
    pub growth_rate: String,
    pub terminal_growth_rate: String,
    pub forecast_years: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValuationRequest {
    pub ticker: String,
    pub assumptions: ValuationAssumptions,
}

fn parse_rate(raw: &str, label: &'static str, failed: &mut Vec<&'static str>) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            failed.push(label);
            0.0
        }
    }
}

fn parse_years(raw: &str, failed: &mut Vec<&'static str>) -> u32 {
    match raw.trim().parse::<u32>() {
        Ok(years) if (1..=MAX_FORECAST_YEARS).contains(&years) => years,
        _ => {
            failed.push("forecast period (whole number of years from 1 to 1000)");
            0
        }
    }
}

/// Normalize a ticker symbol to uppercase and check its characters.
pub fn normalize_ticker(raw: &str) -> Result<String> {
    let ticker = raw.trim().to_uppercase();
    if ticker.is_empty() {
        return Err(ValuationError::input("Please enter a valid stock ticker symbol."));
    }

    let re = Regex::new(r"^[A-Z0-9^][A-Z0-9.\-=^]{0,15}$")
        .map_err(|e| ValuationError::input(e.to_string()))?;
    if !re.is_match(&ticker) {
        return Err(ValuationError::input(format!(
            "'{}' is not a valid stock ticker symbol.",
            ticker
        )));
    }
    Ok(ticker)
}

/// Parse raw form input. All numeric failures are reported together; an
/// empty ticker is reported on its own.
pub fn parse_request(raw: &RawValuationInput) -> Result<ValuationRequest> {
    let mut failed = Vec::new();
    let discount_rate = parse_rate(&raw.discount_rate, "discount rate", &mut failed);
    let growth_rate = parse_rate(&raw.growth_rate, "growth rate", &mut failed);
    let terminal_growth_rate = parse_rate(&raw.terminal_growth_rate, "terminal growth rate", &mut failed);
    let forecast_years = parse_years(&raw.forecast_years, &mut failed);

    if !failed.is_empty() {
        return Err(ValuationError::input(format!(
            "Please check your inputs. Ensure numeric values are entered where required ({}).",
            failed.join(", ")
        )));
    }

    Ok(ValuationRequest {
        ticker: normalize_ticker(&raw.ticker)?,
        assumptions: ValuationAssumptions {
            discount_rate,
            growth_rate,
            terminal_growth_rate,
            forecast_years,
        },
    })
}
