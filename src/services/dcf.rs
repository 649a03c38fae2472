// src/services/dcf.rs
use log::{debug, warn};

use crate::error::{Result, ValuationError};
use crate::models::{CompanyProfile, FreeCashFlowBase, ValuationAssumptions, ValuationResult, YearlyProjection};

/// Longest forecast horizon the engine will project.
pub const MAX_FORECAST_YEARS: u32 = 1000;

fn ensure_finite(value: f64, name: &str) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValuationError::input(format!("{} must be a finite number, got {}", name, value)))
    }
}

fn validate(fcf_base: f64, assumptions: &ValuationAssumptions, shares_outstanding: Option<f64>) -> Result<i32> {
    if assumptions.forecast_years == 0 {
        return Err(ValuationError::input("Forecast period must be a positive number of years."));
    }
    if assumptions.forecast_years > MAX_FORECAST_YEARS {
        return Err(ValuationError::input(format!(
            "Forecast period of {} years is too long (at most {}).",
            assumptions.forecast_years, MAX_FORECAST_YEARS
        )));
    }
    // Bounded by MAX_FORECAST_YEARS, so the cast is lossless.
    let years = assumptions.forecast_years as i32;

    ensure_finite(fcf_base, "Free cash flow")?;
    ensure_finite(assumptions.discount_rate, "Discount rate")?;
    ensure_finite(assumptions.growth_rate, "Growth rate")?;
    ensure_finite(assumptions.terminal_growth_rate, "Terminal growth rate")?;
    if let Some(shares) = shares_outstanding {
        ensure_finite(shares, "Shares outstanding")?;
    }

    if assumptions.discount_rate == assumptions.terminal_growth_rate {
        return Err(ValuationError::DegenerateAssumption(format!(
            "discount rate ({}) equals terminal growth rate ({}); terminal value is undefined",
            assumptions.discount_rate, assumptions.terminal_growth_rate
        )));
    }
    if 1.0 + assumptions.discount_rate == 0.0 {
        return Err(ValuationError::DegenerateAssumption(
            "discount rate of -1 makes every discount factor zero".to_string(),
        ));
    }
    if assumptions.discount_rate < assumptions.terminal_growth_rate {
        warn!(
            "Discount rate {} is below terminal growth rate {}; terminal value will be negative",
            assumptions.discount_rate, assumptions.terminal_growth_rate
        );
    }

    Ok(years)
}

fn overflow(what: &str, assumptions: &ValuationAssumptions) -> ValuationError {
    ValuationError::DegenerateAssumption(format!(
        "{} is not finite (discount rate {}, growth rate {}, terminal growth rate {})",
        what, assumptions.discount_rate, assumptions.growth_rate, assumptions.terminal_growth_rate
    ))
}

/// Run the DCF model over a free-cash-flow base.
///
/// Each forecast year compounds the previous year's projection by the growth
/// rate and is discounted by `(1 + r)^year`. The terminal value follows the
/// Gordon Growth Model on the last projected year and is discounted by
/// `forecast_years` periods, i.e. it is stated as of the end of the final
/// forecast year rather than one period later.
///
/// The per-share value is only present when `shares_outstanding` is known
/// and positive. Non-finite inputs are rejected, and so is any overflow to
/// infinity along the way.
pub fn compute_valuation(
    ticker: &str,
    fcf: FreeCashFlowBase,
    assumptions: ValuationAssumptions,
    shares_outstanding: Option<f64>,
    company: CompanyProfile,
) -> Result<ValuationResult> {
    let years = validate(fcf.value, &assumptions, shares_outstanding)?;
    let discount_base = 1.0 + assumptions.discount_rate;

    let mut projections = Vec::with_capacity(assumptions.forecast_years as usize);
    let mut current_fcf = fcf.value;
    for year in 1..=years {
        current_fcf *= 1.0 + assumptions.growth_rate;
        let discounted = current_fcf / discount_base.powi(year);
        debug!("Year {}: projected {}, discounted {}", year, current_fcf, discounted);
        if !current_fcf.is_finite() || !discounted.is_finite() {
            return Err(overflow(&format!("projected cash flow for year {}", year), &assumptions));
        }
        projections.push(YearlyProjection {
            year: year as u32,
            projected: current_fcf,
            discounted,
        });
    }

    // Loop ran at least once: forecast_years >= 1 was checked above.
    let last_projected = current_fcf;
    let terminal_value = last_projected * (1.0 + assumptions.terminal_growth_rate)
        / (assumptions.discount_rate - assumptions.terminal_growth_rate);
    let discounted_terminal_value = terminal_value / discount_base.powi(years);

    if !terminal_value.is_finite() || !discounted_terminal_value.is_finite() {
        return Err(overflow("terminal value", &assumptions));
    }

    // Plain f64 sum, no rounding; only its finiteness is checked.
    let enterprise_value =
        projections.iter().map(|p| p.discounted).sum::<f64>() + discounted_terminal_value;
    if !enterprise_value.is_finite() {
        return Err(overflow("enterprise value", &assumptions));
    }

    let per_share_value = match shares_outstanding {
        Some(shares) if shares > 0.0 => Some(enterprise_value / shares),
        Some(shares) => {
            warn!("Ignoring non-positive shares outstanding value {} for {}", shares, ticker);
            None
        }
        None => None,
    };
    if per_share_value.is_some_and(|v| !v.is_finite()) {
        return Err(overflow("per-share value", &assumptions));
    }

    Ok(ValuationResult {
        ticker: ticker.to_string(),
        free_cash_flow: fcf,
        projections,
        terminal_value,
        discounted_terminal_value,
        enterprise_value,
        per_share_value,
        assumptions,
        company,
    })
}
