// src/bin/fetch_cash_flow.rs
use dcf_valuation::config::AppConfig;
use dcf_valuation::models::{CAPITAL_EXPENDITURES, OPERATING_CASH_FLOW};
use dcf_valuation::services::cash_flow::resolve_free_cash_flow;
use dcf_valuation::services::input::normalize_ticker;
use dcf_valuation::services::source::CashFlowSource;
use dcf_valuation::services::yahoo::YahooFinanceSource;
use dotenv::dotenv;
use log::{error, info};
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let raw = env::args().nth(1).unwrap_or_else(|| "AAPL".to_string());
    let ticker = normalize_ticker(&raw)?;
    let config = AppConfig::from_env()?;
    let source = YahooFinanceSource::new(&config)?;

    info!("Probing cash flow data for {}...", ticker);

    let company = source.company_info(&ticker).await?;
    println!("{}", serde_json::to_string_pretty(&company)?);

    // Always fetch the statement here so both paths can be compared.
    let statement = match source.cash_flow_statement(&ticker).await {
        Ok(statement) => {
            match statement.most_recent_period() {
                Some(period) => println!(
                    "Most recent statement period {}: operating cash flow {:?}, capital expenditures {:?}",
                    period,
                    statement.value(OPERATING_CASH_FLOW, period),
                    statement.value(CAPITAL_EXPENDITURES, period)
                ),
                None => println!("Cash flow statement has no periods"),
            }
            Some(statement)
        }
        Err(e) => {
            error!("Cash flow statement unavailable: {}", e);
            None
        }
    };

    match resolve_free_cash_flow(&ticker, &company, statement.as_ref()) {
        Ok(fcf) => println!("Resolved free cash flow: {} ({:?})", fcf.value, fcf.origin),
        Err(e) => error!("{}", e),
    }

    Ok(())
}
