// src/bin/dcf_report.rs
use clap::Parser;
use dcf_valuation::config::AppConfig;
use dcf_valuation::models::ValuationAssumptions;
use dcf_valuation::services::input::RawValuationInput;
use dcf_valuation::services::report::{export_report, render_summary};
use dcf_valuation::services::valuation::calculate;
use dcf_valuation::services::yahoo::YahooFinanceSource;
use dotenv::dotenv;
use log::error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dcf_report")]
#[command(about = "Estimate a company's intrinsic value with a discounted cash flow model.")]
struct Cli {
    /// Stock ticker symbol, e.g. AAPL
    ticker: String,

    /// Required rate of return, as a fraction
    #[arg(long, default_value_t = ValuationAssumptions::default().discount_rate.to_string())]
    discount_rate: String,

    /// Annual FCF growth during the forecast period
    #[arg(long, default_value_t = ValuationAssumptions::default().growth_rate.to_string())]
    growth_rate: String,

    /// Perpetual growth after the forecast period
    #[arg(long, default_value_t = ValuationAssumptions::default().terminal_growth_rate.to_string())]
    terminal_growth_rate: String,

    /// Forecast period in years
    #[arg(long, default_value_t = ValuationAssumptions::default().forecast_years.to_string())]
    years: String,

    /// Write the text report here (".txt" is added if there is no extension)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    let source = YahooFinanceSource::new(&config)?;

    let input = RawValuationInput {
        ticker: cli.ticker,
        discount_rate: cli.discount_rate,
        growth_rate: cli.growth_rate,
        terminal_growth_rate: cli.terminal_growth_rate,
        forecast_years: cli.years,
    };

    println!("Fetching data for {}...", input.ticker.trim().to_uppercase());
    let result = calculate(&source, &input).await.map_err(|e| {
        error!("{}: {}", e.kind(), e);
        e
    })?;
    print!("{}", render_summary(&result));

    if let Some(path) = cli.output {
        let written = export_report(Some(&result), &path)?;
        println!("Report exported to {}", written.display());
    }

    Ok(())
}
