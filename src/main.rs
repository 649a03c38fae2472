use dcf_valuation::config::AppConfig;
use dcf_valuation::handlers::valuation::AppState;
use dcf_valuation::routes;
use dcf_valuation::services::valuation::ValuationDesk;
use dcf_valuation::services::yahoo::YahooFinanceSource;
use dotenv::dotenv;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::Filter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();
    info!("Logger initialized. Starting the application...");

    let config = AppConfig::from_env()?;
    info!("Using PORT: {}", config.port);

    let source = YahooFinanceSource::new(&config)?;
    let state = Arc::new(AppState {
        desk: ValuationDesk::new(Arc::new(source)),
        report_dir: config.report_dir.clone(),
    });
    info!("Reports will be exported to {}", config.report_dir.display());

    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();
    info!("Will bind to: {}", addr);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(vec!["GET", "POST"]);

    let api = routes::routes(state).with(cors);
    info!("Routes configured successfully with CORS.");

    info!("Starting server on {}", addr);
    warp::serve(api).run(addr).await;
    Ok(())
}
