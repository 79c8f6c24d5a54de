// Retirement Planner - Web Server
// Serves the calculators as a JSON API

use anyhow::{Context as AnyhowContext, Result};
use retirement_planner::api::{router, AppState};
use retirement_planner::{init_tracing, CalculatorKind, PlannerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("info,tower_http=debug");

    let config = PlannerConfig::load()?;
    let addr = config.server_addr.clone();

    let state = AppState::from_config(config)?;
    tracing::info!(funds = state.catalog.fund_count(), "fund catalog ready");

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to address {}", addr))?;

    tracing::info!("🚀 Server running on http://{}", addr);
    for kind in CalculatorKind::ALL {
        tracing::info!("   POST /api/{}", kind);
    }

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
