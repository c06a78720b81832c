mod api;
mod config;
mod error;
mod month;
mod report;
mod schemas;
mod services;

use api::ApiClient;
use config::AppConfig;
use month::ReportingMonth;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = AppConfig::from_env()?;
    let month = match std::env::args().nth(1) {
        Some(raw) => ReportingMonth::parse(&raw)?,
        None => ReportingMonth::current(),
    };

    tracing::info!(
        app_name = %config.app_name,
        environment = %config.environment,
        api_base_url = %config.api_base_url,
        %month,
        "fetching snapshot"
    );

    let client = ApiClient::new(&config)?;
    let snapshot = client.fetch_snapshot(month).await?;

    tracing::info!(
        properties = snapshot.properties.len(),
        units = snapshot.units.len(),
        tenants = snapshot.tenants.len(),
        leases = snapshot.leases.len(),
        payments = snapshot.payments.len(),
        "snapshot loaded"
    );

    print!(
        "{}",
        report::render_monthly_report(&snapshot, config.delinquency_display_limit)
    );
    Ok(())
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
