use chrono::Utc;
use marketplace_rollup::analytics::{format_amount, RollupEngine, Scope};
use marketplace_rollup::app_system::{seed_demo, setup_tracing, MarketplaceSystem};
use marketplace_rollup::config::RollupConfig;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = RollupConfig::from_env().map_err(|e| e.to_string())?;
    info!(period = %config.default_period, currency = %config.currency, "Starting marketplace rollup demo");

    // Create the entire marketplace system (starts all actors)
    let system = MarketplaceSystem::new();
    let now = Utc::now();

    let seeded = seed_demo(&system, now)
        .instrument(tracing::info_span!("seeding"))
        .await
        .map_err(|e| e.to_string())?;

    let engine = RollupEngine::from_config(system.data_provider(), &config);

    let mut scopes = vec![Scope::Platform];
    scopes.extend(seeded.vendor_ids.iter().cloned().map(Scope::Vendor));

    for scope in &scopes {
        match engine.build_overview(config.default_period, scope, now).await {
            Ok(result) => {
                let json = serde_json::to_string_pretty(&result).map_err(|e| e.to_string())?;
                println!("== {} ({}) ==\n{}", scope, result.period, json);
                println!(
                    "Revenue: {}\n",
                    format_amount(result.overview.total_revenue, config.currency)
                );
            }
            Err(e) => {
                error!(scope = %scope, status = e.status_code(), error = %e, "Overview failed");
            }
        }
    }

    // The engine holds client handles; release them so the actors can stop.
    drop(engine);
    system.shutdown().await.map_err(|e| e.to_string())?;

    info!("Application completed successfully");
    Ok(())
}
