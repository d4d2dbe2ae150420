//! Status command handler
//!
//! Shows the active clustering setup and, optionally, server status.

use crate::cli::open_store;
use crate::config::Config;
use crate::error::Result;
use crate::geo::neighborhood::REGISTRY;
use clap::Args;

/// Status command arguments
#[derive(Args)]
pub struct StatusArgs {
    /// Check if server is running (tries to connect)
    #[arg(long)]
    pub server: bool,
}

/// Run the status command
pub async fn run(args: StatusArgs) -> Result<()> {
    let config = Config::load()?;

    if args.server {
        check_server_status(&config).await;
    }

    let engine = config.engine();
    let policy = engine.policy();

    println!("pickup-clusters v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("Geocoder:      {}", engine.geocoder_name());
    println!("Enrichment:    {}", engine.enricher_name());
    println!("Neighborhoods: {}", REGISTRY.len());
    println!(
        "Pricing:       ${} per customer, completed within {} days",
        policy.revenue_per_customer, policy.recent_pickup_days
    );
    println!();

    match open_store(None, &config) {
        Ok(store) => println!(
            "Customers:     {} ({})",
            store.len(),
            store.path().display()
        ),
        Err(e) => println!("Customers:     unavailable ({})", e),
    }

    Ok(())
}

/// Check if the server is running
async fn check_server_status(config: &Config) {
    let url = format!("http://{}/api/status", config.server_addr());

    match reqwest::get(&url).await {
        Ok(response) => {
            if response.status().is_success() {
                println!("Server: RUNNING on {}", config.server_addr());
                if let Ok(status) = response.json::<serde_json::Value>().await {
                    if let Some(version) = status.get("version").and_then(|v| v.as_str()) {
                        println!("  Version: {}", version);
                    }
                    if let Some(customers) = status.get("customers").and_then(|v| v.as_u64()) {
                        println!("  Customers: {}", customers);
                    }
                }
            } else {
                println!("Server: ERROR (status {})", response.status());
            }
        }
        Err(_) => {
            println!("Server: NOT RUNNING on {}", config.server_addr());
        }
    }
    println!();
}
