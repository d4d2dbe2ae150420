//! Stats command handler

use crate::cli::open_store;
use crate::config::Config;
use crate::error::Result;
use clap::Args;

/// Stats command arguments
#[derive(Args)]
pub struct StatsArgs {
    /// Customers file (JSON array)
    #[arg(long, short = 'c')]
    pub customers: Option<String>,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the stats command
pub fn run(args: StatsArgs) -> Result<()> {
    let config = Config::load()?;
    let store = open_store(args.customers.as_deref(), &config)?;

    let engine = config.engine();
    let clusters = engine.cluster_customer_addresses(store.customers());
    let stats = engine.get_cluster_stats(&clusters);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Clusters:           {}", stats.total_clusters);
    println!("Customers:          {}", stats.total_customers);
    println!("Est. revenue:       ${}", stats.total_revenue);
    println!("Available:          {}", stats.available_clusters);
    println!("Completed recently: {}", stats.completed_today);

    Ok(())
}
