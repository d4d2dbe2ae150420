//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod cluster;
pub mod config;
pub mod customers;
pub mod route;
pub mod serve;
pub mod stats;
pub mod status;

use crate::config::Config;
use crate::error::Result;
use crate::store::CustomerStore;
use clap::{Parser, Subcommand};

/// Trash pickup address clustering and route ordering
#[derive(Parser)]
#[command(name = "pickup-clusters")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Group customers into neighborhood clusters
    Cluster(cluster::ClusterArgs),

    /// Show the optimized pickup route for one cluster
    Route(route::RouteArgs),

    /// Show dashboard summary numbers
    Stats(stats::StatsArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Show configuration and server status
    Status(status::StatusArgs),

    /// View and manage stored customers
    Customers(customers::CustomersArgs),
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Cluster(args) => cluster::run(args),
        Commands::Route(args) => route::run(args),
        Commands::Stats(args) => stats::run(args),
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
        Commands::Status(args) => status::run(args).await,
        Commands::Customers(args) => customers::run(args),
    }
}

/// Open the customer store named on the command line, or the configured one
pub(crate) fn open_store(path: Option<&str>, config: &Config) -> Result<CustomerStore> {
    let path = match path {
        Some(path) => CustomerStore::resolve_path(path)?,
        None => CustomerStore::resolve_path(&config.data.customers_file)?,
    };
    CustomerStore::load_from(path)
}

/// Write command output to a file or stdout
pub(crate) fn write_output(output: Option<String>, content: &str) -> Result<()> {
    if let Some(path) = output {
        std::fs::write(&path, content)?;
        eprintln!("Output written to {}", path);
    } else {
        println!("{}", content);
    }
    Ok(())
}
