//! Route command handler
//!
//! Prints the nearest-neighbor pickup order for one cluster.

use crate::cli::{open_store, write_output};
use crate::cluster::find_cluster;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::get_formatter;
use crate::route::plan_route;
use clap::Args;

/// Route command arguments
#[derive(Args)]
pub struct RouteArgs {
    /// Cluster ID (neighborhood slug, e.g. "center_city")
    pub cluster_id: String,

    /// Customers file (JSON array)
    #[arg(long, short = 'c')]
    pub customers: Option<String>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}

/// Run the route command
pub fn run(args: RouteArgs) -> Result<()> {
    let config = Config::load()?;
    let store = open_store(args.customers.as_deref(), &config)?;

    let format = args.format.unwrap_or(config.defaults.format.clone());
    let formatter = get_formatter(&format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let engine = config.engine();
    let clusters = engine.cluster_customer_addresses(store.customers());

    let cluster = find_cluster(&clusters, &args.cluster_id).ok_or_else(|| {
        let known: Vec<&str> = clusters.iter().map(|c| c.id.as_str()).collect();
        if !known.is_empty() {
            eprintln!("Known clusters: {}", known.join(", "));
        }
        Error::ClusterNotFound(args.cluster_id.clone())
    })?;

    let plan = plan_route(cluster, &config.url.directions);
    let output = formatter.format_route(&plan, &config)?;
    write_output(args.output, &output)
}
