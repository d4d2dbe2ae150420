//! Cluster command handler
//!
//! Groups stored customers into neighborhood clusters.

use crate::cli::{open_store, write_output};
use crate::cluster::enrich::available_enrichers;
use crate::cluster::ClusterEngine;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter};
use crate::geo::available_geocoders;
use crate::geo::neighborhood::REGISTRY;
use clap::Args;

/// Cluster command arguments
#[derive(Args)]
pub struct ClusterArgs {
    /// Customers file (JSON array)
    #[arg(long, short = 'c')]
    pub customers: Option<String>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// Geocoder
    #[arg(long, short = 'g')]
    pub geocoder: Option<String>,

    /// Pickup detail enrichment (random, seeded or none)
    #[arg(long, short = 'e')]
    pub enrichment: Option<String>,

    /// List the neighborhood registry
    #[arg(short = 'N', long = "list-neighborhoods")]
    pub list_neighborhoods: bool,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the cluster command
pub fn run(args: ClusterArgs) -> Result<()> {
    if args.list_neighborhoods {
        list_neighborhoods();
        return Ok(());
    }

    if args.list_formats {
        list_formats();
        return Ok(());
    }

    let config = Config::load()?;
    let store = open_store(args.customers.as_deref(), &config)?;

    let geocoder = args.geocoder.unwrap_or(config.clustering.geocoder.clone());
    let enrichment = args.enrichment.unwrap_or(config.clustering.enrichment.clone());
    let format = args.format.unwrap_or(config.defaults.format.clone());

    let formatter = get_formatter(&format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let engine = ClusterEngine::from_names(
        &geocoder,
        &enrichment,
        config.clustering.seed,
        config.policy(),
    );
    let report = engine.report(store.customers());

    if store.is_empty() {
        eprintln!("No customers in {}", store.path().display());
    }

    let output = formatter.format_report(&report, &config)?;
    write_output(args.output, &output)
}

/// Print the neighborhood registry in match order
fn list_neighborhoods() {
    println!("Neighborhoods (first match wins on ties):");
    for hood in REGISTRY {
        println!(
            "  {:24} ({:.4}, {:.4}) within {} mi",
            hood.name, hood.center.lat, hood.center.lng, hood.radius_miles
        );
    }

    println!();
    println!("Geocoders:");
    for geocoder in available_geocoders() {
        println!("  {:6} - {}", geocoder.name, geocoder.description);
    }

    println!();
    println!("Enrichment:");
    for enricher in available_enrichers() {
        println!("  {:6} - {}", enricher.name, enricher.description);
    }
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}
