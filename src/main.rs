//! pickup-clusters CLI entry point
//!
//! Trash pickup address clustering - CLI + web API

use pickup_clusters::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
