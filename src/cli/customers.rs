//! Customers command handler
//!
//! View and manage the customer store that feeds clustering.

use crate::cli::open_store;
use crate::cluster::Customer;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::store::CustomerStore;
use clap::{Args, Subcommand};

/// Customers command arguments
#[derive(Args)]
pub struct CustomersArgs {
    #[command(subcommand)]
    pub command: Option<CustomersCommand>,

    /// Customers file (JSON array)
    #[arg(long, short = 'c', global = true)]
    pub customers: Option<String>,
}

/// Customers subcommands
#[derive(Subcommand)]
pub enum CustomersCommand {
    /// List stored customers
    List,
    /// Add or update a customer
    Add {
        /// Customer ID
        id: i64,
        /// Service address
        address: String,
        #[arg(long, short = 'u', default_value = "")]
        username: String,
        #[arg(long, short = 'm', default_value = "")]
        email: String,
    },
    /// Remove a customer by ID
    Remove {
        /// Customer ID
        id: i64,
    },
    /// Replace the store with a JSON array from a file
    Import {
        /// Path to a JSON array of customers
        file: String,
    },
    /// Remove all customers
    Clear,
}

/// Run the customers command
pub fn run(args: CustomersArgs) -> Result<()> {
    let config = Config::load()?;
    let mut store = open_store(args.customers.as_deref(), &config)?;

    match args.command.unwrap_or(CustomersCommand::List) {
        CustomersCommand::List => list_customers(&store),
        CustomersCommand::Add {
            id,
            address,
            username,
            email,
        } => {
            let existed = store.get(id).is_some();
            store.upsert(Customer {
                id,
                username,
                email,
                address: Some(address),
            });
            store.save()?;
            println!("{} customer {}", if existed { "Updated" } else { "Added" }, id);
            Ok(())
        }
        CustomersCommand::Remove { id } => {
            store
                .remove(id)
                .ok_or_else(|| Error::Store(format!("Customer not found: {}", id)))?;
            store.save()?;
            println!("Removed customer {}", id);
            Ok(())
        }
        CustomersCommand::Import { file } => {
            if !std::path::Path::new(&file).exists() {
                return Err(Error::Store(format!("No such file: {}", file)));
            }
            let imported = CustomerStore::load_from(file.as_str())?;
            let count = imported.len();
            store.replace(imported.customers().to_vec());
            store.save()?;
            println!("Imported {} customers into {}", count, store.path().display());
            Ok(())
        }
        CustomersCommand::Clear => {
            let count = store.len();
            store.replace(Vec::new());
            store.save()?;
            println!("Cleared {} customers.", count);
            Ok(())
        }
    }
}

/// Print stored customers
fn list_customers(store: &CustomerStore) -> Result<()> {
    if store.is_empty() {
        println!("No customers in {}.", store.path().display());
        return Ok(());
    }

    println!("Customers ({}):\n", store.len());
    for customer in store.customers() {
        let address = customer.usable_address().unwrap_or("(no address)");
        let name = if customer.username.is_empty() {
            "(unnamed)"
        } else {
            customer.username.as_str()
        };
        println!("  {:>6}  {:16} {}", customer.id, name, address);
    }

    Ok(())
}
