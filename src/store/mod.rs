//! Customer store
//!
//! A file-backed stand-in for the user/subscription store that feeds
//! clustering. Customers are kept as a JSON array, by default in the XDG
//! data directory (~/.local/share/pickup-clusters/customers.json).

use crate::cluster::Customer;
use crate::config::defaults::{APP_DIR_NAME, CUSTOMERS_FILE_NAME};
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Customer storage manager
#[derive(Debug)]
pub struct CustomerStore {
    customers: Vec<Customer>,
    path: PathBuf,
}

impl CustomerStore {
    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Store("Could not determine data directory".to_string()))
    }

    /// Get the default customers file path
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join(CUSTOMERS_FILE_NAME))
    }

    /// Resolve a configured path, falling back to the default when empty
    pub fn resolve_path(configured: &str) -> Result<PathBuf> {
        if configured.is_empty() {
            Self::default_path()
        } else {
            Ok(PathBuf::from(configured))
        }
    }

    /// Load customers from a file
    ///
    /// A missing file loads as an empty store.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let customers = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Store(format!("Failed to read {}: {}", path.display(), e))
            })?;

            serde_json::from_str(&content).map_err(|e| {
                Error::Store(format!("Failed to parse {}: {}", path.display(), e))
            })?
        } else {
            Vec::new()
        };

        Ok(Self { customers, path })
    }

    /// Save customers back to the store file
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Store(format!("Failed to create store directory: {}", e))
            })?;
        }

        let content = serde_json::to_string_pretty(&self.customers)?;

        fs::write(&self.path, content).map_err(|e| {
            Error::Store(format!("Failed to write {}: {}", self.path.display(), e))
        })?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get all customers, in insertion order
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Replace the whole customer list
    pub fn replace(&mut self, customers: Vec<Customer>) {
        self.customers = customers;
    }

    /// Replace the whole customer list and persist it
    ///
    /// On a failed save the previous list is restored.
    pub fn replace_and_save(&mut self, customers: Vec<Customer>) -> Result<()> {
        let previous = std::mem::replace(&mut self.customers, customers);
        if let Err(e) = self.save() {
            self.customers = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Insert a customer, replacing any existing record with the same id in place
    pub fn upsert(&mut self, customer: Customer) {
        match self.customers.iter_mut().find(|c| c.id == customer.id) {
            Some(existing) => *existing = customer,
            None => self.customers.push(customer),
        }
    }

    /// Get customer by ID
    pub fn get(&self, id: i64) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    /// Remove customer by ID
    pub fn remove(&mut self, id: i64) -> Option<Customer> {
        let idx = self.customers.iter().position(|c| c.id == id)?;
        Some(self.customers.remove(idx))
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}
