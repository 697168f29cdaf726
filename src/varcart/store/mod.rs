//! # Storage Layer
//!
//! The attribute catalog and the products live behind the [`DataStore`]
//! trait, so the engine and commands never know where data comes from.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: JSON files in a data directory
//! - [`memory::InMemoryStore`]: in-memory storage for testing, with an
//!   injectable catalog failure to exercise the "catalog unavailable" path
//!
//! ## Storage Format
//!
//! For `FileStore`:
//! ```text
//! <data dir>/
//! ├── catalog.json     # attribute types and values
//! ├── products.json    # products keyed by id, variations included
//! └── config.json      # settings (see config.rs)
//! ```

use crate::error::Result;
use crate::model::{Catalog, Product};
use uuid::Uuid;

pub mod fs;
pub mod memory;

/// Abstract interface for catalog and product storage.
pub trait DataStore {
    /// Read the whole attribute catalog
    fn load_catalog(&self) -> Result<Catalog>;

    /// Replace the stored catalog
    fn save_catalog(&mut self, catalog: &Catalog) -> Result<()>;

    /// Get a product by ID
    fn get_product(&self, id: &Uuid) -> Result<Product>;

    /// Save a product (create or update)
    fn save_product(&mut self, product: &Product) -> Result<()>;

    /// List all products, oldest first
    fn list_products(&self) -> Result<Vec<Product>>;

    /// Delete a product permanently
    fn delete_product(&mut self, id: &Uuid) -> Result<()>;
}
