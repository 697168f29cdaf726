use super::DataStore;
use crate::error::{Result, VarcartError};
use crate::model::{Catalog, Product};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
#[cfg(test)]
use std::path::Path;
use uuid::Uuid;

const CATALOG_FILENAME: &str = "catalog.json";
const PRODUCTS_FILENAME: &str = "products.json";

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(VarcartError::Io)?;
        }
        Ok(())
    }

    fn load_products(&self) -> Result<HashMap<Uuid, Product>> {
        let data_file = self.root.join(PRODUCTS_FILENAME);
        if !data_file.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(data_file).map_err(VarcartError::Io)?;
        let products: HashMap<Uuid, Product> =
            serde_json::from_str(&content).map_err(VarcartError::Serialization)?;
        Ok(products)
    }

    fn save_products(&self, products: &HashMap<Uuid, Product>) -> Result<()> {
        self.ensure_dir()?;
        let data_file = self.root.join(PRODUCTS_FILENAME);
        let content = serde_json::to_string_pretty(products).map_err(VarcartError::Serialization)?;
        fs::write(data_file, content).map_err(VarcartError::Io)?;
        Ok(())
    }
}

impl DataStore for FileStore {
    fn load_catalog(&self) -> Result<Catalog> {
        let path = self.root.join(CATALOG_FILENAME);
        if !path.exists() {
            return Ok(Catalog::default());
        }
        let content = fs::read_to_string(path).map_err(VarcartError::Io)?;
        let catalog: Catalog =
            serde_json::from_str(&content).map_err(VarcartError::Serialization)?;
        Ok(catalog)
    }

    fn save_catalog(&mut self, catalog: &Catalog) -> Result<()> {
        self.ensure_dir()?;
        let path = self.root.join(CATALOG_FILENAME);
        let content = serde_json::to_string_pretty(catalog).map_err(VarcartError::Serialization)?;
        fs::write(path, content).map_err(VarcartError::Io)?;
        Ok(())
    }

    fn get_product(&self, id: &Uuid) -> Result<Product> {
        let products = self.load_products()?;
        products
            .get(id)
            .cloned()
            .ok_or(VarcartError::ProductNotFound(*id))
    }

    fn save_product(&mut self, product: &Product) -> Result<()> {
        let mut products = self.load_products()?;
        products.insert(product.id, product.clone());
        self.save_products(&products)
    }

    fn list_products(&self) -> Result<Vec<Product>> {
        let mut products: Vec<Product> = self.load_products()?.into_values().collect();
        products.sort_by_key(|p| (p.created_at, p.id));
        Ok(products)
    }

    fn delete_product(&mut self, id: &Uuid) -> Result<()> {
        let mut products = self.load_products()?;
        if products.remove(id).is_none() {
            return Err(VarcartError::ProductNotFound(*id));
        }
        self.save_products(&products)
    }
}
