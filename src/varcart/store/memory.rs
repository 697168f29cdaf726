use super::DataStore;
use crate::error::{Result, VarcartError};
use crate::model::{Catalog, Product};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    catalog: Catalog,
    products: HashMap<Uuid, Product>,
    catalog_failure: Option<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Makes every subsequent `load_catalog` fail with `reason`.
    pub fn fail_catalog(&mut self, reason: impl Into<String>) {
        self.catalog_failure = Some(reason.into());
    }

    pub fn restore_catalog(&mut self) {
        self.catalog_failure = None;
    }
}

impl DataStore for InMemoryStore {
    fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog_failure {
            Some(reason) => Err(VarcartError::Store(reason.clone())),
            None => Ok(self.catalog.clone()),
        }
    }

    fn save_catalog(&mut self, catalog: &Catalog) -> Result<()> {
        self.catalog = catalog.clone();
        Ok(())
    }

    fn get_product(&self, id: &Uuid) -> Result<Product> {
        self.products
            .get(id)
            .cloned()
            .ok_or(VarcartError::ProductNotFound(*id))
    }

    fn save_product(&mut self, product: &Product) -> Result<()> {
        self.products.insert(product.id, product.clone());
        Ok(())
    }

    fn list_products(&self) -> Result<Vec<Product>> {
        let mut products: Vec<Product> = self.products.values().cloned().collect();
        products.sort_by_key(|p| (p.created_at, p.id));
        Ok(products)
    }

    fn delete_product(&mut self, id: &Uuid) -> Result<()> {
        self.products
            .remove(id)
            .map(|_| ())
            .ok_or(VarcartError::ProductNotFound(*id))
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::variations::{Variant, VariantDatum, VariantGroup};

    /// Size S/M/L and Color Red/Blue/Green, all active.
    pub fn apparel_catalog() -> Catalog {
        Catalog::new()
            .with_type("Size")
            .with_type("Color")
            .with_values("Size", &["S", "M", "L"])
            .with_values("Color", &["Red", "Blue", "Green"])
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new().with_catalog(apparel_catalog()),
            }
        }

        pub fn with_product(mut self, title: &str) -> (Self, Uuid) {
            let product = Product::new(title);
            let id = product.id;
            self.store.save_product(&product).unwrap();
            (self, id)
        }

        /// A product with a stored Size x Color table, `(size, color, price, stock)` per row.
        pub fn with_variant_product(
            mut self,
            title: &str,
            rows: &[(&str, &str, f64, u64)],
        ) -> (Self, Uuid) {
            let mut product = Product::new(title);
            let variants = rows
                .iter()
                .map(|(size, color, price, stock)| Variant {
                    data: vec![
                        VariantDatum {
                            label: "Size".into(),
                            value: size.to_string(),
                        },
                        VariantDatum {
                            label: "Color".into(),
                            value: color.to_string(),
                        },
                    ],
                    price: *price,
                    stock: *stock,
                })
                .collect();
            product.variations = vec![VariantGroup { variants }];
            let id = product.id;
            self.store.save_product(&product).unwrap();
            (self, id)
        }
    }
}
