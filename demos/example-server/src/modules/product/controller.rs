use super::model::Product;
use dashmap::DashMap;
use restful::prelude::*;
use uuid::Uuid;

/// Full CRUD over an in-memory catalogue
#[derive(Default, Controller)]
#[controller(index, show, create, update, delete)]
pub struct ProductController {
    products: Arc<DashMap<String, Product>>,
}

impl ProductController {
    pub fn new(products: Arc<DashMap<String, Product>>) -> Self {
        Self { products }
    }
}

impl Resource for ProductController {
    type Element = Product;
}

#[async_trait]
impl Indexer for ProductController {
    async fn index(&self) -> ControllerResult<Vec<Product>> {
        let mut products: Vec<Product> = self
            .products
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }
}

#[async_trait]
impl Shower for ProductController {
    async fn show(&self, id: &str) -> ControllerResult<Product> {
        self.products
            .get(id)
            .map(|product| product.value().clone())
            .ok_or_else(|| ControllerError::not_found(id))
    }
}

#[async_trait]
impl Creator for ProductController {
    fn template(&self) -> Option<Product> {
        Some(Product::draft())
    }

    async fn create(&self, product: &mut Product) -> ControllerResult<String> {
        if product.price < 0.0 {
            return Err(ControllerError::failed(anyhow::anyhow!(
                "price of {} must not be negative",
                product.name
            )));
        }
        product.name = product.name.trim().to_string();

        let id = Uuid::new_v4().to_string();
        self.products.insert(id.clone(), product.clone());
        tracing::info!(%id, name = %product.name, "Product created");
        Ok(id)
    }
}

#[async_trait]
impl Updater for ProductController {
    fn template(&self) -> Option<Product> {
        Some(Product::draft())
    }

    async fn update(&self, id: &str, product: &mut Product) -> ControllerResult<()> {
        let mut existing = self
            .products
            .get_mut(id)
            .ok_or_else(|| ControllerError::not_found(id))?;
        *existing = product.clone();
        tracing::info!(%id, "Product updated");
        Ok(())
    }
}

#[async_trait]
impl Deleter for ProductController {
    async fn delete(&self, id: &str) -> ControllerResult<bool> {
        Ok(self.products.remove(id).is_some())
    }
}

/// Read-only view listing the distinct categories in the catalogue
#[derive(Controller)]
#[controller(index)]
pub struct CategoryController {
    products: Arc<DashMap<String, Product>>,
}

impl CategoryController {
    pub fn new(products: Arc<DashMap<String, Product>>) -> Self {
        Self { products }
    }
}

impl Resource for CategoryController {
    type Element = String;
}

#[async_trait]
impl Indexer for CategoryController {
    async fn index(&self) -> ControllerResult<Vec<String>> {
        let mut categories: Vec<String> = self
            .products
            .iter()
            .map(|entry| entry.value().category.clone())
            .collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }
}
