//! Products service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use uuid::Uuid;

use crate::{
    domain::products::{
        errors::ProductsServiceError,
        models::{NewProduct, Product, ProductFilter, ProductUpdate},
        repository::ProductsRepository,
    },
    store::DocumentStore,
};

#[derive(Clone)]
pub struct DocProductsService {
    repository: ProductsRepository,
}

impl DocProductsService {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            repository: ProductsRepository::new(store),
        }
    }
}

/// Keep a product when it passes every client-side constraint.
fn passes(product: &Product, filter: &ProductFilter) -> bool {
    if let Some(min_price) = filter.min_price {
        if product.price < min_price {
            return false;
        }
    }

    if let Some(max_price) = filter.max_price {
        if product.price > max_price {
            return false;
        }
    }

    if let Some(min_rating) = filter.min_rating {
        if product.rating.is_none_or(|rating| rating < min_rating) {
            return false;
        }
    }

    if let Some(search) = &filter.search {
        let needle = search.to_lowercase();
        let name = product.name.to_lowercase();
        let description = product
            .description
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_default();

        if !name.contains(&needle) && !description.contains(&needle) {
            return false;
        }
    }

    true
}

#[async_trait]
impl ProductsService for DocProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let products = self.repository.list(filter.category).await?;

        Ok(products
            .into_iter()
            .filter(|product| passes(product, &filter))
            .collect())
    }

    async fn get_product(&self, product: Uuid) -> Result<Product, ProductsServiceError> {
        self.repository
            .get(product)
            .await?
            .ok_or(ProductsServiceError::NotFound)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        let created = self.repository.create(product, Timestamp::now()).await?;

        tracing::debug!(product = %created.id, "product created");

        Ok(created)
    }

    async fn update_product(
        &self,
        product: Uuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        self.repository
            .update(product, &update, Timestamp::now())
            .await?;

        self.get_product(product).await
    }

    async fn delete_product(&self, product: Uuid) -> Result<(), ProductsServiceError> {
        // The store treats deleting an absent document as a no-op, so check
        // existence first to surface NotFound the way the other operations do.
        self.get_product(product).await?;

        self.repository.delete(product).await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Browse the catalog with optional filters.
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: Uuid) -> Result<Product, ProductsServiceError>;

    /// Add a product to the catalog.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Apply a partial update to a product.
    async fn update_product(
        &self,
        product: Uuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Remove a product from the catalog.
    async fn delete_product(&self, product: Uuid) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{domain::products::models::Category, store::memory::MemoryStore};

    use super::*;

    fn service() -> DocProductsService {
        DocProductsService::new(Arc::new(MemoryStore::new()))
    }

    fn notebook() -> NewProduct {
        NewProduct {
            name: "Classic Ruled Notebook".to_string(),
            description: Some("200 pages, lay-flat binding".to_string()),
            price: 249_00,
            category: Category::Notebooks,
            image_url: None,
            stock: 40,
            rating: Some(Decimal::new(45, 1)),
            is_featured: false,
        }
    }

    #[tokio::test]
    async fn created_product_can_be_fetched() -> TestResult {
        let service = service();

        let created = service.create_product(notebook()).await?;
        let fetched = service.get_product(created.id).await?;

        assert_eq!(fetched.name, "Classic Ruled Notebook");
        assert_eq!(fetched.price, 249_00);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_product_is_not_found() {
        let service = service();

        let result = service.get_product(Uuid::now_v7()).await;

        assert!(matches!(result, Err(ProductsServiceError::NotFound)));
    }

    #[tokio::test]
    async fn list_filters_by_category_and_price() -> TestResult {
        let service = service();

        service.create_product(notebook()).await?;
        service
            .create_product(NewProduct {
                name: "Watercolour Palette".to_string(),
                price: 499_00,
                category: Category::ArtSupplies,
                ..notebook()
            })
            .await?;

        let art = service
            .list_products(ProductFilter {
                category: Some(Category::ArtSupplies),
                ..ProductFilter::default()
            })
            .await?;
        let cheap = service
            .list_products(ProductFilter {
                max_price: Some(300_00),
                ..ProductFilter::default()
            })
            .await?;

        assert_eq!(art.len(), 1);
        assert_eq!(cheap.len(), 1);
        assert_eq!(cheap.first().map(|p| p.price), Some(249_00));

        Ok(())
    }

    #[tokio::test]
    async fn search_matches_name_and_description_case_insensitively() -> TestResult {
        let service = service();

        service.create_product(notebook()).await?;

        let by_name = service
            .list_products(ProductFilter {
                search: Some("ruled".to_string()),
                ..ProductFilter::default()
            })
            .await?;
        let by_description = service
            .list_products(ProductFilter {
                search: Some("LAY-FLAT".to_string()),
                ..ProductFilter::default()
            })
            .await?;
        let none = service
            .list_products(ProductFilter {
                search: Some("fountain".to_string()),
                ..ProductFilter::default()
            })
            .await?;

        assert_eq!(by_name.len(), 1);
        assert_eq!(by_description.len(), 1);
        assert!(none.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn min_rating_excludes_unrated_products() -> TestResult {
        let service = service();

        service.create_product(notebook()).await?;
        service
            .create_product(NewProduct {
                name: "Unrated Eraser".to_string(),
                rating: None,
                ..notebook()
            })
            .await?;

        let rated = service
            .list_products(ProductFilter {
                min_rating: Some(Decimal::new(40, 1)),
                ..ProductFilter::default()
            })
            .await?;

        assert_eq!(rated.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn update_changes_only_set_fields() -> TestResult {
        let service = service();

        let created = service.create_product(notebook()).await?;

        let updated = service
            .update_product(
                created.id,
                ProductUpdate {
                    price: Some(199_00),
                    ..ProductUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.price, 199_00);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.stock, created.stock);

        Ok(())
    }

    #[tokio::test]
    async fn delete_makes_product_not_found() -> TestResult {
        let service = service();

        let created = service.create_product(notebook()).await?;

        service.delete_product(created.id).await?;

        let result = service.get_product(created.id).await;

        assert!(matches!(result, Err(ProductsServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn delete_unknown_product_is_not_found() {
        let service = service();

        let result = service.delete_product(Uuid::now_v7()).await;

        assert!(matches!(result, Err(ProductsServiceError::NotFound)));
    }
}
