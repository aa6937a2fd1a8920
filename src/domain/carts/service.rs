//! Carts service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use uuid::Uuid;

use crate::{
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{CartItem, CartSummary},
            records::CartItemRecord,
            repository::CartItemsRepository,
        },
        products::repository::ProductsRepository,
    },
    pricing,
    store::DocumentStore,
};

#[derive(Clone)]
pub struct DocCartsService {
    items: CartItemsRepository,
    products: ProductsRepository,
}

impl DocCartsService {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            items: CartItemsRepository::new(Arc::clone(&store)),
            products: ProductsRepository::new(store),
        }
    }
}

#[async_trait]
impl CartsService for DocCartsService {
    async fn get_cart(&self, user: Uuid) -> Result<Vec<CartItem>, CartsServiceError> {
        Ok(self.items.list(user).await?)
    }

    async fn add_item(
        &self,
        user: Uuid,
        product: Uuid,
        quantity: u32,
    ) -> Result<CartItem, CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let product = self
            .products
            .get(product)
            .await?
            .ok_or(CartsServiceError::ProductNotFound)?;

        // A second add of the same product grows the existing line instead of
        // creating a duplicate.
        if let Some(existing) = self.items.find_line(user, product.id).await? {
            let quantity = existing.quantity.saturating_add(quantity);

            self.items.set_quantity(existing.id, quantity).await?;

            return Ok(CartItem {
                quantity,
                ..existing
            });
        }

        let record = CartItemRecord {
            user_id: user,
            product_id: product.id,
            quantity,
            unit_price: Some(product.price),
            product_name: Some(product.name),
            product_image: product.image_url,
            created_at: Timestamp::now(),
        };

        let item = self.items.create(record).await?;

        tracing::debug!(user = %user, product = %item.product_id, "cart line created");

        Ok(item)
    }

    async fn update_quantity(
        &self,
        user: Uuid,
        item: Uuid,
        quantity: u32,
    ) -> Result<(), CartsServiceError> {
        let line = self
            .items
            .get(item)
            .await?
            .filter(|line| line.user_id == user)
            .ok_or(CartsServiceError::NotFound)?;

        // Quantity zero means the line goes away entirely.
        if quantity == 0 {
            self.items.delete(line.id).await?;

            return Ok(());
        }

        Ok(self.items.set_quantity(line.id, quantity).await?)
    }

    async fn remove_item(&self, user: Uuid, item: Uuid) -> Result<(), CartsServiceError> {
        let line = self
            .items
            .get(item)
            .await?
            .filter(|line| line.user_id == user)
            .ok_or(CartsServiceError::NotFound)?;

        Ok(self.items.delete(line.id).await?)
    }

    async fn clear_cart(&self, user: Uuid) -> Result<(), CartsServiceError> {
        Ok(self.items.clear(user).await?)
    }

    async fn summary(&self, user: Uuid) -> Result<CartSummary, CartsServiceError> {
        let lines = self.items.list(user).await?;

        Ok(CartSummary {
            count: pricing::cart_count(&lines),
            subtotal: pricing::cart_subtotal(&lines)?,
        })
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// All cart lines for the user, with their product snapshots.
    async fn get_cart(&self, user: Uuid) -> Result<Vec<CartItem>, CartsServiceError>;

    /// Add a product to the cart, merging into an existing line.
    async fn add_item(
        &self,
        user: Uuid,
        product: Uuid,
        quantity: u32,
    ) -> Result<CartItem, CartsServiceError>;

    /// Set a line's quantity; zero removes the line.
    async fn update_quantity(
        &self,
        user: Uuid,
        item: Uuid,
        quantity: u32,
    ) -> Result<(), CartsServiceError>;

    /// Remove a single line.
    async fn remove_item(&self, user: Uuid, item: Uuid) -> Result<(), CartsServiceError>;

    /// Remove every line for the user.
    async fn clear_cart(&self, user: Uuid) -> Result<(), CartsServiceError>;

    /// Unit count and subtotal for the user's cart.
    async fn summary(&self, user: Uuid) -> Result<CartSummary, CartsServiceError>;
}
