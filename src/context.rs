//! App Context

use std::sync::Arc;

use crate::{
    auth::{AuthService, DocAuthService, memory::MemoryIdentity, provider::IdentityProvider},
    domain::{
        carts::{CartsService, service::DocCartsService},
        coupons::{CouponsService, service::DocCouponsService},
        orders::{OrdersService, service::DocOrdersService},
        products::{ProductsService, service::DocProductsService},
        wishlist::{WishlistService, service::DocWishlistService},
    },
    store::{DocumentStore, memory::MemoryStore},
};

/// Every storefront service, wired to one document store and one identity
/// provider.
#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub wishlist: Arc<dyn WishlistService>,
    pub coupons: Arc<dyn CouponsService>,
    pub orders: Arc<dyn OrdersService>,
}

impl AppContext {
    /// Build the service graph over the given collaborators.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            auth: Arc::new(DocAuthService::new(identity, Arc::clone(&store))),
            products: Arc::new(DocProductsService::new(Arc::clone(&store))),
            carts: Arc::new(DocCartsService::new(Arc::clone(&store))),
            wishlist: Arc::new(DocWishlistService::new(Arc::clone(&store))),
            coupons: Arc::new(DocCouponsService::new(Arc::clone(&store))),
            orders: Arc::new(DocOrdersService::new(store)),
        }
    }

    /// A context over the bundled in-memory collaborators, for tests and
    /// demos.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryIdentity::new()),
        )
    }
}
