//! Orders service.
//!
//! `place_order` is the checkout orchestrator: it validates input, prices
//! the cart, persists the order and its items and clears the cart. The
//! store offers no multi-record transaction, so a failure while writing
//! items rolls the partial order back best-effort, and the reconciliation
//! operations exist to catch anything that still slips through.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use uuid::Uuid;

use crate::{
    domain::{
        carts::repository::CartItemsRepository,
        orders::{
            errors::OrdersServiceError,
            lifecycle::OrderStatus,
            models::{
                CheckoutRequest, IncompleteOrder, Order, OrderItem, PLACEHOLDER_IMAGE,
            },
            repository::{OrderItemsRepository, OrdersRepository},
        },
    },
    pricing,
    store::DocumentStore,
};

#[derive(Clone)]
pub struct DocOrdersService {
    orders: OrdersRepository,
    items: OrderItemsRepository,
    cart: CartItemsRepository,
}

impl DocOrdersService {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            orders: OrdersRepository::new(Arc::clone(&store)),
            items: OrderItemsRepository::new(Arc::clone(&store)),
            cart: CartItemsRepository::new(store),
        }
    }

    /// Best-effort removal of a partially written order.
    async fn roll_back(&self, order: Uuid, written: &[Uuid]) {
        for item in written {
            if let Err(error) = self.items.delete(*item).await {
                tracing::warn!(order = %order, item = %item, %error, "rollback left an orphaned order item");
            }
        }

        if let Err(error) = self.orders.delete(order).await {
            tracing::warn!(order = %order, %error, "rollback left an orphaned order");
        }
    }
}

#[async_trait]
impl OrdersService for DocOrdersService {
    #[tracing::instrument(skip(self, request))]
    async fn place_order(
        &self,
        user: Uuid,
        request: CheckoutRequest,
    ) -> Result<Order, OrdersServiceError> {
        // Validate everything before the first write.
        if let Some(field) = request.shipping.missing_field() {
            return Err(OrdersServiceError::IncompleteAddress { field });
        }

        let lines = self.cart.list(user).await?;

        if lines.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let discount = request.coupon.as_ref().map_or(0, |coupon| coupon.discount);
        let totals = pricing::order_totals(&lines, discount)?;
        let now = Timestamp::now();

        let order = Order {
            id: Uuid::now_v7(),
            user_id: user,
            subtotal: totals.subtotal,
            discount: totals.discount,
            total: totals.total,
            coupon_code: request.coupon.map(|coupon| coupon.code),
            shipping: request.shipping,
            payment_method: request.payment_method,
            expected_delivery: pricing::expected_delivery(now),
            status: OrderStatus::OrderPlaced,
            created_at: now,
            item_count: u32::try_from(lines.len()).unwrap_or(u32::MAX),
        };

        self.orders
            .create(&order)
            .await
            .map_err(OrdersServiceError::PlacementFailed)?;

        // One item per cart line, trusting the line's snapshots.
        let mut written = Vec::with_capacity(lines.len());

        for line in &lines {
            let item = OrderItem {
                id: Uuid::now_v7(),
                order_id: order.id,
                product_id: line.product_id,
                product_name: line.product_name.clone().unwrap_or_default(),
                product_image: line
                    .product_image
                    .clone()
                    .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
                quantity: line.quantity,
                price: line.unit_price.unwrap_or(0),
            };

            match self.items.create(&item).await {
                Ok(()) => written.push(item.id),
                Err(error) => {
                    self.roll_back(order.id, &written).await;

                    return Err(OrdersServiceError::PlacementFailed(error));
                }
            }
        }

        // The order exists either way at this point; a cart that fails to
        // clear is an annoyance, not a lost sale.
        if let Err(error) = self.cart.clear(user).await {
            tracing::warn!(user = %user, order = %order.id, %error, "cart not cleared after checkout");
        }

        tracing::info!(order = %order.id, total = order.total, "order placed");

        Ok(order)
    }

    async fn list_orders(&self, user: Uuid) -> Result<Vec<Order>, OrdersServiceError> {
        let mut orders = self.orders.list_for_user(user).await?;

        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(orders)
    }

    async fn get_order(&self, user: Uuid, order: Uuid) -> Result<Order, OrdersServiceError> {
        self.orders
            .get(order)
            .await?
            .filter(|order| order.user_id == user)
            .ok_or(OrdersServiceError::NotFound)
    }

    async fn order_items(
        &self,
        user: Uuid,
        order: Uuid,
    ) -> Result<Vec<OrderItem>, OrdersServiceError> {
        // Ownership check first; items are only reachable through an order
        // the user can see.
        self.get_order(user, order).await?;

        Ok(self.items.list_for_order(order).await?)
    }

    async fn list_all_orders(&self) -> Result<Vec<Order>, OrdersServiceError> {
        let mut orders = self.orders.list_all().await?;

        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(orders)
    }

    async fn set_status(
        &self,
        order: Uuid,
        status: OrderStatus,
    ) -> Result<(), OrdersServiceError> {
        self.orders.set_status(order, status).await?;

        tracing::info!(order = %order, status = status.as_str(), "order status updated");

        Ok(())
    }

    async fn find_incomplete_orders(&self) -> Result<Vec<IncompleteOrder>, OrdersServiceError> {
        let orders = self.orders.list_all().await?;
        let mut incomplete = Vec::new();

        for order in orders {
            let found = self.items.list_for_order(order.id).await?.len();
            let found = u32::try_from(found).unwrap_or(u32::MAX);

            if found != order.item_count {
                incomplete.push(IncompleteOrder {
                    order_id: order.id,
                    expected: order.item_count,
                    found,
                });
            }
        }

        Ok(incomplete)
    }

    async fn repair_order(&self, order: Uuid) -> Result<(), OrdersServiceError> {
        self.orders
            .get(order)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        let items = self.items.list_for_order(order).await?;

        for item in &items {
            self.items.delete(item.id).await?;
        }

        self.orders.delete(order).await?;

        tracing::warn!(order = %order, items = items.len(), "incomplete order repaired by removal");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn the user's cart into a persisted order and clear the cart.
    async fn place_order(
        &self,
        user: Uuid,
        request: CheckoutRequest,
    ) -> Result<Order, OrdersServiceError>;

    /// The user's orders, newest first.
    async fn list_orders(&self, user: Uuid) -> Result<Vec<Order>, OrdersServiceError>;

    /// A single order, visible only to its owner.
    async fn get_order(&self, user: Uuid, order: Uuid) -> Result<Order, OrdersServiceError>;

    /// The items of one of the user's orders.
    async fn order_items(
        &self,
        user: Uuid,
        order: Uuid,
    ) -> Result<Vec<OrderItem>, OrdersServiceError>;

    /// Every order in the store, newest first. Back office only.
    async fn list_all_orders(&self) -> Result<Vec<Order>, OrdersServiceError>;

    /// Write a fulfillment stage directly. Back office only; no transition
    /// validation is applied.
    async fn set_status(
        &self,
        order: Uuid,
        status: OrderStatus,
    ) -> Result<(), OrdersServiceError>;

    /// Orders whose stored item count disagrees with the items actually
    /// persisted — the residue of an interrupted checkout.
    async fn find_incomplete_orders(&self) -> Result<Vec<IncompleteOrder>, OrdersServiceError>;

    /// Remove an incomplete order and whatever items it did manage to
    /// write.
    async fn repair_order(&self, order: Uuid) -> Result<(), OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            carts::{CartsService, records::CartItemRecord, service::DocCartsService},
            coupons::models::AppliedCoupon,
            orders::models::{PaymentMethod, ShippingInfo},
            products::{
                models::{Category, NewProduct},
                repository::ProductsRepository,
            },
        },
        store::{Document, MockDocumentStore, StoreError, collections, memory::MemoryStore},
    };

    use super::*;

    struct Setup {
        store: Arc<dyn DocumentStore>,
        orders: DocOrdersService,
        carts: DocCartsService,
        user: Uuid,
        product: Uuid,
    }

    async fn setup() -> TestResult<Setup> {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());

        let product = ProductsRepository::new(Arc::clone(&store))
            .create(
                NewProduct {
                    name: "Board Exam Kit".to_string(),
                    description: None,
                    price: 600_00,
                    category: Category::ExamKits,
                    image_url: Some("/exam-kit.jpg".to_string()),
                    stock: 15,
                    rating: None,
                    is_featured: true,
                },
                Timestamp::now(),
            )
            .await?;

        Ok(Setup {
            orders: DocOrdersService::new(Arc::clone(&store)),
            carts: DocCartsService::new(Arc::clone(&store)),
            store,
            user: Uuid::now_v7(),
            product: product.id,
        })
    }

    fn shipping() -> ShippingInfo {
        ShippingInfo {
            name: "Asha Verma".to_string(),
            address: "14 MG Road".to_string(),
            city: "Pune".to_string(),
            state: "Maharashtra".to_string(),
            pincode: "411001".to_string(),
            phone: "9812345678".to_string(),
        }
    }

    fn checkout(coupon: Option<AppliedCoupon>) -> CheckoutRequest {
        CheckoutRequest {
            shipping: shipping(),
            payment_method: PaymentMethod::Cod,
            coupon,
        }
    }

    #[tokio::test]
    async fn place_order_prices_the_cart_and_clears_it() -> TestResult {
        let ctx = setup().await?;

        ctx.carts.add_item(ctx.user, ctx.product, 2).await?;

        let order = ctx
            .orders
            .place_order(
                ctx.user,
                checkout(Some(AppliedCoupon {
                    code: "STUDY20".to_string(),
                    discount: 240_00,
                })),
            )
            .await?;

        assert_eq!(order.subtotal, 1200_00);
        assert_eq!(order.discount, 240_00);
        assert_eq!(order.total, 960_00);
        assert_eq!(order.coupon_code.as_deref(), Some("STUDY20"));
        assert_eq!(order.status, OrderStatus::OrderPlaced);
        assert_eq!(order.item_count, 1);
        assert_eq!(
            order.expected_delivery.as_second() - order.created_at.as_second(),
            5 * 24 * 60 * 60
        );
        assert!(ctx.carts.get_cart(ctx.user).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn order_items_snapshot_the_cart_lines() -> TestResult {
        let ctx = setup().await?;

        ctx.carts.add_item(ctx.user, ctx.product, 3).await?;

        let order = ctx.orders.place_order(ctx.user, checkout(None)).await?;
        let items = ctx.orders.order_items(ctx.user, order.id).await?;

        assert_eq!(items.len(), 1);

        let item = items.first().expect("one order item");

        assert_eq!(item.order_id, order.id);
        assert_eq!(item.product_id, ctx.product);
        assert_eq!(item.product_name, "Board Exam Kit");
        assert_eq!(item.product_image, "/exam-kit.jpg");
        assert_eq!(item.quantity, 3);
        assert_eq!(item.price, 600_00);

        Ok(())
    }

    #[tokio::test]
    async fn empty_cart_cannot_check_out() -> TestResult {
        let ctx = setup().await?;

        let result = ctx.orders.place_order(ctx.user, checkout(None)).await;

        assert!(matches!(result, Err(OrdersServiceError::EmptyCart)));

        Ok(())
    }

    #[tokio::test]
    async fn blank_city_fails_before_any_write() -> TestResult {
        let ctx = setup().await?;

        ctx.carts.add_item(ctx.user, ctx.product, 1).await?;

        let request = CheckoutRequest {
            shipping: ShippingInfo {
                city: String::new(),
                ..shipping()
            },
            payment_method: PaymentMethod::Upi,
            coupon: None,
        };

        let result = ctx.orders.place_order(ctx.user, request).await;

        assert!(matches!(
            result,
            Err(OrdersServiceError::IncompleteAddress { field: "city" })
        ));

        // Nothing was written and the cart survived.
        assert!(ctx.orders.list_all_orders().await?.is_empty());
        assert_eq!(ctx.carts.get_cart(ctx.user).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn orders_are_only_visible_to_their_owner() -> TestResult {
        let ctx = setup().await?;
        let stranger = Uuid::now_v7();

        ctx.carts.add_item(ctx.user, ctx.product, 1).await?;

        let order = ctx.orders.place_order(ctx.user, checkout(None)).await?;

        let result = ctx.orders.get_order(stranger, order.id).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound for cross-user read, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_orders_returns_newest_first() -> TestResult {
        let ctx = setup().await?;

        ctx.carts.add_item(ctx.user, ctx.product, 1).await?;
        let first = ctx.orders.place_order(ctx.user, checkout(None)).await?;

        ctx.carts.add_item(ctx.user, ctx.product, 2).await?;
        let second = ctx.orders.place_order(ctx.user, checkout(None)).await?;

        let orders = ctx.orders.list_orders(ctx.user).await?;

        assert_eq!(orders.len(), 2);
        assert_eq!(orders.first().map(|order| order.id), Some(second.id));
        assert_eq!(orders.last().map(|order| order.id), Some(first.id));

        Ok(())
    }

    #[tokio::test]
    async fn set_status_moves_progress_without_transition_checks() -> TestResult {
        let ctx = setup().await?;

        ctx.carts.add_item(ctx.user, ctx.product, 1).await?;
        let order = ctx.orders.place_order(ctx.user, checkout(None)).await?;

        ctx.orders.set_status(order.id, OrderStatus::Shipped).await?;
        let shipped = ctx.orders.get_order(ctx.user, order.id).await?;
        assert_eq!(shipped.status.progress_index(), 2);

        // Regressions are allowed; the back office owns the field outright.
        ctx.orders
            .set_status(order.id, OrderStatus::OrderPlaced)
            .await?;
        let regressed = ctx.orders.get_order(ctx.user, order.id).await?;
        assert_eq!(regressed.status, OrderStatus::OrderPlaced);

        Ok(())
    }

    #[tokio::test]
    async fn failed_item_write_rolls_the_order_back() -> TestResult {
        let mut mock = MockDocumentStore::new();
        let user = Uuid::now_v7();

        let line = CartItemRecord {
            user_id: user,
            product_id: Uuid::now_v7(),
            quantity: 1,
            unit_price: Some(100_00),
            product_name: Some("Gel Pen Set".to_string()),
            product_image: None,
            created_at: Timestamp::now(),
        };
        let value = serde_json::to_value(&line)?;

        mock.expect_find()
            .withf(|collection, _| collection == collections::CART_ITEMS)
            .returning(move |_, _| {
                Ok(vec![Document {
                    id: Uuid::now_v7(),
                    value: value.clone(),
                }])
            });

        mock.expect_create()
            .withf(|collection, _, _| collection == collections::ORDERS)
            .times(1)
            .returning(|_, _, _| Ok(()));

        mock.expect_create()
            .withf(|collection, _, _| collection == collections::ORDER_ITEMS)
            .times(1)
            .returning(|_, _, _| Err(StoreError::Unavailable("write timed out".to_string())));

        // The rollback must remove the order that did land.
        mock.expect_delete()
            .withf(|collection, _| collection == collections::ORDERS)
            .times(1)
            .returning(|_, _| Ok(()));

        let orders = DocOrdersService::new(Arc::new(mock));

        let result = orders.place_order(user, checkout(None)).await;

        assert!(matches!(
            result,
            Err(OrdersServiceError::PlacementFailed(_))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn reconciliation_flags_and_repairs_incomplete_orders() -> TestResult {
        let ctx = setup().await?;

        let second_product = ProductsRepository::new(Arc::clone(&ctx.store))
            .create(
                NewProduct {
                    name: "Grammar Handbook".to_string(),
                    description: None,
                    price: 399_00,
                    category: Category::Books,
                    image_url: None,
                    stock: 5,
                    rating: None,
                    is_featured: false,
                },
                Timestamp::now(),
            )
            .await?;

        ctx.carts.add_item(ctx.user, ctx.product, 1).await?;
        ctx.carts.add_item(ctx.user, second_product.id, 1).await?;

        let order = ctx.orders.place_order(ctx.user, checkout(None)).await?;

        assert!(ctx.orders.find_incomplete_orders().await?.is_empty());

        // Simulate an interrupted checkout by dropping one of the items.
        let items = ctx.orders.order_items(ctx.user, order.id).await?;
        let lost = items.first().expect("order has items");
        ctx.store
            .delete(collections::ORDER_ITEMS, lost.id)
            .await?;

        let incomplete = ctx.orders.find_incomplete_orders().await?;

        assert_eq!(
            incomplete,
            vec![IncompleteOrder {
                order_id: order.id,
                expected: 2,
                found: 1,
            }]
        );

        ctx.orders.repair_order(order.id).await?;

        assert!(ctx.orders.find_incomplete_orders().await?.is_empty());

        let result = ctx.orders.get_order(ctx.user, order.id).await;
        assert!(matches!(result, Err(OrdersServiceError::NotFound)));

        Ok(())
    }
}
