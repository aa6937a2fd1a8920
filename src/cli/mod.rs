//! Stationer CLI
//!
//! Runs the storefront against the bundled in-memory collaborators: seeds
//! the demo catalog, then either prints it or walks a full checkout.

use clap::{Args, Parser, Subcommand};
use tabled::{Table, Tabled, settings::Style};

use stationer::{
    auth::{AuthService, models::ProfileUpdate},
    context::AppContext,
    domain::{
        carts::CartsService,
        coupons::CouponsService,
        orders::{
            OrderStatus, OrdersService,
            models::{CheckoutRequest, PaymentMethod, ShippingInfo},
        },
        products::{
            ProductsService,
            models::{Category, Product, ProductFilter},
        },
    },
    fixtures,
};

#[derive(Debug, Parser)]
#[command(name = "stationer", about = "Stationer storefront demo", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the seeded catalog.
    Catalog(CatalogArgs),

    /// Walk a checkout from sign-up to placed order.
    Checkout(CheckoutArgs),
}

#[derive(Debug, Args)]
struct CatalogArgs {
    /// Restrict the listing to one category.
    #[arg(long)]
    category: Option<String>,
}

#[derive(Debug, Args)]
struct CheckoutArgs {
    /// Coupon code to apply before placing the order.
    #[arg(long)]
    coupon: Option<String>,

    /// Payment method: cod, upi or card.
    #[arg(long, default_value = "cod")]
    payment: String,
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Catalog(args) => catalog(args).await,
            Commands::Checkout(args) => checkout(args).await,
        }
    }
}

fn money(minor: u64) -> String {
    format!("₹{}.{:02}", minor / 100, minor % 100)
}

#[derive(Tabled)]
struct CatalogRow {
    #[tabled(rename = "Product")]
    name: String,
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Stock")]
    stock: u32,
    #[tabled(rename = "Rating")]
    rating: String,
}

impl From<&Product> for CatalogRow {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            category: product.category.as_str(),
            price: money(product.price),
            stock: product.stock,
            rating: product
                .rating
                .map_or_else(|| "-".to_string(), |rating| rating.to_string()),
        }
    }
}

async fn catalog(args: CatalogArgs) -> Result<(), String> {
    let category = match args.category.as_deref() {
        Some(value) => Some(
            Category::parse(value).ok_or_else(|| format!("unknown category: {value}"))?,
        ),
        None => None,
    };

    let ctx = AppContext::in_memory();

    fixtures::seed(&ctx)
        .await
        .map_err(|error| format!("failed to seed demo data: {error}"))?;

    let products = ctx
        .products
        .list_products(ProductFilter {
            category,
            ..ProductFilter::default()
        })
        .await
        .map_err(|error| format!("failed to list products: {error}"))?;

    let rows: Vec<CatalogRow> = products.iter().map(CatalogRow::from).collect();

    println!("{}", Table::new(rows).with(Style::rounded()));

    Ok(())
}

#[derive(Tabled)]
struct ReceiptRow {
    #[tabled(rename = "Item")]
    name: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Unit")]
    unit: String,
    #[tabled(rename = "Line")]
    line: String,
}

async fn checkout(args: CheckoutArgs) -> Result<(), String> {
    let payment_method = PaymentMethod::parse(&args.payment)
        .ok_or_else(|| format!("unknown payment method: {}", args.payment))?;

    let ctx = AppContext::in_memory();

    let seeded = fixtures::seed(&ctx)
        .await
        .map_err(|error| format!("failed to seed demo data: {error}"))?;

    let session = ctx
        .auth
        .sign_up("asha@example.com", "demo-password", "Asha Verma")
        .await
        .map_err(|error| format!("sign-up failed: {error}"))?;

    let profile = ctx
        .auth
        .update_profile(
            session.user_id,
            ProfileUpdate {
                address_line1: Some("14 MG Road".to_string()),
                city: Some("Pune".to_string()),
                state: Some("Maharashtra".to_string()),
                pincode: Some("411001".to_string()),
                phone: Some("9812345678".to_string()),
                ..ProfileUpdate::default()
            },
        )
        .await
        .map_err(|error| format!("profile update failed: {error}"))?;

    // Two pen sets and an exam kit make a cart worth discounting.
    let pens = find_product(&seeded.products, "Gel Pen Set")?;
    let kit = find_product(&seeded.products, "Board Exam Kit")?;

    ctx.carts
        .add_item(session.user_id, pens, 2)
        .await
        .map_err(|error| format!("add to cart failed: {error}"))?;
    ctx.carts
        .add_item(session.user_id, kit, 1)
        .await
        .map_err(|error| format!("add to cart failed: {error}"))?;

    let summary = ctx
        .carts
        .summary(session.user_id)
        .await
        .map_err(|error| format!("cart summary failed: {error}"))?;

    let coupon = match args.coupon {
        Some(code) => Some(
            ctx.coupons
                .evaluate(&code, summary.subtotal)
                .await
                .map_err(|error| format!("coupon {code} not applied: {error}"))?,
        ),
        None => None,
    };

    let order = ctx
        .orders
        .place_order(
            session.user_id,
            CheckoutRequest {
                shipping: ShippingInfo {
                    name: profile.full_name,
                    address: profile.address_line1,
                    city: profile.city,
                    state: profile.state,
                    pincode: profile.pincode,
                    phone: profile.phone,
                },
                payment_method,
                coupon,
            },
        )
        .await
        .map_err(|error| format!("order placement failed: {error}"))?;

    let items = ctx
        .orders
        .order_items(session.user_id, order.id)
        .await
        .map_err(|error| format!("failed to read order items: {error}"))?;

    let rows: Vec<ReceiptRow> = items
        .iter()
        .map(|item| ReceiptRow {
            name: item.product_name.clone(),
            quantity: item.quantity,
            unit: money(item.price),
            line: money(item.price.saturating_mul(u64::from(item.quantity))),
        })
        .collect();

    println!("Order #{}", order.id);
    println!("{}", Table::new(rows).with(Style::rounded()));
    println!("Subtotal  {}", money(order.subtotal));

    if let Some(code) = &order.coupon_code {
        println!("Discount  -{} ({code})", money(order.discount));
    }

    println!("Delivery  free");
    println!("Total     {}", money(order.total));
    println!("Expected delivery: {}", order.expected_delivery);

    let position = order.status.progress_index();

    let track: Vec<String> = OrderStatus::STAGES
        .into_iter()
        .map(|stage| {
            let mark = if stage.progress_index() <= position {
                "●"
            } else {
                "○"
            };

            format!("{mark} {}", stage.label())
        })
        .collect();

    println!("{}", track.join("  →  "));

    Ok(())
}

fn find_product(products: &[Product], name: &str) -> Result<uuid::Uuid, String> {
    products
        .iter()
        .find(|product| product.name == name)
        .map(|product| product.id)
        .ok_or_else(|| format!("seed data is missing {name}"))
}
