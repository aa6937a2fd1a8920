//! Seed data for demos and integration tests.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    context::AppContext,
    domain::{
        coupons::{
            CouponsService, CouponsServiceError,
            models::{Coupon, CouponDiscount, NewCoupon},
        },
        products::{
            ProductsService, ProductsServiceError,
            models::{Category, NewProduct, Product},
        },
    },
};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Products(#[from] ProductsServiceError),

    #[error(transparent)]
    Coupons(#[from] CouponsServiceError),
}

/// What [`seed`] put into the store.
pub struct SeedData {
    pub products: Vec<Product>,
    pub coupons: Vec<Coupon>,
}

fn catalog() -> Vec<NewProduct> {
    vec![
        NewProduct {
            name: "Classic Ruled Notebook".to_string(),
            description: Some("200 pages, lay-flat binding".to_string()),
            price: 249_00,
            category: Category::Notebooks,
            image_url: Some("/images/ruled-notebook.jpg".to_string()),
            stock: 120,
            rating: Some(Decimal::new(44, 1)),
            is_featured: false,
        },
        NewProduct {
            name: "Gel Pen Set".to_string(),
            description: Some("Ten assorted colours, 0.5 mm tips".to_string()),
            price: 199_00,
            category: Category::PensPencils,
            image_url: Some("/images/gel-pens.jpg".to_string()),
            stock: 80,
            rating: Some(Decimal::new(47, 1)),
            is_featured: true,
        },
        NewProduct {
            name: "Watercolour Palette".to_string(),
            description: Some("24 pans with a mixing tray".to_string()),
            price: 499_00,
            category: Category::ArtSupplies,
            image_url: Some("/images/watercolours.jpg".to_string()),
            stock: 35,
            rating: Some(Decimal::new(42, 1)),
            is_featured: false,
        },
        NewProduct {
            name: "Desk Organiser".to_string(),
            description: Some("Bamboo, five compartments".to_string()),
            price: 899_00,
            category: Category::DeskAccessories,
            image_url: Some("/images/desk-organiser.jpg".to_string()),
            stock: 20,
            rating: None,
            is_featured: false,
        },
        NewProduct {
            name: "Board Exam Kit".to_string(),
            description: Some("Everything the hall ticket allows".to_string()),
            price: 649_00,
            category: Category::ExamKits,
            image_url: Some("/images/exam-kit.jpg".to_string()),
            stock: 60,
            rating: Some(Decimal::new(48, 1)),
            is_featured: true,
        },
        NewProduct {
            name: "Grammar Handbook".to_string(),
            description: Some("Concise reference with exercises".to_string()),
            price: 399_00,
            category: Category::Books,
            image_url: Some("/images/grammar-handbook.jpg".to_string()),
            stock: 45,
            rating: Some(Decimal::new(41, 1)),
            is_featured: false,
        },
    ]
}

fn coupons() -> Vec<NewCoupon> {
    vec![
        NewCoupon {
            code: "STUDY20".to_string(),
            discount: CouponDiscount::Percentage(Decimal::from(20)),
            min_order_value: 1000_00,
            expires_at: None,
            is_active: true,
        },
        NewCoupon {
            code: "FLAT300".to_string(),
            discount: CouponDiscount::Flat(300_00),
            min_order_value: 0,
            expires_at: None,
            is_active: true,
        },
        NewCoupon {
            code: "OLD50".to_string(),
            discount: CouponDiscount::Percentage(Decimal::from(50)),
            min_order_value: 0,
            expires_at: None,
            is_active: false,
        },
    ]
}

/// Populate the context's store with the demo catalog and coupons.
///
/// # Errors
///
/// Returns an error when any of the underlying writes fail.
pub async fn seed(ctx: &AppContext) -> Result<SeedData, SeedError> {
    let mut products = Vec::new();

    for product in catalog() {
        products.push(ctx.products.create_product(product).await?);
    }

    let mut seeded_coupons = Vec::new();

    for coupon in coupons() {
        seeded_coupons.push(ctx.coupons.create_coupon(coupon).await?);
    }

    Ok(SeedData {
        products,
        coupons: seeded_coupons,
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::products::models::ProductFilter;

    use super::*;

    #[tokio::test]
    async fn seed_populates_catalog_and_coupons() -> TestResult {
        let ctx = AppContext::in_memory();

        let data = seed(&ctx).await?;

        assert_eq!(data.products.len(), 6);
        assert_eq!(data.coupons.len(), 3);

        let listed = ctx.products.list_products(ProductFilter::default()).await?;

        assert_eq!(listed.len(), 6);

        Ok(())
    }
}
