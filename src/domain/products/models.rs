//! Product Models

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Books,
    Notebooks,
    PensPencils,
    ArtSupplies,
    DeskAccessories,
    ExamKits,
}

impl Category {
    /// The stored document representation of this category.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Books => "books",
            Self::Notebooks => "notebooks",
            Self::PensPencils => "pens_pencils",
            Self::ArtSupplies => "art_supplies",
            Self::DeskAccessories => "desk_accessories",
            Self::ExamKits => "exam_kits",
        }
    }

    /// Parse a stored category string.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "books" => Some(Self::Books),
            "notebooks" => Some(Self::Notebooks),
            "pens_pencils" => Some(Self::PensPencils),
            "art_supplies" => Some(Self::ArtSupplies),
            "desk_accessories" => Some(Self::DeskAccessories),
            "exam_kits" => Some(Self::ExamKits),
            _ => None,
        }
    }
}

/// Product Model
#[derive(Debug, Clone)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Unit price in minor units.
    pub price: u64,
    pub category: Category,
    pub image_url: Option<String>,
    pub stock: u32,
    pub rating: Option<Decimal>,
    pub is_featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Product Model
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: u64,
    pub category: Category,
    pub image_url: Option<String>,
    pub stock: u32,
    pub rating: Option<Decimal>,
    pub is_featured: bool,
}

/// Product Update Model — only the set fields are written.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<u64>,
    pub category: Option<Category>,
    pub image_url: Option<String>,
    pub stock: Option<u32>,
    pub rating: Option<Decimal>,
    pub is_featured: Option<bool>,
}

/// Catalog browse filters.
///
/// Only the category constraint can be pushed down to the store as an
/// equality filter; price band, rating and substring search are applied
/// after the read.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<Category>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub min_rating: Option<Decimal>,
    pub search: Option<String>,
}
