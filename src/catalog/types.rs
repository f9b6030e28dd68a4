//! Catalog records and query parameters.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A game listing
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Game {
    pub id: u64,
    #[schema(example = "FIFA 2024")]
    pub name: String,
    /// Price in whole SAR
    #[schema(example = 299)]
    pub price: u32,
    #[schema(example = "sports")]
    pub category: String,
    /// Platforms the game ships on, e.g. `PS5`
    pub platform: Vec<String>,
    pub description: String,
    pub image: String,
    #[schema(example = 4.8)]
    pub rating: f64,
    pub in_stock: bool,
}

/// An accessory listing
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Accessory {
    pub id: u64,
    pub name: String,
    #[schema(example = 199)]
    pub price: u32,
    #[schema(example = "audio")]
    pub category: String,
    #[schema(example = "HyperX")]
    pub brand: String,
    pub description: String,
    pub image: String,
    pub rating: f64,
    pub in_stock: bool,
    pub features: Vec<String>,
}

/// GET /api/games query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameFilter {
    /// Case-insensitive
    pub category: Option<String>,
    /// Exact
    pub platform: Option<String>,
}

/// GET /api/accessories query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessoryFilter {
    pub category: Option<String>,
    pub brand: Option<String>,
}

/// GET /api/accessories/by-price query. Both bounds inclusive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriceRange {
    pub min_price: Option<u32>,
    pub max_price: Option<u32>,
}

impl PriceRange {
    pub fn contains(&self, price: u32) -> bool {
        self.min_price.is_none_or(|min| price >= min)
            && self.max_price.is_none_or(|max| price <= max)
    }
}
