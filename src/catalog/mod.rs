//! Read-only game and accessory listings.

pub mod data;
pub mod error;
pub mod service;
pub mod types;

pub use error::CatalogError;
pub use service::CatalogService;
pub use types::{Accessory, AccessoryFilter, Game, GameFilter, PriceRange};
