//! Storefront backend
//!
//! Game and accessory catalog, order lifecycle management, customer accounts
//! and operational chat notifications, served over HTTP with axum.
//!
//! # Modules
//!
//! - [`orders`] - Order creation, validation, status changes, statistics
//! - [`users`] - Registration, login and profiles with argon2 hashes
//! - [`notifier`] - Queued, best-effort chat notifications
//! - [`catalog`] - Static game and accessory listings
//! - [`gateway`] - HTTP routes, handlers, OpenAPI document
//! - [`config`] - YAML configuration with environment overrides
//! - [`logging`] - tracing subscriber setup

pub mod catalog;
pub mod config;
pub mod gateway;
pub mod logging;
pub mod notifier;
pub mod orders;
pub mod users;

// Convenient re-exports at crate root
pub use catalog::CatalogService;
pub use config::AppConfig;
pub use notifier::Notifier;
pub use orders::{InMemoryOrderStore, Order, OrderService, OrderStatus};
pub use users::{InMemoryUserStore, UserService};
