//! Order lifecycle: creation, validation, status changes and statistics.
//!
//! ```text
//! HTTP handler → OrderService → OrderRepository (in-memory)
//!                     └──────→ Notifier (queued, best-effort)
//! ```

pub mod error;
pub mod service;
pub mod store;
pub mod types;
pub mod validation;

pub use error::OrderError;
pub use service::OrderService;
pub use store::{InMemoryOrderStore, OrderRepository};
pub use types::{
    ContactMessage, ContactRequest, CreateOrderRequest, CustomerInfo, Order, OrderDraft,
    OrderFilter, OrderStats, OrderStatus, UpdateStatusRequest,
};
