//! HTTP handlers, one module per resource.

pub mod catalog;
pub mod health;
pub mod order;
pub mod user;

pub use catalog::*;
pub use health::*;
pub use order::*;
pub use user::*;
