//! Customer accounts: registration, login and profile management.
//!
//! ```text
//! HTTP handler → UserService → UserRepository (in-memory)
//!                    ├──────→ password (argon2)
//!                    └──────→ Notifier (new registration alert)
//! ```
//!
//! Login checks credentials and returns the profile; there are no sessions
//! or tokens.

pub mod error;
pub mod password;
pub mod service;
pub mod store;
pub mod types;
pub mod validation;

pub use error::UserError;
pub use service::UserService;
pub use store::{InMemoryUserStore, UserRepository, WriteOutcome};
pub use types::{
    LoginRequest, ProfileChanges, RegisterRequest, UpdateProfileRequest, User, UserDraft,
    UserProfile,
};
