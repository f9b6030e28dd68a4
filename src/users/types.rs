//! Account records and request payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored account. Never serialized directly; see [`UserProfile`].
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: u64,
    pub name: String,
    /// Lowercased, unique across the store
    pub email: String,
    pub phone: String,
    /// argon2 PHC string
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: u64, draft: UserDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            password_hash: draft.password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            created_at: self.created_at,
        }
    }

    /// Apply the fields present in `changes`.
    pub fn apply(&mut self, changes: ProfileChanges, now: DateTime<Utc>) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(phone) = changes.phone {
            self.phone = phone;
        }
        if let Some(hash) = changes.password_hash {
            self.password_hash = hash;
        }
        self.updated_at = now;
    }
}

/// Public view of an account
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct UserProfile {
    pub id: u64,
    #[schema(example = "Sara")]
    pub name: String,
    #[schema(example = "sara@example.com")]
    pub email: String,
    #[schema(example = "0500000000")]
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

/// Validated registration with the password already hashed.
#[derive(Debug, Clone, PartialEq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
}

/// Validated profile update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password_hash: Option<String>,
}

/// POST /api/users/register body
#[derive(Clone, Default, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "Sara")]
    pub name: Option<String>,
    #[schema(example = "sara@example.com")]
    pub email: Option<String>,
    #[schema(example = "secret123")]
    pub password: Option<String>,
    #[schema(example = "0500000000")]
    pub phone: Option<String>,
}

/// POST /api/users/login body
#[derive(Clone, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "sara@example.com")]
    pub email: Option<String>,
    #[schema(example = "secret123")]
    pub password: Option<String>,
}

/// PUT /api/users/profile/{id} body. Blank fields are ignored.
#[derive(Clone, Default, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
}
