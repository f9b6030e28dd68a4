//! User Service - account registration, login and profile management

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use super::error::UserError;
use super::password::{hash_password, verify_password};
use super::store::{UserRepository, WriteOutcome};
use super::types::{
    LoginRequest, ProfileChanges, RegisterRequest, UpdateProfileRequest, UserDraft, UserProfile,
};
use super::validation::{validate_login, validate_profile_update, validate_registration};
use crate::notifier::Notifier;

pub struct UserService {
    store: Arc<dyn UserRepository>,
    notifier: Notifier,
}

/// argon2 is CPU-bound; keep it off the async workers.
async fn hash_off_thread(password: String) -> Result<String, UserError> {
    Ok(tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(anyhow::Error::from)??)
}

async fn verify_off_thread(password: String, stored_hash: String) -> Result<bool, UserError> {
    Ok(
        tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
            .await
            .map_err(anyhow::Error::from)??,
    )
}

impl UserService {
    pub fn new(store: Arc<dyn UserRepository>, notifier: Notifier) -> Self {
        Self { store, notifier }
    }

    pub async fn user_count(&self) -> Result<usize, UserError> {
        Ok(self.store.count().await?)
    }

    /// Create an account and queue the new-registration alert.
    pub async fn register(&self, req: RegisterRequest) -> Result<UserProfile, UserError> {
        let registration = validate_registration(&req)?;

        // Skip hashing for an obvious duplicate; the store re-checks atomically.
        if self.store.find_by_email(&registration.email).await?.is_some() {
            return Err(UserError::email_taken());
        }

        let password_hash = hash_off_thread(registration.password).await?;
        let draft = UserDraft {
            name: registration.name,
            email: registration.email,
            phone: registration.phone,
            password_hash,
        };

        let user = match self.store.insert(draft, Utc::now()).await? {
            WriteOutcome::Saved(user) => user,
            WriteOutcome::EmailTaken | WriteOutcome::NotFound => {
                return Err(UserError::email_taken());
            }
        };

        info!(user_id = user.id, email = %user.email, "User registered");
        self.notifier.notify_registration(&user);
        Ok(user.profile())
    }

    /// Check credentials. Unknown email and wrong password fail the same way.
    pub async fn login(&self, req: LoginRequest) -> Result<UserProfile, UserError> {
        let credentials = validate_login(&req)?;

        let Some(user) = self.store.find_by_email(&credentials.email).await? else {
            warn!(email = %credentials.email, "Login for unknown email");
            return Err(UserError::InvalidCredentials);
        };

        if !verify_off_thread(credentials.password, user.password_hash.clone()).await? {
            warn!(user_id = user.id, "Login with wrong password");
            return Err(UserError::InvalidCredentials);
        }

        info!(user_id = user.id, "User logged in");
        Ok(user.profile())
    }

    pub async fn get_profile(&self, id: u64) -> Result<UserProfile, UserError> {
        self.store
            .find_by_id(id)
            .await?
            .map(|user| user.profile())
            .ok_or_else(UserError::not_found)
    }

    /// Update the non-blank fields. An unknown id is reported before any
    /// input problem.
    pub async fn update_profile(
        &self,
        id: u64,
        req: UpdateProfileRequest,
    ) -> Result<UserProfile, UserError> {
        if self.store.find_by_id(id).await?.is_none() {
            return Err(UserError::not_found());
        }

        let update = validate_profile_update(&req)?;
        let password_hash = match update.password {
            Some(password) => Some(hash_off_thread(password).await?),
            None => None,
        };
        let changes = ProfileChanges {
            name: update.name,
            email: update.email,
            phone: update.phone,
            password_hash,
        };

        match self.store.update(id, changes, Utc::now()).await? {
            WriteOutcome::Saved(user) => {
                info!(user_id = id, "Profile updated");
                Ok(user.profile())
            }
            WriteOutcome::EmailTaken => Err(UserError::email_taken()),
            WriteOutcome::NotFound => Err(UserError::not_found()),
        }
    }

    /// Every account, in registration order.
    pub async fn list_users(&self) -> Result<Vec<UserProfile>, UserError> {
        let users = self.store.all().await?;
        Ok(users.iter().map(|user| user.profile()).collect())
    }

    pub async fn delete_user(&self, id: u64) -> Result<(), UserError> {
        if !self.store.delete(id).await? {
            return Err(UserError::not_found());
        }
        info!(user_id = id, "User deleted");
        Ok(())
    }
}
