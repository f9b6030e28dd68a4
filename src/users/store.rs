//! Account storage
//!
//! Same seam as the order store: [`UserRepository`] is what the service sees,
//! [`InMemoryUserStore`] keeps accounts for the process lifetime. Email
//! uniqueness is enforced inside the store so two concurrent registrations
//! cannot both succeed.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard};

use super::types::{ProfileChanges, User, UserDraft};

/// Result of a write that may hit the unique-email rule.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome {
    Saved(User),
    EmailTaken,
    NotFound,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Allocate an id and store the account unless the email is taken.
    async fn insert(&self, draft: UserDraft, now: DateTime<Utc>) -> Result<WriteOutcome>;

    /// Every account, in id order.
    async fn all(&self) -> Result<Vec<User>>;

    async fn find_by_id(&self, id: u64) -> Result<Option<User>>;

    /// `email` must already be normalized.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Apply `changes` and refresh `updated_at`.
    async fn update(
        &self,
        id: u64,
        changes: ProfileChanges,
        now: DateTime<Utc>,
    ) -> Result<WriteOutcome>;

    /// `false` if the id is unknown. Ids are never reused.
    async fn delete(&self, id: u64) -> Result<bool>;

    async fn count(&self) -> Result<usize>;
}

struct StoreInner {
    next_id: u64,
    users: Vec<User>,
}

impl StoreInner {
    fn email_owner(&self, email: &str) -> Option<u64> {
        self.users.iter().find(|u| u.email == email).map(|u| u.id)
    }
}

pub struct InMemoryUserStore {
    inner: Mutex<StoreInner>,
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                next_id: 1,
                users: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreInner>> {
        self.inner
            .lock()
            .map_err(|_| anyhow::anyhow!("user store mutex poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn insert(&self, draft: UserDraft, now: DateTime<Utc>) -> Result<WriteOutcome> {
        let mut inner = self.lock()?;
        if inner.email_owner(&draft.email).is_some() {
            return Ok(WriteOutcome::EmailTaken);
        }
        let id = inner.next_id;
        inner.next_id += 1;
        let user = User::new(id, draft, now);
        inner.users.push(user.clone());
        Ok(WriteOutcome::Saved(user))
    }

    async fn all(&self) -> Result<Vec<User>> {
        Ok(self.lock()?.users.clone())
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<User>> {
        Ok(self.lock()?.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.lock()?.users.iter().find(|u| u.email == email).cloned())
    }

    async fn update(
        &self,
        id: u64,
        changes: ProfileChanges,
        now: DateTime<Utc>,
    ) -> Result<WriteOutcome> {
        let mut inner = self.lock()?;
        let taken = changes
            .email
            .as_deref()
            .and_then(|email| inner.email_owner(email))
            .is_some_and(|owner| owner != id);
        if taken {
            return Ok(WriteOutcome::EmailTaken);
        }
        Ok(match inner.users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.apply(changes, now);
                WriteOutcome::Saved(user.clone())
            }
            None => WriteOutcome::NotFound,
        })
    }

    async fn delete(&self, id: u64) -> Result<bool> {
        let mut inner = self.lock()?;
        let before = inner.users.len();
        inner.users.retain(|u| u.id != id);
        Ok(inner.users.len() != before)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.lock()?.users.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn draft(email: &str) -> UserDraft {
        UserDraft {
            name: "Sara".to_string(),
            email: email.to_string(),
            phone: "0500000000".to_string(),
            password_hash: "$argon2id$stub".to_string(),
        }
    }

    fn saved(outcome: WriteOutcome) -> User {
        match outcome {
            WriteOutcome::Saved(user) => user,
            other => panic!("expected saved user, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = InMemoryUserStore::new();
        let first = saved(store.insert(draft("a@x.com"), Utc::now()).await.unwrap());
        assert_eq!(first.id, 1);
        assert_eq!(
            store.insert(draft("a@x.com"), Utc::now()).await.unwrap(),
            WriteOutcome::EmailTaken
        );
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_email_uniqueness_ignores_self() {
        let store = InMemoryUserStore::new();
        let a = saved(store.insert(draft("a@x.com"), Utc::now()).await.unwrap());
        saved(store.insert(draft("b@x.com"), Utc::now()).await.unwrap());

        let same = ProfileChanges {
            email: Some("a@x.com".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            store.update(a.id, same, Utc::now()).await.unwrap(),
            WriteOutcome::Saved(_)
        ));

        let taken = ProfileChanges {
            email: Some("b@x.com".to_string()),
            ..Default::default()
        };
        assert_eq!(
            store.update(a.id, taken, Utc::now()).await.unwrap(),
            WriteOutcome::EmailTaken
        );

        assert_eq!(
            store
                .update(99, ProfileChanges::default(), Utc::now())
                .await
                .unwrap(),
            WriteOutcome::NotFound
        );
    }

    #[tokio::test]
    async fn test_delete_does_not_reuse_ids() {
        let store = InMemoryUserStore::new();
        let a = saved(store.insert(draft("a@x.com"), Utc::now()).await.unwrap());
        assert!(store.delete(a.id).await.unwrap());
        assert!(!store.delete(a.id).await.unwrap());
        assert!(store.find_by_email("a@x.com").await.unwrap().is_none());

        let b = saved(store.insert(draft("a@x.com"), Utc::now()).await.unwrap());
        assert_eq!(b.id, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registrations_same_email_one_wins() {
        let store = Arc::new(InMemoryUserStore::new());
        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.insert(draft("race@x.com"), Utc::now()).await.unwrap()
            }));
        }

        let mut ids = HashSet::new();
        for handle in handles {
            if let WriteOutcome::Saved(user) = handle.await.unwrap() {
                ids.insert(user.id);
            }
        }
        assert_eq!(ids.len(), 1);
        assert_eq!(store.count().await.unwrap(), 1);
    }
}
