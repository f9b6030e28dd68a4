//! Order storage
//!
//! [`OrderRepository`] is the seam the service talks to. The only
//! implementation is [`InMemoryOrderStore`]: records live for the process
//! lifetime and are lost on restart.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard};

use super::types::{Order, OrderDraft, OrderStatus};

// ============================================================================
// Repository trait
// ============================================================================

/// Repository trait for Order data access
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Allocate the next id and append a new `pending` order, atomically.
    async fn insert(&self, draft: OrderDraft, now: DateTime<Utc>) -> Result<Order>;

    /// Snapshot of every order, in insertion order.
    async fn all(&self) -> Result<Vec<Order>>;

    async fn find_by_id(&self, id: u64) -> Result<Option<Order>>;

    /// Set status and refresh `updated_at`. `None` if the id is unknown.
    async fn update_status(
        &self,
        id: u64,
        status: OrderStatus,
        now: DateTime<Utc>,
    ) -> Result<Option<Order>>;

    /// Number of orders ever created.
    async fn count(&self) -> Result<usize>;
}

// ============================================================================
// In-memory implementation
// ============================================================================

struct StoreInner {
    /// Next id to hand out; starts at 1
    next_id: u64,
    orders: Vec<Order>,
}

/// Process-lifetime order store.
///
/// Counter and collection share one mutex, so id allocation and append
/// happen in a single critical section and insertion order equals id order.
pub struct InMemoryOrderStore {
    inner: Mutex<StoreInner>,
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                next_id: 1,
                orders: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreInner>> {
        self.inner
            .lock()
            .map_err(|_| anyhow::anyhow!("order store mutex poisoned"))
    }

    /// Return the current counter value, then increment it.
    pub fn next_id(&self) -> Result<u64> {
        let mut inner = self.lock()?;
        let id = inner.next_id;
        inner.next_id += 1;
        Ok(id)
    }

    /// Append an already-built order to the end of the collection.
    pub fn append(&self, order: Order) -> Result<()> {
        self.lock()?.orders.push(order);
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderStore {
    async fn insert(&self, draft: OrderDraft, now: DateTime<Utc>) -> Result<Order> {
        let mut inner = self.lock()?;
        let id = inner.next_id;
        inner.next_id += 1;
        let order = Order::new(id, draft, now);
        inner.orders.push(order.clone());
        Ok(order)
    }

    async fn all(&self) -> Result<Vec<Order>> {
        Ok(self.lock()?.orders.clone())
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Order>> {
        Ok(self.lock()?.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn update_status(
        &self,
        id: u64,
        status: OrderStatus,
        now: DateTime<Utc>,
    ) -> Result<Option<Order>> {
        let mut inner = self.lock()?;
        Ok(inner.orders.iter_mut().find(|o| o.id == id).map(|order| {
            order.status = status;
            order.updated_at = now;
            order.clone()
        }))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.lock()?.orders.len())
    }
}
