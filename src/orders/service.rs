//! Order Service - business logic for the order lifecycle
//!
//! Kept separate from the HTTP handlers so every operation can be exercised
//! without a server.

use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

use super::error::OrderError;
use super::store::OrderRepository;
use super::types::{
    ContactRequest, CreateOrderRequest, Order, OrderFilter, OrderStats, OrderStatus,
    UpdateStatusRequest,
};
use super::validation::{collect_order_problems, validate_contact, validate_create_order};
use crate::notifier::Notifier;

pub struct OrderService {
    store: Arc<dyn OrderRepository>,
    notifier: Notifier,
}

impl OrderService {
    pub fn new(store: Arc<dyn OrderRepository>, notifier: Notifier) -> Self {
        Self { store, notifier }
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub async fn order_count(&self) -> Result<usize, OrderError> {
        Ok(self.store.count().await?)
    }

    /// Validate, store as `pending`, then queue the new-order alert.
    pub async fn create_order(&self, req: CreateOrderRequest) -> Result<Order, OrderError> {
        let draft = validate_create_order(req)?;
        let order = self.store.insert(draft, Utc::now()).await?;

        info!(
            order_id = order.id,
            order_number = %order.order_number,
            total = %order.total_amount,
            items = order.items.len(),
            "Order created"
        );

        self.notifier.notify_order(&order);
        Ok(order)
    }

    /// Problems that would stop `create_order`, plus email format. Stores nothing.
    pub fn validate_order(&self, req: &CreateOrderRequest) -> Vec<String> {
        collect_order_problems(req)
    }

    /// Orders matching `filter`, newest first. Ties keep insertion order.
    pub async fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.store.all().await?;

        // `?status=` with no value means no filter
        if let Some(status) = filter.status.as_deref().filter(|s| !s.is_empty()) {
            orders.retain(|o| o.status.as_str() == status);
        }
        if let Some(user_id) = filter.user_id {
            orders.retain(|o| o.user_id == Some(user_id));
        }

        // sort_by is stable
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    pub async fn get_order(&self, id: u64) -> Result<Order, OrderError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| OrderError::not_found("Order not found"))
    }

    /// Move an order to any valid status. The status is checked before the id.
    pub async fn update_status(
        &self,
        id: u64,
        req: UpdateStatusRequest,
    ) -> Result<Order, OrderError> {
        let raw = req
            .status
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| OrderError::validation("Status is required"))?;

        let status: OrderStatus = raw.parse().map_err(|_| {
            OrderError::validation(format!(
                "Invalid status. Valid statuses: {}",
                OrderStatus::valid_list()
            ))
        })?;

        let order = self
            .store
            .update_status(id, status, Utc::now())
            .await?
            .ok_or_else(|| OrderError::not_found("Order not found"))?;

        info!(order_id = id, status = %status, "Order status updated");
        Ok(order)
    }

    /// Case-insensitive substring search over number, name and email.
    pub async fn search_orders(&self, query: &str) -> Result<Vec<Order>, OrderError> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Err(OrderError::validation("Search query is required"));
        }

        let mut orders = self.store.all().await?;
        orders.retain(|o| o.matches_query(&needle));
        Ok(orders)
    }

    /// Aggregate statistics over every stored order.
    ///
    /// The average divides by the total order count, pending and cancelled
    /// orders included.
    pub async fn stats(&self) -> Result<OrderStats, OrderError> {
        let orders = self.store.all().await?;

        let mut status_breakdown = BTreeMap::new();
        let mut total_revenue = Decimal::ZERO;
        for order in &orders {
            *status_breakdown.entry(order.status).or_insert(0usize) += 1;
            if order.status.counts_as_revenue() {
                total_revenue = total_revenue
                    .checked_add(order.total_amount)
                    .ok_or_else(|| {
                        anyhow::anyhow!("revenue overflow at order {}", order.order_number)
                    })?;
            }
        }

        let total_orders = orders.len();
        let divisor = Decimal::from(total_orders.max(1) as u64);

        Ok(OrderStats {
            total_orders,
            total_revenue,
            status_breakdown,
            average_order_value: total_revenue / divisor,
        })
    }

    /// Validate a contact form and relay it to the chat. Nothing is stored.
    pub fn submit_contact(&self, req: ContactRequest) -> Result<(), OrderError> {
        let message = validate_contact(req)?;
        info!(email = %message.email, "Contact message received");
        self.notifier.notify_contact(message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::{MessageChannel, NotifyError};
    use crate::orders::store::InMemoryOrderStore;
    use crate::orders::types::{CustomerInfo, OrderDraft};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;
    use std::time::Duration;

    fn service() -> (OrderService, Arc<InMemoryOrderStore>) {
        let store = Arc::new(InMemoryOrderStore::new());
        (
            OrderService::new(store.clone(), Notifier::disabled()),
            store,
        )
    }

    fn request(name: &str, email: &str, total: i64) -> CreateOrderRequest {
        CreateOrderRequest {
            customer_info: Some(CustomerInfo {
                name: Some(name.to_string()),
                email: Some(email.to_string()),
                phone: Some("0500000000".to_string()),
                address: None,
            }),
            items: Some(vec![json!({"name": "X", "quantity": 2, "price": 50})]),
            total: Some(Decimal::from(total)),
            ..Default::default()
        }
    }

    fn status(s: &str) -> UpdateStatusRequest {
        UpdateStatusRequest {
            status: Some(s.to_string()),
        }
    }

    #[tokio::test]
    async fn test_ids_strictly_increase_with_matching_numbers() {
        let (svc, _) = service();
        let mut last = 0;
        for i in 0..10 {
            let order = svc
                .create_order(request(&format!("c{}", i), "c@example.com", 10))
                .await
                .unwrap();
            assert!(order.id > last);
            assert_eq!(order.order_number, format!("GO-{:06}", order.id));
            last = order.id;
        }
    }

    #[tokio::test]
    async fn test_new_order_is_pending_and_not_revenue() {
        let (svc, _) = service();
        let order = svc
            .create_order(request("Sara", "sara@example.com", 100))
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_method, "cash_on_delivery");

        let stats = svc.stats().await.unwrap();
        assert_eq!(stats.total_orders, 1);
        assert_eq!(stats.total_revenue, Decimal::ZERO);

        svc.update_status(order.id, status("confirmed"))
            .await
            .unwrap();
        let stats = svc.stats().await.unwrap();
        assert_eq!(stats.total_revenue, Decimal::from(100));
    }

    #[tokio::test]
    async fn test_fetch_after_create_is_identical() {
        let (svc, _) = service();
        let created = svc
            .create_order(request("Sara", "sara@example.com", 100))
            .await
            .unwrap();
        let fetched = svc.get_order(created.id).await.unwrap();
        assert_eq!(created, fetched);
        let again = svc.get_order(created.id).await.unwrap();
        assert_eq!(again.updated_at, created.updated_at);
    }

    #[tokio::test]
    async fn test_invalid_status_never_mutates() {
        let (svc, _) = service();
        let order = svc
            .create_order(request("Sara", "sara@example.com", 100))
            .await
            .unwrap();

        for bad in ["refunded", "Pending", "", "   "] {
            let err = svc.update_status(order.id, status(bad)).await.unwrap_err();
            assert!(matches!(err, OrderError::Validation(_)), "{:?}", bad);
        }
        let err = svc
            .update_status(order.id, UpdateStatusRequest { status: None })
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::Validation(ref m) if m == "Status is required"));

        let unchanged = svc.get_order(order.id).await.unwrap();
        assert_eq!(unchanged, order);
    }

    #[tokio::test]
    async fn test_update_unknown_order_is_not_found() {
        let (svc, _) = service();
        let err = svc.update_status(999, status("confirmed")).await.unwrap_err();
        assert!(matches!(err, OrderError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_any_transition_allowed() {
        let (svc, _) = service();
        let order = svc
            .create_order(request("Sara", "sara@example.com", 100))
            .await
            .unwrap();
        for s in ["delivered", "pending", "pending", "cancelled", "shipped"] {
            let updated = svc.update_status(order.id, status(s)).await.unwrap();
            assert_eq!(updated.status.as_str(), s);
            assert_eq!(updated.created_at, order.created_at);
            assert!(updated.updated_at >= order.updated_at);
        }
    }

    #[tokio::test]
    async fn test_list_newest_first_ties_keep_insertion_order() {
        let (svc, store) = service();
        let t0 = Utc::now();
        let t1 = t0 + chrono::Duration::seconds(1);
        let draft = |name: &str| OrderDraft {
            customer_name: name.to_string(),
            customer_email: "x@example.com".to_string(),
            customer_phone: "1".to_string(),
            customer_address: String::new(),
            items: vec![json!({"name": "X"})],
            total_amount: Decimal::ONE,
            payment_method: "cash_on_delivery".to_string(),
            notes: None,
            user_id: None,
        };
        store.insert(draft("a"), t0).await.unwrap();
        store.insert(draft("b"), t1).await.unwrap();
        store.insert(draft("c"), t0).await.unwrap();
        store.insert(draft("d"), t1).await.unwrap();

        let orders = svc.list_orders(&OrderFilter::default()).await.unwrap();
        let names: Vec<&str> = orders.iter().map(|o| o.customer_name.as_str()).collect();
        assert_eq!(names, vec!["b", "d", "a", "c"]);
    }

    #[tokio::test]
    async fn test_list_filters_compose() {
        let (svc, _) = service();
        let mut a = request("a", "a@example.com", 10);
        a.user_id = Some(7);
        let mut b = request("b", "b@example.com", 10);
        b.user_id = Some(7);
        let c = request("c", "c@example.com", 10);

        let a = svc.create_order(a).await.unwrap();
        svc.create_order(b).await.unwrap();
        svc.create_order(c).await.unwrap();
        svc.update_status(a.id, status("shipped")).await.unwrap();

        let by_user = OrderFilter {
            status: None,
            user_id: Some(7),
        };
        assert_eq!(svc.list_orders(&by_user).await.unwrap().len(), 2);

        let both = OrderFilter {
            status: Some("shipped".to_string()),
            user_id: Some(7),
        };
        let res = svc.list_orders(&both).await.unwrap();
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].id, a.id);

        let unknown = OrderFilter {
            status: Some("lost".to_string()),
            user_id: None,
        };
        assert!(svc.list_orders(&unknown).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let (svc, _) = service();
        svc.create_order(request("Omar", "omar@example.com", 10))
            .await
            .unwrap();
        svc.create_order(request("Lina", "lina@example.com", 10))
            .await
            .unwrap();
        let third = svc
            .create_order(request("Huda", "HUDA@Mail.com", 10))
            .await
            .unwrap();

        let res = svc.search_orders("go-000003").await.unwrap();
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].id, third.id);

        assert_eq!(svc.search_orders("mail.COM").await.unwrap().len(), 1);
        assert_eq!(svc.search_orders("example").await.unwrap().len(), 2);

        let err = svc.search_orders("  ").await.unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));
    }

    #[tokio::test]
    async fn test_stats_on_empty_store() {
        let (svc, _) = service();
        let stats = svc.stats().await.unwrap();
        assert_eq!(stats.total_orders, 0);
        assert_eq!(stats.total_revenue, Decimal::ZERO);
        assert_eq!(stats.average_order_value, Decimal::ZERO);
        assert!(stats.status_breakdown.is_empty());
    }

    #[tokio::test]
    async fn test_average_divides_by_all_orders() {
        let (svc, _) = service();
        let a = svc.create_order(request("a", "a@x.com", 100)).await.unwrap();
        let b = svc.create_order(request("b", "b@x.com", 200)).await.unwrap();
        let c = svc.create_order(request("c", "c@x.com", 50)).await.unwrap();
        svc.update_status(a.id, status("delivered")).await.unwrap();
        svc.update_status(b.id, status("processing")).await.unwrap();
        svc.update_status(c.id, status("cancelled")).await.unwrap();
        svc.create_order(request("d", "d@x.com", 75)).await.unwrap();

        let stats = svc.stats().await.unwrap();
        assert_eq!(stats.total_orders, 4);
        assert_eq!(stats.total_revenue, Decimal::from(300));
        assert_eq!(
            stats.average_order_value,
            Decimal::from(300) / Decimal::from(4)
        );
        assert_eq!(stats.status_breakdown.get(&OrderStatus::Pending), Some(&1));
        assert_eq!(stats.status_breakdown.get(&OrderStatus::Cancelled), Some(&1));
        assert_eq!(stats.status_breakdown.get(&OrderStatus::Shipped), None);
    }

    #[tokio::test]
    async fn test_stats_revenue_overflow_is_internal_error() {
        let (svc, _) = service();
        let huge = Decimal::from_str_exact("50000000000000000000000000000").unwrap();
        for name in ["a", "b"] {
            let mut req = request(name, "big@example.com", 1);
            req.total = Some(huge);
            let order = svc.create_order(req).await.unwrap();
            svc.update_status(order.id, status("confirmed")).await.unwrap();
        }

        let err = svc.stats().await.unwrap_err();
        assert!(matches!(err, OrderError::Internal(_)));

        // Orders themselves stay readable
        assert_eq!(svc.list_orders(&OrderFilter::default()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_validation_error_does_not_consume_id() {
        let (svc, _) = service();
        let mut bad = request("a", "a@x.com", 10);
        bad.items = Some(vec![]);
        assert!(svc.create_order(bad).await.is_err());
        let ok = svc.create_order(request("a", "a@x.com", 10)).await.unwrap();
        assert_eq!(ok.id, 1);
    }

    #[derive(Default)]
    struct RecordingChannel {
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MessageChannel for RecordingChannel {
        async fn send_message(&self, text: &str) -> Result<(), NotifyError> {
            self.sent.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    struct BrokenChannel;

    #[async_trait]
    impl MessageChannel for BrokenChannel {
        async fn send_message(&self, _text: &str) -> Result<(), NotifyError> {
            Err(NotifyError::Rejected("Unauthorized".to_string()))
        }
    }

    #[tokio::test]
    async fn test_order_and_contact_are_relayed() {
        let channel = Arc::new(RecordingChannel::default());
        let (notifier, handle) = Notifier::spawn(channel.clone(), 8, Duration::from_secs(5));
        let svc = OrderService::new(Arc::new(InMemoryOrderStore::new()), notifier);

        svc.create_order(request("Sara", "sara@example.com", 100))
            .await
            .unwrap();
        svc.submit_contact(ContactRequest {
            name: Some("Ali".to_string()),
            email: Some("ali@example.com".to_string()),
            message: Some("Do you ship to Jeddah?".to_string()),
            phone: None,
        })
        .unwrap();

        drop(svc);
        handle.await.unwrap();

        let sent = channel.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert!(sent[0].contains("GO-000001"));
        assert!(sent[1].contains("Do you ship to Jeddah?"));
    }

    #[tokio::test]
    async fn test_notifier_failure_does_not_fail_order() {
        let (notifier, handle) =
            Notifier::spawn(Arc::new(BrokenChannel), 8, Duration::from_secs(5));
        let svc = OrderService::new(Arc::new(InMemoryOrderStore::new()), notifier);

        let order = svc
            .create_order(request("Sara", "sara@example.com", 100))
            .await
            .unwrap();
        assert_eq!(order.id, 1);

        drop(svc);
        handle.await.unwrap();
    }

    #[test]
    fn test_contact_missing_message_rejected() {
        let (svc, _) = service();
        let err = svc
            .submit_contact(ContactRequest {
                name: Some("Ali".to_string()),
                email: Some("ali@example.com".to_string()),
                message: Some(" ".to_string()),
                phone: None,
            })
            .unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));
    }
}
