//! Order records, request payloads and aggregate views.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Prefix of every order number, followed by the zero-padded id.
pub const ORDER_NUMBER_PREFIX: &str = "GO-";

/// Payment method recorded when the client sends none.
pub const DEFAULT_PAYMENT_METHOD: &str = "cash_on_delivery";

/// `GO-000007` for id 7.
pub fn order_number(id: u64) -> String {
    format!("{}{:06}", ORDER_NUMBER_PREFIX, id)
}

// ============================================================================
// OrderStatus
// ============================================================================

/// Order status.
///
/// Any status may follow any other; there is no transition graph.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Whether an order in this status contributes to revenue.
    #[inline]
    pub fn counts_as_revenue(&self) -> bool {
        matches!(
            self,
            OrderStatus::Confirmed
                | OrderStatus::Processing
                | OrderStatus::Shipped
                | OrderStatus::Delivered
        )
    }

    /// `pending, confirmed, ...` for error messages.
    pub fn valid_list() -> String {
        Self::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    /// Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Invalid status: {}", s))
    }
}

// ============================================================================
// Order
// ============================================================================

/// A stored order.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Order {
    pub id: u64,
    #[schema(example = "GO-000001")]
    pub order_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    /// Line items exactly as the client sent them
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<serde_json::Value>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 100.0)]
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub payment_method: String,
    pub notes: Option<String>,
    pub user_id: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Build a fresh `pending` order for an allocated id.
    pub fn new(id: u64, draft: OrderDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            order_number: order_number(id),
            customer_name: draft.customer_name,
            customer_email: draft.customer_email,
            customer_phone: draft.customer_phone,
            customer_address: draft.customer_address,
            items: draft.items,
            total_amount: draft.total_amount,
            status: OrderStatus::Pending,
            payment_method: draft.payment_method,
            notes: draft.notes,
            user_id: draft.user_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Case-insensitive substring match on number, name and email.
    /// `needle` must already be lowercase.
    pub fn matches_query(&self, needle: &str) -> bool {
        self.order_number.to_lowercase().contains(needle)
            || self.customer_name.to_lowercase().contains(needle)
            || self.customer_email.to_lowercase().contains(needle)
    }
}

/// Validated order contents, before an id is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub items: Vec<serde_json::Value>,
    pub total_amount: Decimal,
    pub payment_method: String,
    pub notes: Option<String>,
    pub user_id: Option<u64>,
}

// ============================================================================
// Request payloads
// ============================================================================

/// Customer block of an order request. Every field is optional at the
/// serde layer so validation can name the first missing one.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CustomerInfo {
    #[schema(example = "Sara")]
    pub name: Option<String>,
    #[schema(example = "sara@example.com")]
    pub email: Option<String>,
    #[schema(example = "0500000000")]
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// POST /api/orders body
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub customer_info: Option<CustomerInfo>,
    #[serde(default)]
    #[schema(value_type = Option<Vec<Object>>)]
    pub items: Option<Vec<serde_json::Value>>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>, example = 100.0)]
    pub total: Option<Decimal>,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// PUT /api/orders/{id}/status body
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    #[schema(example = "confirmed")]
    pub status: Option<String>,
}

/// POST /api/contact body
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub phone: Option<String>,
}

/// A validated contact message. Relayed, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

/// GET /api/orders query. Empty values mean no filter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderFilter {
    pub status: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub user_id: Option<u64>,
}

/// `?user_id=` parses as absent; anything else must be a number.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

// ============================================================================
// Statistics
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct OrderStats {
    pub total_orders: usize,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_revenue: Decimal,
    /// Count per observed status
    #[schema(value_type = Object)]
    pub status_breakdown: BTreeMap<OrderStatus, usize>,
    /// `total_revenue / max(total_orders, 1)`
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub average_order_value: Decimal,
}
