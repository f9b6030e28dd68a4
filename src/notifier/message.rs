//! Notification payloads and their chat rendering (HTML parse mode).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use std::fmt::Write;

use crate::orders::{ContactMessage, Order};
use crate::users::User;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const CURRENCY: &str = "SAR";
const UNSPECIFIED: &str = "not provided";

/// Summary of a newly placed order
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    pub order_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub items: Vec<Value>,
    pub total: Decimal,
    pub placed_at: DateTime<Utc>,
}

impl From<&Order> for OrderSummary {
    fn from(order: &Order) -> Self {
        Self {
            order_number: order.order_number.clone(),
            customer_name: order.customer_name.clone(),
            customer_email: order.customer_email.clone(),
            customer_phone: order.customer_phone.clone(),
            items: order.items.clone(),
            total: order.total_amount,
            placed_at: order.created_at,
        }
    }
}

/// Contact details of a newly registered account. No credentials.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationSummary {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub registered_at: DateTime<Utc>,
}

impl From<&User> for RegistrationSummary {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            registered_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    OrderPlaced(OrderSummary),
    Contact {
        message: ContactMessage,
        received_at: DateTime<Utc>,
    },
    UserRegistered(RegistrationSummary),
}

impl Notification {
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::OrderPlaced(_) => "order_placed",
            Notification::Contact { .. } => "contact",
            Notification::UserRegistered(_) => "user_registered",
        }
    }

    /// Chat text for this notification.
    pub fn render(&self) -> String {
        match self {
            Notification::OrderPlaced(summary) => render_order(summary),
            Notification::Contact {
                message,
                received_at,
            } => render_contact(message, received_at),
            Notification::UserRegistered(summary) => render_registration(summary),
        }
    }
}

/// Escape text for Telegram HTML parse mode.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Name, quantity and price of an opaque line item, with defaults.
fn line_item_fields(item: &Value) -> (String, String, String) {
    let name = item
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("Unnamed item")
        .to_string();
    let quantity = item
        .get("quantity")
        .filter(|v| v.is_number())
        .map(Value::to_string)
        .unwrap_or_else(|| "1".to_string());
    let price = item
        .get("price")
        .filter(|v| v.is_number())
        .map(Value::to_string)
        .unwrap_or_else(|| "0".to_string());
    (name, quantity, price)
}

fn render_order(summary: &OrderSummary) -> String {
    let mut text = String::new();
    // write! into a String cannot fail
    let _ = writeln!(text, "🎮 <b>New order from the game store!</b>");
    let _ = writeln!(text);
    let _ = writeln!(
        text,
        "🔖 <b>Order number:</b> {}",
        escape_html(&summary.order_number)
    );
    let _ = writeln!(text);
    let _ = writeln!(text, "👤 <b>Customer details:</b>");
    let _ = writeln!(text, "• Name: {}", escape_html(&summary.customer_name));
    let _ = writeln!(text, "• Email: {}", escape_html(&summary.customer_email));
    let _ = writeln!(text, "• Phone: {}", escape_html(&summary.customer_phone));
    let _ = writeln!(text);
    let _ = writeln!(text, "🛒 <b>Items:</b>");
    for item in &summary.items {
        let (name, quantity, price) = line_item_fields(item);
        let _ = writeln!(
            text,
            "• {} - Quantity: {} - Price: {} {}",
            escape_html(&name),
            quantity,
            price,
            CURRENCY
        );
    }
    let _ = writeln!(text);
    let _ = writeln!(text, "💰 <b>Total: {} {}</b>", summary.total, CURRENCY);
    let _ = write!(
        text,
        "📅 <b>Order time:</b> {}",
        summary.placed_at.format(TIME_FORMAT)
    );
    text
}

fn render_contact(message: &ContactMessage, received_at: &DateTime<Utc>) -> String {
    let phone = message.phone.as_deref().unwrap_or(UNSPECIFIED);
    format!(
        "📞 <b>New message from the game store website!</b>\n\n\
         👤 <b>Sender:</b>\n\
         • Name: {}\n\
         • Email: {}\n\
         • Phone: {}\n\n\
         💬 <b>Message:</b>\n{}\n\n\
         📅 <b>Sent at:</b> {}",
        escape_html(&message.name),
        escape_html(&message.email),
        escape_html(phone),
        escape_html(&message.message),
        received_at.format(TIME_FORMAT)
    )
}

fn render_registration(summary: &RegistrationSummary) -> String {
    format!(
        "🆕 <b>New user at the game store!</b>\n\n\
         👤 <b>User details:</b>\n\
         • Name: {}\n\
         • Email: {}\n\
         • Phone: {}\n\n\
         📅 <b>Registered at:</b> {}",
        escape_html(&summary.name),
        escape_html(&summary.email),
        escape_html(&summary.phone),
        summary.registered_at.format(TIME_FORMAT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_order_message_lists_items_and_total() {
        let summary = OrderSummary {
            order_number: "GO-000007".to_string(),
            customer_name: "Sara".to_string(),
            customer_email: "sara@example.com".to_string(),
            customer_phone: "0500000000".to_string(),
            items: vec![
                json!({"name": "FIFA 2024", "quantity": 2, "price": 299}),
                json!({"sku": "no-name"}),
            ],
            total: Decimal::from(598),
            placed_at: fixed_time(),
        };
        let text = Notification::OrderPlaced(summary).render();

        assert!(text.contains("GO-000007"));
        assert!(text.contains("• FIFA 2024 - Quantity: 2 - Price: 299 SAR"));
        assert!(text.contains("• Unnamed item - Quantity: 1 - Price: 0 SAR"));
        assert!(text.contains("Total: 598 SAR"));
        assert!(text.contains("2026-03-01 12:30:00"));
    }

    #[test]
    fn test_contact_message_defaults_phone() {
        let notification = Notification::Contact {
            message: ContactMessage {
                name: "Ali".to_string(),
                email: "ali@example.com".to_string(),
                phone: None,
                message: "Is <PS5> in stock?".to_string(),
            },
            received_at: fixed_time(),
        };
        let text = notification.render();
        assert_eq!(notification.kind(), "contact");
        assert!(text.contains("• Phone: not provided"));
        assert!(text.contains("Is &lt;PS5&gt; in stock?"));
    }

    #[test]
    fn test_registration_message() {
        let notification = Notification::UserRegistered(RegistrationSummary {
            name: "Sara & co".to_string(),
            email: "sara@example.com".to_string(),
            phone: "0500000000".to_string(),
            registered_at: fixed_time(),
        });
        let text = notification.render();
        assert_eq!(notification.kind(), "user_registered");
        assert!(text.starts_with("🆕 <b>New user at the game store!</b>"));
        assert!(text.contains("• Name: Sara &amp; co\n"));
        assert!(text.contains("• Email: sara@example.com\n"));
        assert!(text.ends_with("📅 <b>Registered at:</b> 2026-03-01 12:30:00"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a & b <c>"), "a &amp; b &lt;c&gt;");
        assert_eq!(escape_html("plain"), "plain");
    }
}
