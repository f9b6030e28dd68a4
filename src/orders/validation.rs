//! Request validation rules.
//!
//! Two entry points:
//! - [`validate_create_order`] stops at the first problem, checked in the order
//!   name, email, phone, items, total. Email is only checked for presence.
//! - [`collect_order_problems`] backs the pre-submit check endpoint and reports
//!   every problem, including an email without `@`.

use rust_decimal::Decimal;

use super::error::OrderError;
use super::types::{
    ContactMessage, ContactRequest, CreateOrderRequest, CustomerInfo, DEFAULT_PAYMENT_METHOD,
    OrderDraft,
};

/// Trimmed value, or `None` if absent or blank.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn required(value: &Option<String>, field: &str) -> Result<String, OrderError> {
    present(value)
        .map(str::to_string)
        .ok_or_else(|| OrderError::validation(format!("Missing required field: {}", field)))
}

/// Validate an order request and turn it into a draft.
pub fn validate_create_order(req: CreateOrderRequest) -> Result<OrderDraft, OrderError> {
    let customer = req.customer_info.unwrap_or_default();

    let customer_name = required(&customer.name, "customer_info.name")?;
    let customer_email = required(&customer.email, "customer_info.email")?;
    let customer_phone = required(&customer.phone, "customer_info.phone")?;

    let items = match req.items {
        Some(items) if !items.is_empty() => items,
        _ => {
            return Err(OrderError::validation(
                "Order must contain at least one item",
            ));
        }
    };

    let total_amount = match req.total {
        None => return Err(OrderError::validation("Missing required field: total")),
        Some(total) if total <= Decimal::ZERO => {
            return Err(OrderError::validation(
                "Total amount must be greater than 0",
            ));
        }
        Some(total) => total,
    };

    Ok(OrderDraft {
        customer_name,
        customer_email,
        customer_phone,
        customer_address: present(&customer.address).unwrap_or_default().to_string(),
        items,
        total_amount,
        payment_method: present(&req.payment_method)
            .unwrap_or(DEFAULT_PAYMENT_METHOD)
            .to_string(),
        notes: present(&req.notes).map(str::to_string),
        user_id: req.user_id,
    })
}

/// Every problem with an order request, in check order. Empty means valid.
pub fn collect_order_problems(req: &CreateOrderRequest) -> Vec<String> {
    let mut problems = Vec::new();
    let empty = CustomerInfo::default();
    let customer = req.customer_info.as_ref().unwrap_or(&empty);

    if present(&customer.name).is_none() {
        problems.push("Customer name is required".to_string());
    }

    match present(&customer.email) {
        None => problems.push("Customer email is required".to_string()),
        Some(email) if !email.contains('@') => problems.push("Invalid email format".to_string()),
        Some(_) => {}
    }

    if present(&customer.phone).is_none() {
        problems.push("Customer phone is required".to_string());
    }

    if req.items.as_ref().is_none_or(|items| items.is_empty()) {
        problems.push("Order must contain at least one item".to_string());
    }

    if req.total.is_none_or(|total| total <= Decimal::ZERO) {
        problems.push("Total amount must be greater than 0".to_string());
    }

    problems
}

/// Validate a contact form: name, email, message required; phone optional.
pub fn validate_contact(req: ContactRequest) -> Result<ContactMessage, OrderError> {
    let name = required(&req.name, "name")?;
    let email = required(&req.email, "email")?;
    let message = required(&req.message, "message")?;

    Ok(ContactMessage {
        name,
        email,
        phone: present(&req.phone).map(str::to_string),
        message,
    })
}
