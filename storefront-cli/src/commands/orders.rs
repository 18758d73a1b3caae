//! Order commands
use serde::Serialize;

use storefront_core::{Cart, Order, OrderForm, Result};

use super::CommandResult;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderItem {
    pub product_id: i64,
    pub quantity: u32,
}

/// `ID` or `ID:QUANTITY`
pub fn parse_item(raw: &str) -> std::result::Result<OrderItem, String> {
    let (id, quantity) = match raw.split_once(':') {
        Some((id, quantity)) => (id, quantity),
        None => (raw, "1"),
    };

    let product_id = id
        .trim()
        .parse()
        .map_err(|_| format!("invalid product id: {id}"))?;
    let quantity = quantity
        .trim()
        .parse()
        .map_err(|_| format!("invalid quantity: {quantity}"))?;

    if quantity == 0 {
        return Err("quantity must be at least 1".to_string());
    }

    Ok(OrderItem {
        product_id,
        quantity,
    })
}

/// Delivery details collected before checkout
#[derive(Debug, Clone)]
pub struct OrderDetails {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub request_message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub product_count: usize,
    pub total_price: u64,
}

pub async fn orders(state: &AppState) -> CommandResult<Vec<Order>> {
    state.storefront().orders().await.into()
}

pub async fn place_order(
    state: &AppState,
    details: OrderDetails,
    items: &[OrderItem],
) -> CommandResult<OrderSummary> {
    checkout(state, details, items).await.into()
}

async fn checkout(
    state: &AppState,
    details: OrderDetails,
    items: &[OrderItem],
) -> Result<OrderSummary> {
    let storefront = state.storefront();

    let mut cart = Cart::new();
    for item in items {
        let product = storefront.product(item.product_id).await?;
        cart.add(product, item.quantity)?;
    }

    let summary = OrderSummary {
        product_count: cart.order_products().len(),
        total_price: cart.total()?,
    };
    let form = OrderForm {
        name: details.name,
        phone: details.phone,
        address: details.address,
        request_message: details.request_message,
        total_price: summary.total_price,
    };

    storefront.checkout(form, &cart).await?;
    Ok(summary)
}

pub async fn cancel_order(state: &AppState, id: i64, reason: &str) -> CommandResult<()> {
    state.storefront().cancel_order(id, reason).await.into()
}
