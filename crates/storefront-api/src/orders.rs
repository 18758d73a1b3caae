//! Orders

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{require_token, ApiClient};
use crate::Result;

/// Delivery details entered at checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderForm {
    pub name: String,
    pub phone: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_message: Option<String>,
    pub total_price: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderProduct {
    pub product_id: i64,
    #[serde(default)]
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    #[serde(default)]
    pub total_price: u64,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub order_status: Option<String>,
    #[serde(default)]
    pub refund_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub order_product: Vec<OrderProduct>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlaceOrderBody<'a> {
    order_form: OrderFormWithQuantity<'a>,
    order_product: &'a [OrderProduct],
}

#[derive(Serialize)]
struct OrderFormWithQuantity<'a> {
    #[serde(flatten)]
    form: &'a OrderForm,
    /// Number of distinct products in the order
    quantity: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CancelBody<'a> {
    refund_reason: &'a str,
}

impl ApiClient {
    pub async fn list_orders(&self, token: Option<&str>) -> Result<Vec<Order>> {
        let token = require_token(token)?;
        let builder = self.request(Method::GET, "/order", Some(token))?;
        self.execute(builder).await
    }

    pub async fn place_order(
        &self,
        token: Option<&str>,
        form: &OrderForm,
        products: &[OrderProduct],
    ) -> Result<()> {
        let token = require_token(token)?;
        let body = PlaceOrderBody {
            order_form: OrderFormWithQuantity {
                form,
                quantity: products.len(),
            },
            order_product: products,
        };
        let builder = self
            .request(Method::POST, "/order", Some(token))?
            .json(&body);
        self.execute_empty(builder).await?;

        tracing::info!(
            product_count = products.len(),
            total_price = form.total_price,
            "Placed order"
        );
        Ok(())
    }

    pub async fn cancel_order(
        &self,
        token: Option<&str>,
        order_id: i64,
        refund_reason: &str,
    ) -> Result<()> {
        let token = require_token(token)?;
        let builder = self
            .request(Method::PATCH, &format!("/order/cancel/{order_id}"), Some(token))?
            .json(&CancelBody { refund_reason });
        self.execute_empty(builder).await?;

        tracing::info!(order_id, "Cancelled order");
        Ok(())
    }
}
