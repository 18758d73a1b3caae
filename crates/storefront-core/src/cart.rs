//! Cart selection and pricing

use serde::{Deserialize, Serialize};

use storefront_api::{OrderProduct, Product};

use crate::error::CoreError;
use crate::Result;

/// Unit price after a percent discount, rounded down to the won
pub fn discounted_price(price: u64, discount: Option<u32>) -> u64 {
    match discount {
        Some(percent) if percent > 0 => {
            let kept = 100 - u64::from(percent.min(100));
            // Split at 100 so the multiply cannot overflow
            price / 100 * kept + price % 100 * kept / 100
        }
        _ => price,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
    pub selected: bool,
}

impl CartItem {
    pub fn unit_price(&self) -> u64 {
        discounted_price(self.product.price, self.product.discount)
    }

    pub fn line_total(&self) -> Result<u64> {
        self.unit_price()
            .checked_mul(u64::from(self.quantity))
            .ok_or(CoreError::TotalOverflow)
    }
}

/// Items start out selected; checkout covers only the selected ones
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adding a product already in the cart bumps its quantity
    pub fn add(&mut self, product: Product, quantity: u32) -> Result<()> {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity = item
                .quantity
                .checked_add(quantity)
                .ok_or(CoreError::QuantityOverflow)?;
            return Ok(());
        }

        self.items.push(CartItem {
            product,
            quantity,
            selected: true,
        });
        Ok(())
    }

    pub fn remove(&mut self, product_id: i64) {
        self.items.retain(|i| i.product.id != product_id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn set_selected(&mut self, product_id: i64, selected: bool) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) {
            item.selected = selected;
        }
    }

    pub fn select_all(&mut self, selected: bool) {
        for item in &mut self.items {
            item.selected = selected;
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected_items(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter().filter(|i| i.selected)
    }

    pub fn total(&self) -> Result<u64> {
        self.selected_items().try_fold(0u64, |total, item| {
            total
                .checked_add(item.line_total()?)
                .ok_or(CoreError::TotalOverflow)
        })
    }

    pub fn order_products(&self) -> Vec<OrderProduct> {
        self.selected_items()
            .map(|i| OrderProduct {
                product_id: i.product.id,
                quantity: i.quantity,
            })
            .collect()
    }
}
