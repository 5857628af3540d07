//! Storefront cart state.
//!
//! The browser keeps the cart; the API rebuilds it from a snapshot against
//! current product rows so prices and stock limits are always fresh.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Product fields the cart needs to price and clamp a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartProduct {
    pub id: Uuid,
    pub name: String,
    pub sale_price: Decimal,
    pub stock_quantity: i32,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartLine {
    pub product: CartProduct,
    pub quantity: i32,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.product.sale_price * Decimal::from(self.quantity)
    }
}

/// Persisted form of a cart: product ids and quantities only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CartSnapshot {
    pub items: Vec<SnapshotLine>,
}

impl CartSnapshot {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{\"items\":[]}"))
    }

    /// Parse a stored snapshot. Anything unreadable restores as an empty cart.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(error = %err, "discarding unreadable cart snapshot");
                Self::default()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SnapshotLine {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add `quantity` units, never exceeding the product's stock.
    pub fn add(&mut self, product: CartProduct, quantity: i32) {
        let stock = product.stock_quantity;
        match self.lines.iter_mut().find(|l| l.product.id == product.id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(quantity).min(stock);
                line.product = product;
            }
            None => {
                let quantity = quantity.min(stock);
                if quantity > 0 {
                    self.lines.push(CartLine { product, quantity });
                }
            }
        }
        self.lines.retain(|l| l.quantity > 0);
    }

    /// Set a line's quantity; zero or less removes it.
    pub fn update_quantity(&mut self, product_id: Uuid, quantity: i32) {
        if quantity <= 0 {
            self.remove(product_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product_id) {
            line.quantity = quantity.min(line.product.stock_quantity);
        }
    }

    pub fn remove(&mut self, product_id: Uuid) {
        self.lines.retain(|l| l.product.id != product_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| i64::from(l.quantity)).sum()
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self
                .lines
                .iter()
                .map(|l| SnapshotLine {
                    product_id: l.product.id,
                    quantity: l.quantity,
                })
                .collect(),
        }
    }

    /// Rebuild a cart from a snapshot, resolving ids with `lookup`.
    ///
    /// Lines whose product cannot be found are dropped; quantities are clamped
    /// to current stock.
    pub fn hydrate<F>(snapshot: &CartSnapshot, mut lookup: F) -> Self
    where
        F: FnMut(Uuid) -> Option<CartProduct>,
    {
        let mut cart = Cart::new();
        for item in &snapshot.items {
            if item.quantity <= 0 {
                continue;
            }
            if let Some(product) = lookup(item.product_id) {
                cart.add(product, item.quantity);
            }
        }
        cart
    }
}
