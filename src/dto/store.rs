use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    cart::{CartLine, CartSnapshot},
    kinds::ProductCategory,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct StoreProductsQuery {
    pub category: Option<ProductCategory>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FeaturedQuery {
    pub limit: Option<u64>,
}

/// Cart priced against current catalogue rows.
#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub total: Decimal,
    pub item_count: i64,
    /// What the client should persist in place of its previous snapshot.
    pub snapshot: CartSnapshot,
}
