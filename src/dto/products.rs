use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{domain::kinds::ProductCategory, models::Product};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub barcode: Option<String>,
    pub category: ProductCategory,
    pub purchase_price: Option<Decimal>,
    pub sale_price: Decimal,
    pub stock_quantity: Option<i32>,
    pub min_stock: Option<i32>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub show_in_store: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub barcode: Option<String>,
    pub category: Option<ProductCategory>,
    pub purchase_price: Option<Decimal>,
    pub sale_price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
    pub min_stock: Option<i32>,
    pub image_url: Option<String>,
    pub show_in_store: Option<bool>,
    pub is_active: Option<bool>,
}

#[derive(Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<Product>,
}
