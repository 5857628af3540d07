use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    domain::sale::SaleTotals,
    models::{PaymentMethod, Sale, SaleItem},
};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SaleItemInput {
    pub product_id: Option<Uuid>,
    pub description: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSaleRequest {
    pub items: Vec<SaleItemInput>,
    pub payment_method_id: Uuid,
    pub discount: Option<Decimal>,
    pub customer_id: Option<Uuid>,
    pub service_order_id: Option<Uuid>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SaleReceipt {
    pub sale: Sale,
    pub items: Vec<SaleItem>,
    pub totals: SaleTotals,
}

/// Product row as shown in the PDV search box.
#[derive(Debug, Serialize, ToSchema)]
pub struct PdvProduct {
    pub id: Uuid,
    pub name: String,
    pub barcode: Option<String>,
    pub sale_price: Decimal,
    pub stock_quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PdvProductList {
    pub items: Vec<PdvProduct>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentMethodList {
    pub items: Vec<PaymentMethod>,
}
