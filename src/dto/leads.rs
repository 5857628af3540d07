use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    domain::{kinds::DeliveryType, lead::LeadStatus},
    models::Lead,
};

/// Public pre-quote form.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLeadRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub device_brand: String,
    pub device_model: String,
    pub device_password: Option<String>,
    pub problem_type: String,
    pub problem_description: Option<String>,
    pub delivery_type: DeliveryType,
    pub delivery_address: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateLeadStatusRequest {
    pub status: LeadStatus,
    pub converted_order_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LeadList {
    pub items: Vec<Lead>,
    pub pending: i64,
}
