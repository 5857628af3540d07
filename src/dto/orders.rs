use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    domain::{kinds::DeliveryType, status::ServiceOrderStatus},
    models::{Customer, EntryChecklist, ProblemType, ServiceOrder, ServiceOrderHistory},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateServiceOrderRequest {
    pub customer_id: Uuid,
    pub device_brand: String,
    pub device_model: String,
    pub device_password: Option<String>,
    pub device_imei: Option<String>,
    pub device_color: Option<String>,
    pub problem_description: String,
    pub problem_type_id: Option<Uuid>,
    pub delivery_type: DeliveryType,
    pub delivery_address: Option<String>,
    pub estimated_price: Option<Decimal>,
    pub entry_checklist: Option<EntryChecklist>,
    /// Lead this order was opened from; it is marked converted.
    pub lead_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateServiceOrderRequest {
    pub technician_id: Option<Uuid>,
    pub diagnosis: Option<String>,
    pub entry_checklist: Option<EntryChecklist>,
    pub estimated_price: Option<Decimal>,
    pub final_price: Option<Decimal>,
    pub parts_cost: Option<Decimal>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: ServiceOrderStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AdvanceRequest {
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithCustomer {
    #[serde(flatten)]
    pub order: ServiceOrder,
    pub customer: Option<Customer>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<OrderWithCustomer>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDetail {
    pub order: ServiceOrder,
    pub customer: Option<Customer>,
    pub history: Vec<ServiceOrderHistory>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct KanbanCard {
    pub id: Uuid,
    pub order_number: i32,
    pub device_brand: String,
    pub device_model: String,
    pub problem_description: String,
    pub customer_name: Option<String>,
    pub final_price: Option<Decimal>,
    pub next_status: Option<ServiceOrderStatus>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct KanbanColumn {
    pub status: ServiceOrderStatus,
    pub title: String,
    pub cards: Vec<KanbanCard>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct KanbanBoard {
    pub columns: Vec<KanbanColumn>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProblemTypeList {
    pub items: Vec<ProblemType>,
}
