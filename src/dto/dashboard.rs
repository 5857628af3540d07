use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{dashboard::ProblemCount, status::ServiceOrderStatus};

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderKpis {
    pub total: i64,
    pub pending: i64,
    pub completed: i64,
    pub trend: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LeadKpis {
    pub total: i64,
    pub pending: i64,
    pub converted: i64,
    pub conversion_rate: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerKpis {
    pub total: i64,
    pub new: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FinancialKpis {
    pub gross_revenue: Decimal,
    pub net_revenue: Decimal,
    pub expenses: Decimal,
    pub profit: Decimal,
    pub trend: Decimal,
    pub ticket_medio: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecentOrder {
    pub id: Uuid,
    pub order_number: i32,
    pub status: ServiceOrderStatus,
    pub device_brand: String,
    pub device_model: String,
    pub customer_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardKpis {
    pub orders: OrderKpis,
    pub leads: LeadKpis,
    pub customers: CustomerKpis,
    pub financial: FinancialKpis,
    pub top_problems: Vec<ProblemCount>,
    pub recent_orders: Vec<RecentOrder>,
}
