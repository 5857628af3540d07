use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    domain::{
        ParseEnumError,
        kinds::{DeliveryType, ProductCategory, TransactionType, UserRole},
        lead::LeadStatus,
        status::ServiceOrderStatus,
    },
    entity,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub commission_rate: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Search hit used by the new-order form.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CustomerSummary {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScreenCondition {
    Ok,
    Cracked,
    Broken,
}

/// Condition of the device when it was dropped off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct EntryChecklist {
    pub screen_condition: Option<ScreenCondition>,
    pub turns_on: Option<bool>,
    pub touch_works: Option<bool>,
    pub cameras_work: Option<bool>,
    pub buttons_work: Option<bool>,
    pub charging_port_ok: Option<bool>,
    pub speakers_ok: Option<bool>,
    pub microphone_ok: Option<bool>,
    pub physical_damage: Option<String>,
    pub accessories_received: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProblemType {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub estimated_price: Option<Decimal>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceOrder {
    pub id: Uuid,
    pub order_number: i32,
    pub customer_id: Uuid,
    pub technician_id: Option<Uuid>,
    pub device_brand: String,
    pub device_model: String,
    pub device_password: Option<String>,
    pub device_imei: Option<String>,
    pub device_color: Option<String>,
    pub problem_description: String,
    pub problem_type_id: Option<Uuid>,
    pub diagnosis: Option<String>,
    pub status: ServiceOrderStatus,
    pub entry_checklist: EntryChecklist,
    pub estimated_price: Option<Decimal>,
    pub final_price: Option<Decimal>,
    pub parts_cost: Decimal,
    pub delivery_type: DeliveryType,
    pub delivery_address: Option<String>,
    pub received_at: Option<DateTime<Utc>>,
    pub approved_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceOrderHistory {
    pub id: Uuid,
    pub service_order_id: Uuid,
    pub user_id: Option<Uuid>,
    pub previous_status: Option<ServiceOrderStatus>,
    pub new_status: ServiceOrderStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Lead {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub device_brand: String,
    pub device_model: String,
    pub device_password: Option<String>,
    pub problem_type: String,
    pub problem_description: Option<String>,
    pub delivery_type: DeliveryType,
    pub delivery_address: Option<String>,
    pub status: LeadStatus,
    pub converted_order_id: Option<Uuid>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub barcode: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub category: ProductCategory,
    pub purchase_price: Decimal,
    pub sale_price: Decimal,
    pub stock_quantity: i32,
    pub min_stock: i32,
    pub is_active: bool,
    pub image_url: Option<String>,
    pub show_in_store: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentMethod {
    pub id: Uuid,
    pub name: String,
    pub fee_percentage: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Sale {
    pub id: Uuid,
    pub sale_number: i32,
    pub customer_id: Option<Uuid>,
    pub service_order_id: Option<Uuid>,
    pub user_id: Uuid,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub payment_method_id: Option<Uuid>,
    pub fee_percentage: Decimal,
    pub payment_fee: Decimal,
    pub net_total: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaleItem {
    pub id: Uuid,
    pub sale_id: Uuid,
    pub product_id: Option<Uuid>,
    pub description: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExpenseCategory {
    pub id: Uuid,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CashTransaction {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category_id: Option<Uuid>,
    pub category: Option<ExpenseCategory>,
    pub sale_id: Option<Uuid>,
    pub description: String,
    pub amount: Decimal,
    pub user_id: Uuid,
    pub notes: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub is_paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<entity::profiles::Model> for Profile {
    type Error = ParseEnumError;

    fn try_from(model: entity::profiles::Model) -> Result<Self, Self::Error> {
        Ok(Profile {
            id: model.id,
            email: model.email,
            full_name: model.full_name,
            role: model.role.parse()?,
            phone: model.phone,
            commission_rate: model.commission_rate,
            is_active: model.is_active,
            created_at: model.created_at.with_timezone(&Utc),
        })
    }
}

impl From<entity::customers::Model> for Customer {
    fn from(model: entity::customers::Model) -> Self {
        Customer {
            id: model.id,
            name: model.name,
            phone: model.phone,
            email: model.email,
            address: model.address,
            notes: model.notes,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<entity::problem_types::Model> for ProblemType {
    fn from(model: entity::problem_types::Model) -> Self {
        ProblemType {
            id: model.id,
            name: model.name,
            description: model.description,
            estimated_price: model.estimated_price,
        }
    }
}

impl TryFrom<entity::service_orders::Model> for ServiceOrder {
    type Error = ParseEnumError;

    fn try_from(model: entity::service_orders::Model) -> Result<Self, Self::Error> {
        // A malformed checklist is shown as blank rather than failing the order.
        let entry_checklist =
            serde_json::from_value(model.entry_checklist).unwrap_or_default();
        Ok(ServiceOrder {
            id: model.id,
            order_number: model.order_number,
            customer_id: model.customer_id,
            technician_id: model.technician_id,
            device_brand: model.device_brand,
            device_model: model.device_model,
            device_password: model.device_password,
            device_imei: model.device_imei,
            device_color: model.device_color,
            problem_description: model.problem_description,
            problem_type_id: model.problem_type_id,
            diagnosis: model.diagnosis,
            status: model.status.parse()?,
            entry_checklist,
            estimated_price: model.estimated_price,
            final_price: model.final_price,
            parts_cost: model.parts_cost,
            delivery_type: model.delivery_type.parse()?,
            delivery_address: model.delivery_address,
            received_at: model.received_at.map(|dt| dt.with_timezone(&Utc)),
            approved_at: model.approved_at.map(|dt| dt.with_timezone(&Utc)),
            completed_at: model.completed_at.map(|dt| dt.with_timezone(&Utc)),
            delivered_at: model.delivered_at.map(|dt| dt.with_timezone(&Utc)),
            notes: model.notes,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        })
    }
}

impl TryFrom<entity::service_order_history::Model> for ServiceOrderHistory {
    type Error = ParseEnumError;

    fn try_from(model: entity::service_order_history::Model) -> Result<Self, Self::Error> {
        Ok(ServiceOrderHistory {
            id: model.id,
            service_order_id: model.service_order_id,
            user_id: model.user_id,
            previous_status: model.previous_status.map(|s| s.parse()).transpose()?,
            new_status: model.new_status.parse()?,
            notes: model.notes,
            created_at: model.created_at.with_timezone(&Utc),
        })
    }
}

impl TryFrom<entity::leads::Model> for Lead {
    type Error = ParseEnumError;

    fn try_from(model: entity::leads::Model) -> Result<Self, Self::Error> {
        Ok(Lead {
            id: model.id,
            customer_name: model.customer_name,
            customer_phone: model.customer_phone,
            device_brand: model.device_brand,
            device_model: model.device_model,
            device_password: model.device_password,
            problem_type: model.problem_type,
            problem_description: model.problem_description,
            delivery_type: model.delivery_type.parse()?,
            delivery_address: model.delivery_address,
            status: model.status.parse()?,
            converted_order_id: model.converted_order_id,
            notes: model.notes,
            created_at: model.created_at.with_timezone(&Utc),
        })
    }
}

impl TryFrom<entity::products::Model> for Product {
    type Error = ParseEnumError;

    fn try_from(model: entity::products::Model) -> Result<Self, Self::Error> {
        Ok(Product {
            id: model.id,
            barcode: model.barcode,
            name: model.name,
            description: model.description,
            category: model.category.parse()?,
            purchase_price: model.purchase_price,
            sale_price: model.sale_price,
            stock_quantity: model.stock_quantity,
            min_stock: model.min_stock,
            is_active: model.is_active,
            image_url: model.image_url,
            show_in_store: model.show_in_store,
            created_at: model.created_at.with_timezone(&Utc),
        })
    }
}

impl From<entity::payment_methods::Model> for PaymentMethod {
    fn from(model: entity::payment_methods::Model) -> Self {
        PaymentMethod {
            id: model.id,
            name: model.name,
            fee_percentage: model.fee_percentage,
        }
    }
}

impl From<entity::sales::Model> for Sale {
    fn from(model: entity::sales::Model) -> Self {
        Sale {
            id: model.id,
            sale_number: model.sale_number,
            customer_id: model.customer_id,
            service_order_id: model.service_order_id,
            user_id: model.user_id,
            subtotal: model.subtotal,
            discount: model.discount,
            total: model.total,
            payment_method_id: model.payment_method_id,
            fee_percentage: model.fee_percentage,
            payment_fee: model.payment_fee,
            net_total: model.net_total,
            notes: model.notes,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<entity::sale_items::Model> for SaleItem {
    fn from(model: entity::sale_items::Model) -> Self {
        SaleItem {
            id: model.id,
            sale_id: model.sale_id,
            product_id: model.product_id,
            description: model.description,
            quantity: model.quantity,
            unit_price: model.unit_price,
            total_price: model.total_price,
        }
    }
}

impl From<entity::expense_categories::Model> for ExpenseCategory {
    fn from(model: entity::expense_categories::Model) -> Self {
        ExpenseCategory {
            id: model.id,
            name: model.name,
            color: model.color,
        }
    }
}

impl CashTransaction {
    pub fn from_entity(
        model: entity::cash_transactions::Model,
        category: Option<entity::expense_categories::Model>,
    ) -> Result<Self, ParseEnumError> {
        Ok(CashTransaction {
            id: model.id,
            kind: model.kind.parse()?,
            category_id: model.category_id,
            category: category.map(ExpenseCategory::from),
            sale_id: model.sale_id,
            description: model.description,
            amount: model.amount,
            user_id: model.user_id,
            notes: model.notes,
            due_date: model.due_date,
            is_paid: model.is_paid,
            paid_at: model.paid_at.map(|dt| dt.with_timezone(&Utc)),
            created_at: model.created_at.with_timezone(&Utc),
        })
    }
}
