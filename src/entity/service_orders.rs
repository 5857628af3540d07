use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "service_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
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
    pub status: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub entry_checklist: Json,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub estimated_price: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub final_price: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub parts_cost: Decimal,
    pub delivery_type: String,
    pub delivery_address: Option<String>,
    pub received_at: Option<DateTimeWithTimeZone>,
    pub approved_at: Option<DateTimeWithTimeZone>,
    pub completed_at: Option<DateTimeWithTimeZone>,
    pub delivered_at: Option<DateTimeWithTimeZone>,
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customers::Entity",
        from = "Column::CustomerId",
        to = "super::customers::Column::Id"
    )]
    Customers,
    #[sea_orm(has_many = "super::service_order_history::Entity")]
    ServiceOrderHistory,
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customers.def()
    }
}

impl Related<super::service_order_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceOrderHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
