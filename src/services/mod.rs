pub mod auth_service;
pub mod customer_service;
pub mod dashboard_service;
pub mod financial_service;
pub mod lead_service;
pub mod pdv_service;
pub mod product_service;
pub mod service_order_service;
pub mod store_service;
