pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod financial;
pub mod leads;
pub mod orders;
pub mod pdv;
pub mod products;
pub mod store;
