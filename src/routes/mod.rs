use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod doc;
pub mod financial;
pub mod health;
pub mod leads;
pub mod orders;
pub mod params;
pub mod pdv;
pub mod products;
pub mod store;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/leads", leads::public_router())
        .nest("/store", store::router())
        .nest("/admin", admin::router())
}
