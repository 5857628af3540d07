use axum::Router;

use crate::{
    routes::{customers, dashboard, financial, leads, orders, pdv, products},
    state::AppState,
};

/// Staff back office. Every handler below extracts `AuthUser`.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/customers", customers::router())
        .nest("/orders", orders::router())
        .nest("/problem-types", orders::problem_types_router())
        .nest("/leads", leads::admin_router())
        .nest("/products", products::router())
        .nest("/pdv", pdv::router())
        .nest("/financial", financial::router())
        .nest("/dashboard", dashboard::router())
}
