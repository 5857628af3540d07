use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    domain::cart::CartSnapshot,
    dto::{
        products::ProductList,
        store::{CartView, FeaturedQuery, StoreProductsQuery},
    },
    error::AppResult,
    models::Product,
    response::ApiResponse,
    services::store_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/featured", get(featured_products))
        .route("/products/{id}", get(get_product))
        .route("/cart/quote", post(quote_cart))
}

#[utoipa::path(
    get,
    path = "/api/store/products",
    params(
        ("category" = Option<String>, Query, description = "accessory, part, service or other"),
    ),
    responses(
        (status = 200, description = "Products on sale", body = ApiResponse<ProductList>)
    ),
    security(()),
    tag = "Store"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<StoreProductsQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = store_service::list_products(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/store/products/featured",
    params(
        ("limit" = Option<u64>, Query, description = "How many products, default 4"),
    ),
    responses(
        (status = 200, description = "Newest products on sale", body = ApiResponse<ProductList>)
    ),
    security(()),
    tag = "Store"
)]
pub async fn featured_products(
    State(state): State<AppState>,
    Query(query): Query<FeaturedQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = store_service::featured_products(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/store/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found")
    ),
    security(()),
    tag = "Store"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = store_service::get_product(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/store/cart/quote",
    request_body = CartSnapshot,
    responses(
        (status = 200, description = "Cart priced against the catalogue", body = ApiResponse<CartView>)
    ),
    security(()),
    tag = "Store"
)]
pub async fn quote_cart(
    State(state): State<AppState>,
    Json(snapshot): Json<CartSnapshot>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = store_service::quote_cart(&state, snapshot).await?;
    Ok(Json(resp))
}
