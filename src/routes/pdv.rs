use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};

use crate::{
    dto::pdv::{CreateSaleRequest, PaymentMethodList, PdvProduct, PdvProductList, SaleReceipt},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::params::SearchQuery,
    services::{pdv_service, product_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sales", post(create_sale))
        .route("/products/search", get(search_products))
        .route("/products/barcode/{barcode}", get(product_by_barcode))
        .route("/payment-methods", get(payment_methods))
}

#[utoipa::path(
    post,
    path = "/api/admin/pdv/sales",
    request_body = CreateSaleRequest,
    responses(
        (status = 200, description = "Sale recorded", body = ApiResponse<SaleReceipt>),
        (status = 400, description = "Invalid items or insufficient stock")
    ),
    tag = "PDV"
)]
pub async fn create_sale(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateSaleRequest>,
) -> AppResult<Json<ApiResponse<SaleReceipt>>> {
    let resp = pdv_service::create_sale(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/pdv/products/search",
    params(
        ("q" = Option<String>, Query, description = "Part of the name or barcode"),
    ),
    responses(
        (status = 200, description = "Up to 10 active products", body = ApiResponse<PdvProductList>)
    ),
    tag = "PDV"
)]
pub async fn search_products(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<PdvProductList>>> {
    let resp = product_service::pdv_search(&state, query.term()).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/pdv/products/barcode/{barcode}",
    params(
        ("barcode" = String, Path, description = "Exact barcode")
    ),
    responses(
        (status = 200, description = "Product with this barcode", body = ApiResponse<PdvProduct>),
        (status = 404, description = "No active product with this barcode")
    ),
    tag = "PDV"
)]
pub async fn product_by_barcode(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(barcode): Path<String>,
) -> AppResult<Json<ApiResponse<PdvProduct>>> {
    let resp = product_service::pdv_by_barcode(&state, &barcode).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/pdv/payment-methods",
    responses(
        (status = 200, description = "Active payment methods with their fees", body = ApiResponse<PaymentMethodList>)
    ),
    tag = "PDV"
)]
pub async fn payment_methods(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<PaymentMethodList>>> {
    let resp = pdv_service::list_payment_methods(&state).await?;
    Ok(Json(resp))
}
