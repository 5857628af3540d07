use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch, post},
};
use uuid::Uuid;

use crate::{
    dto::orders::{
        AdvanceRequest, CreateServiceOrderRequest, KanbanBoard, OrderDetail, OrderList,
        ProblemTypeList, UpdateServiceOrderRequest, UpdateStatusRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::ServiceOrder,
    response::ApiResponse,
    routes::params::OrderListQuery,
    services::service_order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/kanban", get(kanban_board))
        .route("/{id}", get(get_order).patch(update_order))
        .route("/{id}/status", patch(update_status))
        .route("/{id}/advance", post(advance_order))
}

pub fn problem_types_router() -> Router<AppState> {
    Router::new().route("/", get(list_problem_types))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("status" = Option<String>, Query, description = "Only orders in this status"),
        ("sort_order" = Option<String>, Query, description = "asc or desc by creation, default desc"),
    ),
    responses(
        (status = 200, description = "Service orders with their customer", body = ApiResponse<OrderList>)
    ),
    tag = "Service Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = service_order_service::list_orders(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/orders",
    request_body = CreateServiceOrderRequest,
    responses(
        (status = 200, description = "Order opened", body = ApiResponse<ServiceOrder>),
        (status = 400, description = "Invalid order or unknown customer"),
        (status = 404, description = "Lead not found")
    ),
    tag = "Service Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateServiceOrderRequest>,
) -> AppResult<Json<ApiResponse<ServiceOrder>>> {
    let resp = service_order_service::create_order(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders/kanban",
    responses(
        (status = 200, description = "Orders grouped by board column", body = ApiResponse<KanbanBoard>)
    ),
    tag = "Service Orders"
)]
pub async fn kanban_board(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<KanbanBoard>>> {
    let resp = service_order_service::kanban_board(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Service order ID")
    ),
    responses(
        (status = 200, description = "Order, customer and status history", body = ApiResponse<OrderDetail>),
        (status = 404, description = "Order not found")
    ),
    tag = "Service Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let resp = service_order_service::get_order(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Service order ID")
    ),
    request_body = UpdateServiceOrderRequest,
    responses(
        (status = 200, description = "Order updated", body = ApiResponse<ServiceOrder>),
        (status = 404, description = "Order not found")
    ),
    tag = "Service Orders"
)]
pub async fn update_order(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateServiceOrderRequest>,
) -> AppResult<Json<ApiResponse<ServiceOrder>>> {
    let resp = service_order_service::update_order(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/orders/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Service order ID")
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status changed and history recorded", body = ApiResponse<ServiceOrder>),
        (status = 404, description = "Order not found")
    ),
    tag = "Service Orders"
)]
pub async fn update_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<ApiResponse<ServiceOrder>>> {
    let resp = service_order_service::update_status(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/orders/{id}/advance",
    params(
        ("id" = Uuid, Path, description = "Service order ID")
    ),
    request_body = AdvanceRequest,
    responses(
        (status = 200, description = "Moved to the next board column", body = ApiResponse<ServiceOrder>),
        (status = 400, description = "Order cannot advance"),
        (status = 404, description = "Order not found")
    ),
    tag = "Service Orders"
)]
pub async fn advance_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    payload: Option<Json<AdvanceRequest>>,
) -> AppResult<Json<ApiResponse<ServiceOrder>>> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    let resp = service_order_service::advance_order(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/problem-types",
    responses(
        (status = 200, description = "Active problem types", body = ApiResponse<ProblemTypeList>)
    ),
    tag = "Service Orders"
)]
pub async fn list_problem_types(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<ProblemTypeList>>> {
    let resp = service_order_service::list_problem_types(&state).await?;
    Ok(Json(resp))
}
