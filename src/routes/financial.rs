use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch},
};
use uuid::Uuid;

use crate::{
    dto::financial::{
        CreateTransactionRequest, ExpenseCategoryList, MonthlyStatement, TransactionList,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::CashTransaction,
    response::ApiResponse,
    services::financial_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(monthly_statement).post(create_transaction))
        .route("/transactions/{id}/paid", patch(mark_paid))
        .route("/pending", get(pending_transactions))
        .route("/categories", get(list_categories))
}

#[utoipa::path(
    get,
    path = "/api/admin/financial/transactions",
    responses(
        (status = 200, description = "This month's transactions and totals", body = ApiResponse<MonthlyStatement>)
    ),
    tag = "Financial"
)]
pub async fn monthly_statement(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<MonthlyStatement>>> {
    let resp = financial_service::monthly_statement(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/financial/transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 200, description = "Transaction recorded", body = ApiResponse<CashTransaction>),
        (status = 400, description = "Invalid amount, description or category")
    ),
    tag = "Financial"
)]
pub async fn create_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateTransactionRequest>,
) -> AppResult<Json<ApiResponse<CashTransaction>>> {
    let resp = financial_service::create_transaction(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/financial/transactions/{id}/paid",
    params(
        ("id" = Uuid, Path, description = "Transaction ID")
    ),
    responses(
        (status = 200, description = "Transaction settled", body = ApiResponse<CashTransaction>),
        (status = 404, description = "Transaction not found")
    ),
    tag = "Financial"
)]
pub async fn mark_paid(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CashTransaction>>> {
    let resp = financial_service::mark_paid(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/financial/pending",
    responses(
        (status = 200, description = "Unpaid transactions by due date", body = ApiResponse<TransactionList>)
    ),
    tag = "Financial"
)]
pub async fn pending_transactions(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<TransactionList>>> {
    let resp = financial_service::pending_transactions(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/financial/categories",
    responses(
        (status = 200, description = "Active expense categories", body = ApiResponse<ExpenseCategoryList>)
    ),
    tag = "Financial"
)]
pub async fn list_categories(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<ExpenseCategoryList>>> {
    let resp = financial_service::list_categories(&state).await?;
    Ok(Json(resp))
}
