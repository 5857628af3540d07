use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    domain::{dashboard::current_month, sale::check_amount},
    dto::financial::{
        CashSummary, CreateTransactionRequest, ExpenseCategoryList, MonthlyStatement,
        TransactionList,
    },
    entity::{
        cash_transactions::{ActiveModel as CashActive, Column as CashCol, Entity as CashTransactions},
        expense_categories::{Column as CategoryCol, Entity as ExpenseCategories},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{CashTransaction, ExpenseCategory},
    response::{ApiResponse, Meta},
    services::customer_service::non_blank,
    state::AppState,
};

pub async fn create_transaction(
    state: &AppState,
    user: &AuthUser,
    payload: CreateTransactionRequest,
) -> AppResult<ApiResponse<CashTransaction>> {
    let description = payload.description.trim().to_string();
    if description.is_empty() {
        return Err(AppError::BadRequest("Informe a descrição".into()));
    }
    if payload.amount <= Decimal::ZERO {
        return Err(AppError::BadRequest("O valor deve ser maior que zero".into()));
    }
    check_amount(payload.amount)?;

    let category = match payload.category_id {
        Some(id) => Some(
            ExpenseCategories::find_by_id(id)
                .one(&state.orm)
                .await?
                .ok_or_else(|| AppError::BadRequest("Categoria não encontrada".into()))?,
        ),
        None => None,
    };

    let is_paid = payload.is_paid.unwrap_or(true);
    let transaction = CashActive {
        id: Set(Uuid::new_v4()),
        kind: Set(payload.kind.as_str().to_string()),
        category_id: Set(payload.category_id),
        sale_id: Set(None),
        description: Set(description),
        amount: Set(payload.amount),
        user_id: Set(user.user_id),
        notes: Set(non_blank(payload.notes)),
        due_date: Set(payload.due_date),
        is_paid: Set(is_paid),
        paid_at: Set(is_paid.then(|| Utc::now().fixed_offset())),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(
        transaction_id = %transaction.id,
        kind = %transaction.kind,
        amount = %transaction.amount,
        is_paid,
        "cash transaction created"
    );

    Ok(ApiResponse::success(
        "Transação criada com sucesso!",
        CashTransaction::from_entity(transaction, category)?,
        Some(Meta::empty()),
    ))
}

pub async fn mark_paid(state: &AppState, id: Uuid) -> AppResult<ApiResponse<CashTransaction>> {
    let (transaction, category) = CashTransactions::find_by_id(id)
        .find_also_related(ExpenseCategories)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: CashActive = transaction.into();
    active.is_paid = Set(true);
    active.paid_at = Set(Some(Utc::now().fixed_offset()));
    let transaction = active.update(&state.orm).await?;

    tracing::info!(transaction_id = %id, "cash transaction paid");

    Ok(ApiResponse::success(
        "Transação marcada como paga!",
        CashTransaction::from_entity(transaction, category)?,
        Some(Meta::empty()),
    ))
}

/// Transactions created this month with their running summary.
pub async fn monthly_statement(state: &AppState) -> AppResult<ApiResponse<MonthlyStatement>> {
    let window = current_month(Utc::now());
    let rows = CashTransactions::find()
        .filter(CashCol::CreatedAt.gte(window.start))
        .find_also_related(ExpenseCategories)
        .order_by_desc(CashCol::CreatedAt)
        .all(&state.orm)
        .await?;

    let items = rows
        .into_iter()
        .map(|(transaction, category)| CashTransaction::from_entity(transaction, category))
        .collect::<Result<Vec<_>, _>>()?;
    let summary = CashSummary::tally(items.iter().map(|t| (t.kind, t.amount)));

    Ok(ApiResponse::success(
        "Transações do mês",
        MonthlyStatement { items, summary },
        None,
    ))
}

pub async fn pending_transactions(state: &AppState) -> AppResult<ApiResponse<TransactionList>> {
    let items = CashTransactions::find()
        .filter(CashCol::IsPaid.eq(false))
        .find_also_related(ExpenseCategories)
        .order_by_asc(CashCol::DueDate)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(transaction, category)| CashTransaction::from_entity(transaction, category))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ApiResponse::success("Contas pendentes", TransactionList { items }, None))
}

pub async fn list_categories(state: &AppState) -> AppResult<ApiResponse<ExpenseCategoryList>> {
    let items = ExpenseCategories::find()
        .filter(CategoryCol::IsActive.eq(true))
        .order_by_asc(CategoryCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(ExpenseCategory::from)
        .collect();

    Ok(ApiResponse::success("OK", ExpenseCategoryList { items }, None))
}
