use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
    sea_query::{Expr, extension::postgres::PgExpr},
};
use uuid::Uuid;

use crate::{
    dto::customers::{CreateCustomerRequest, CreatedId, CustomerList, CustomerSearchResult},
    entity::customers::{ActiveModel as CustomerActive, Column, Entity as Customers},
    error::{AppError, AppResult},
    models::{Customer, CustomerSummary},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

const SEARCH_LIMIT: u64 = 10;

/// Blank form fields are stored as NULL.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub async fn create_customer(
    state: &AppState,
    payload: CreateCustomerRequest,
) -> AppResult<ApiResponse<CreatedId>> {
    if payload.name.trim().is_empty() || payload.phone.trim().is_empty() {
        return Err(AppError::BadRequest("Nome e telefone são obrigatórios".into()));
    }

    let customer = CustomerActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name.trim().to_string()),
        phone: Set(payload.phone.trim().to_string()),
        email: Set(non_blank(payload.email)),
        address: Set(non_blank(payload.address)),
        notes: Set(non_blank(payload.notes)),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(customer_id = %customer.id, "customer created");

    Ok(ApiResponse::success(
        "Cliente cadastrado com sucesso!",
        CreatedId { id: customer.id },
        Some(Meta::empty()),
    ))
}

pub async fn search_customers(
    state: &AppState,
    term: Option<&str>,
) -> AppResult<ApiResponse<CustomerSearchResult>> {
    let Some(term) = term else {
        return Ok(ApiResponse::success(
            "OK",
            CustomerSearchResult { items: Vec::new() },
            None,
        ));
    };

    let pattern = format!("%{}%", term);
    let items = Customers::find()
        .filter(
            Condition::any()
                .add(Expr::col(Column::Name).ilike(pattern.clone()))
                .add(Expr::col(Column::Phone).ilike(pattern)),
        )
        .order_by_asc(Column::Name)
        .limit(SEARCH_LIMIT)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|c| CustomerSummary {
            id: c.id,
            name: c.name,
            phone: c.phone,
        })
        .collect();

    Ok(ApiResponse::success("OK", CustomerSearchResult { items }, None))
}

pub async fn list_customers(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<CustomerList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Customers::find().order_by_desc(Column::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Customer::from)
        .collect();

    Ok(ApiResponse::success(
        "Clientes",
        CustomerList { items },
        Some(Meta::new(page, limit, total)),
    ))
}
