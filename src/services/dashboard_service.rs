use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{EntityTrait, QueryOrder, QuerySelect};

use crate::{
    db::DbPool,
    domain::{
        dashboard::{
            MonthWindow, average_ticket, conversion_rate, current_month, percent_change,
            previous_month, top_problems,
        },
        kinds::TransactionType,
        lead::LeadStatus,
        status::{COMPLETED_STATUSES, PENDING_STATUSES, ServiceOrderStatus},
    },
    dto::dashboard::{
        CustomerKpis, DashboardKpis, FinancialKpis, LeadKpis, OrderKpis, RecentOrder,
    },
    entity::{
        customers::Entity as Customers,
        service_orders::{Column as OrderCol, Entity as ServiceOrders},
    },
    error::AppResult,
    response::ApiResponse,
    state::AppState,
};

const RECENT_ORDERS: u64 = 5;

fn status_list(statuses: &[ServiceOrderStatus]) -> Vec<String> {
    statuses.iter().map(|s| s.as_str().to_string()).collect()
}

async fn count_orders(pool: &DbPool, window: MonthWindow) -> AppResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM service_orders WHERE created_at >= $1 AND created_at <= $2",
    )
    .bind(window.start)
    .bind(window.end)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Gross and net revenue plus the number of sales in `window`.
async fn sales_totals(pool: &DbPool, window: MonthWindow) -> AppResult<(Decimal, Decimal, i64)> {
    let row = sqlx::query_as::<_, (Decimal, Decimal, i64)>(
        r#"
        SELECT COALESCE(SUM(total), 0), COALESCE(SUM(net_total), 0), COUNT(*)
        FROM sales
        WHERE created_at >= $1 AND created_at <= $2
        "#,
    )
    .bind(window.start)
    .bind(window.end)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

async fn order_kpis(pool: &DbPool, current: MonthWindow, previous: MonthWindow) -> AppResult<OrderKpis> {
    let total = count_orders(pool, current).await?;
    let last_month = count_orders(pool, previous).await?;

    let pending = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM service_orders WHERE status = ANY($1)",
    )
    .bind(status_list(&PENDING_STATUSES))
    .fetch_one(pool)
    .await?;

    let completed = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM service_orders
        WHERE status = ANY($1) AND created_at >= $2 AND created_at <= $3
        "#,
    )
    .bind(status_list(&COMPLETED_STATUSES))
    .bind(current.start)
    .bind(current.end)
    .fetch_one(pool)
    .await?;

    Ok(OrderKpis {
        total,
        pending,
        completed,
        trend: percent_change(Decimal::from(total), Decimal::from(last_month)),
    })
}

async fn lead_kpis(pool: &DbPool, current: MonthWindow) -> AppResult<LeadKpis> {
    let (total, converted) = sqlx::query_as::<_, (i64, i64)>(
        r#"
        SELECT COUNT(*), COUNT(*) FILTER (WHERE status = $3)
        FROM leads
        WHERE created_at >= $1 AND created_at <= $2
        "#,
    )
    .bind(current.start)
    .bind(current.end)
    .bind(LeadStatus::Converted.as_str())
    .fetch_one(pool)
    .await?;

    let pending = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM leads WHERE status = $1")
        .bind(LeadStatus::Pending.as_str())
        .fetch_one(pool)
        .await?;

    Ok(LeadKpis {
        total,
        pending,
        converted,
        conversion_rate: conversion_rate(converted, total),
    })
}

async fn customer_kpis(pool: &DbPool, current: MonthWindow) -> AppResult<CustomerKpis> {
    let (total, new) = sqlx::query_as::<_, (i64, i64)>(
        r#"
        SELECT COUNT(*), COUNT(*) FILTER (WHERE created_at >= $1 AND created_at <= $2)
        FROM customers
        "#,
    )
    .bind(current.start)
    .bind(current.end)
    .fetch_one(pool)
    .await?;

    Ok(CustomerKpis { total, new })
}

async fn financial_kpis(
    pool: &DbPool,
    current: MonthWindow,
    previous: MonthWindow,
) -> AppResult<FinancialKpis> {
    let (gross_revenue, net_revenue, sales) = sales_totals(pool, current).await?;
    let (last_gross, _, _) = sales_totals(pool, previous).await?;

    let expenses = sqlx::query_scalar::<_, Decimal>(
        r#"
        SELECT COALESCE(SUM(amount), 0) FROM cash_transactions
        WHERE type = ANY($1) AND is_paid AND created_at >= $2 AND created_at <= $3
        "#,
    )
    .bind(vec![
        TransactionType::Expense.as_str().to_string(),
        TransactionType::Withdrawal.as_str().to_string(),
    ])
    .bind(current.start)
    .bind(current.end)
    .fetch_one(pool)
    .await?;

    Ok(FinancialKpis {
        gross_revenue,
        net_revenue,
        expenses,
        profit: net_revenue - expenses,
        trend: percent_change(gross_revenue, last_gross),
        ticket_medio: average_ticket(gross_revenue, sales),
    })
}

pub async fn dashboard(state: &AppState) -> AppResult<ApiResponse<DashboardKpis>> {
    let now = Utc::now();
    let current = current_month(now);
    let previous = previous_month(now);
    let pool = &state.pool;

    let orders = order_kpis(pool, current, previous).await?;
    let leads = lead_kpis(pool, current).await?;
    let customers = customer_kpis(pool, current).await?;
    let financial = financial_kpis(pool, current, previous).await?;

    let descriptions = sqlx::query_scalar::<_, Option<String>>(
        "SELECT problem_description FROM service_orders WHERE created_at >= $1 AND created_at <= $2",
    )
    .bind(current.start)
    .bind(current.end)
    .fetch_all(pool)
    .await?;
    let top_problems = top_problems(descriptions.iter().map(|d| d.as_deref()));

    let recent_orders = ServiceOrders::find()
        .find_also_related(Customers)
        .order_by_desc(OrderCol::CreatedAt)
        .limit(RECENT_ORDERS)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(order, customer)| {
            Ok(RecentOrder {
                id: order.id,
                order_number: order.order_number,
                status: order.status.parse()?,
                device_brand: order.device_brand,
                device_model: order.device_model,
                customer_name: customer.map(|c| c.name),
                created_at: order.created_at.with_timezone(&Utc),
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    tracing::debug!(
        orders = orders.total,
        leads = leads.total,
        gross_revenue = %financial.gross_revenue,
        "dashboard computed"
    );

    Ok(ApiResponse::success(
        "Dashboard",
        DashboardKpis {
            orders,
            leads,
            customers,
            financial,
            top_problems,
            recent_orders,
        },
        None,
    ))
}
