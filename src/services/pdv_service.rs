use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use uuid::Uuid;

use crate::{
    domain::{
        kinds::TransactionType,
        sale::{SaleTotals, check_amount, ledger_description, line_total},
    },
    dto::pdv::{CreateSaleRequest, PaymentMethodList, SaleItemInput, SaleReceipt},
    entity::{
        cash_transactions::ActiveModel as CashActive,
        payment_methods::{Column as MethodCol, Entity as PaymentMethods},
        products::{Column as ProdCol, Entity as Products},
        sale_items::ActiveModel as SaleItemActive,
        sales::ActiveModel as SaleActive,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{PaymentMethod, Sale, SaleItem},
    response::{ApiResponse, Meta},
    services::customer_service::non_blank,
    state::AppState,
};

fn validate_items(items: &[SaleItemInput], discount: Decimal) -> AppResult<()> {
    if items.is_empty() {
        return Err(AppError::BadRequest("Adicione pelo menos um item à venda".into()));
    }
    for item in items {
        if item.description.trim().is_empty() {
            return Err(AppError::BadRequest("Item sem descrição".into()));
        }
        if item.quantity <= 0 {
            return Err(AppError::BadRequest(format!(
                "Quantidade inválida para {}",
                item.description
            )));
        }
        if item.unit_price < Decimal::ZERO {
            return Err(AppError::BadRequest(format!(
                "Preço inválido para {}",
                item.description
            )));
        }
        check_amount(item.unit_price)?;
    }
    if discount < Decimal::ZERO {
        return Err(AppError::BadRequest("Desconto não pode ser negativo".into()));
    }
    check_amount(discount)?;
    Ok(())
}

/// Record a sale, its items, the stock decrements and the cash income in one
/// transaction.
pub async fn create_sale(
    state: &AppState,
    user: &AuthUser,
    payload: CreateSaleRequest,
) -> AppResult<ApiResponse<SaleReceipt>> {
    let discount = payload.discount.unwrap_or(Decimal::ZERO);
    validate_items(&payload.items, discount)?;

    let txn = state.orm.begin().await?;

    let method = PaymentMethods::find_by_id(payload.payment_method_id)
        .one(&txn)
        .await?;
    if method.is_none() {
        tracing::warn!(
            payment_method_id = %payload.payment_method_id,
            "payment method not found, applying no fee"
        );
    }
    let fee_percentage = method
        .as_ref()
        .map(|m| m.fee_percentage)
        .unwrap_or(Decimal::ZERO);

    let totals = SaleTotals::compute(
        payload.items.iter().map(|i| (i.quantity, i.unit_price)),
        discount,
        fee_percentage,
    )?;

    let sale = SaleActive {
        id: Set(Uuid::new_v4()),
        sale_number: NotSet,
        customer_id: Set(payload.customer_id),
        service_order_id: Set(payload.service_order_id),
        user_id: Set(user.user_id),
        subtotal: Set(totals.subtotal),
        discount: Set(totals.discount),
        total: Set(totals.total),
        payment_method_id: Set(method.map(|m| m.id)),
        fee_percentage: Set(totals.fee_percentage),
        payment_fee: Set(totals.payment_fee),
        net_total: Set(totals.net_total),
        notes: Set(non_blank(payload.notes)),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let mut items: Vec<SaleItem> = Vec::with_capacity(payload.items.len());
    for input in &payload.items {
        let item = SaleItemActive {
            id: Set(Uuid::new_v4()),
            sale_id: Set(sale.id),
            product_id: Set(input.product_id),
            description: Set(input.description.trim().to_string()),
            quantity: Set(input.quantity),
            unit_price: Set(input.unit_price),
            total_price: Set(line_total(input.quantity, input.unit_price)?),
            created_at: NotSet,
        }
        .insert(&txn)
        .await?;
        items.push(SaleItem::from(item));

        if let Some(product_id) = input.product_id {
            let result = Products::update_many()
                .col_expr(
                    ProdCol::StockQuantity,
                    Expr::col(ProdCol::StockQuantity).sub(input.quantity),
                )
                .col_expr(ProdCol::UpdatedAt, Expr::current_timestamp().into())
                .filter(ProdCol::Id.eq(product_id))
                .filter(ProdCol::StockQuantity.gte(input.quantity))
                .exec(&txn)
                .await?;

            if result.rows_affected == 0 {
                return Err(AppError::BadRequest(format!(
                    "Estoque insuficiente para {}",
                    input.description
                )));
            }
        }
    }

    CashActive {
        id: Set(Uuid::new_v4()),
        kind: Set(TransactionType::Income.as_str().to_string()),
        category_id: Set(None),
        sale_id: Set(Some(sale.id)),
        description: Set(ledger_description(sale.id)),
        amount: Set(totals.net_total),
        user_id: Set(user.user_id),
        notes: Set(None),
        due_date: Set(None),
        is_paid: Set(true),
        paid_at: Set(Some(Utc::now().fixed_offset())),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!(
        sale_id = %sale.id,
        sale_number = sale.sale_number,
        total = %totals.total,
        net_total = %totals.net_total,
        "sale recorded"
    );

    Ok(ApiResponse::success(
        "Venda realizada com sucesso!",
        SaleReceipt {
            sale: Sale::from(sale),
            items,
            totals,
        },
        Some(Meta::empty()),
    ))
}

pub async fn list_payment_methods(state: &AppState) -> AppResult<ApiResponse<PaymentMethodList>> {
    let items = PaymentMethods::find()
        .filter(MethodCol::IsActive.eq(true))
        .order_by_asc(MethodCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(PaymentMethod::from)
        .collect();

    Ok(ApiResponse::success("OK", PaymentMethodList { items }, None))
}
