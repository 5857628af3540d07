use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    dto::{
        pdv::{PdvProduct, PdvProductList},
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
    },
    entity::products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Product,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    services::customer_service::non_blank,
    state::AppState,
};

const PDV_SEARCH_LIMIT: u64 = 10;

fn to_products(models: Vec<ProductModel>) -> AppResult<Vec<Product>> {
    models
        .into_iter()
        .map(Product::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(AppError::from)
}

fn pdv_product(model: ProductModel) -> PdvProduct {
    PdvProduct {
        id: model.id,
        name: model.name,
        barcode: model.barcode,
        sale_price: model.sale_price,
        stock_quantity: model.stock_quantity,
    }
}

async fn ensure_unique(
    state: &AppState,
    name: Option<&str>,
    barcode: Option<&str>,
    except: Option<Uuid>,
) -> AppResult<()> {
    let mut clash = Condition::any();
    if let Some(name) = name {
        clash = clash.add(Column::Name.eq(name));
    }
    if let Some(barcode) = barcode {
        clash = clash.add(Column::Barcode.eq(barcode));
    }
    if clash.is_empty() {
        return Ok(());
    }

    let mut condition = Condition::all().add(clash);
    if let Some(id) = except {
        condition = condition.add(Column::Id.ne(id));
    }

    if Products::find().filter(condition).one(&state.orm).await?.is_some() {
        return Err(AppError::BadRequest(
            "Já existe um produto com esse nome ou código de barras".into(),
        ));
    }
    Ok(())
}

pub async fn list_products(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Products::find().order_by_asc(Column::Name);
    let total = finder.clone().count(&state.orm).await? as i64;

    let rows = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    Ok(ApiResponse::success(
        "Produtos",
        ProductList {
            items: to_products(rows)?,
        },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn low_stock(state: &AppState) -> AppResult<ApiResponse<ProductList>> {
    let rows = Products::find()
        .filter(Column::IsActive.eq(true))
        .filter(Expr::col(Column::StockQuantity).lte(Expr::col(Column::MinStock)))
        .order_by_asc(Column::StockQuantity)
        .all(&state.orm)
        .await?;

    Ok(ApiResponse::success(
        "Produtos com estoque baixo",
        ProductList {
            items: to_products(rows)?,
        },
        None,
    ))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("Informe o nome do produto".into()));
    }
    if payload.sale_price < Decimal::ZERO {
        return Err(AppError::BadRequest("Preço de venda inválido".into()));
    }
    if payload.stock_quantity.is_some_and(|q| q < 0) {
        return Err(AppError::BadRequest("Estoque não pode ser negativo".into()));
    }

    let barcode = non_blank(payload.barcode);
    ensure_unique(state, Some(&name), barcode.as_deref(), None).await?;

    let product = ActiveModel {
        id: Set(Uuid::new_v4()),
        barcode: Set(barcode),
        name: Set(name),
        description: Set(non_blank(payload.description)),
        category: Set(payload.category.as_str().to_string()),
        purchase_price: Set(payload.purchase_price.unwrap_or(Decimal::ZERO)),
        sale_price: Set(payload.sale_price),
        stock_quantity: Set(payload.stock_quantity.unwrap_or(0)),
        min_stock: Set(payload.min_stock.unwrap_or(0)),
        is_active: Set(true),
        image_url: Set(non_blank(payload.image_url)),
        show_in_store: Set(payload.show_in_store),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(product_id = %product.id, "product created");

    Ok(ApiResponse::success(
        "Produto cadastrado!",
        Product::try_from(product)?,
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let existing = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let name = payload.name.map(|n| n.trim().to_string());
    if name.as_deref().is_some_and(str::is_empty) {
        return Err(AppError::BadRequest("Informe o nome do produto".into()));
    }
    if payload.sale_price.is_some_and(|p| p < Decimal::ZERO) {
        return Err(AppError::BadRequest("Preço de venda inválido".into()));
    }
    if payload.stock_quantity.is_some_and(|q| q < 0) {
        return Err(AppError::BadRequest("Estoque não pode ser negativo".into()));
    }
    let barcode = payload.barcode.map(|b| non_blank(Some(b)));
    ensure_unique(
        state,
        name.as_deref(),
        barcode.as_ref().and_then(|b| b.as_deref()),
        Some(id),
    )
    .await?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(non_blank(Some(description)));
    }
    if let Some(barcode) = barcode {
        active.barcode = Set(barcode);
    }
    if let Some(category) = payload.category {
        active.category = Set(category.as_str().to_string());
    }
    if let Some(price) = payload.purchase_price {
        active.purchase_price = Set(price);
    }
    if let Some(price) = payload.sale_price {
        active.sale_price = Set(price);
    }
    if let Some(stock) = payload.stock_quantity {
        active.stock_quantity = Set(stock);
    }
    if let Some(min_stock) = payload.min_stock {
        active.min_stock = Set(min_stock);
    }
    if let Some(image_url) = payload.image_url {
        active.image_url = Set(non_blank(Some(image_url)));
    }
    if let Some(show) = payload.show_in_store {
        active.show_in_store = Set(show);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    active.updated_at = Set(Utc::now().fixed_offset());

    let product = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Produto atualizado!",
        Product::try_from(product)?,
        Some(Meta::empty()),
    ))
}

/// Flip whether the product is listed on the storefront.
pub async fn toggle_store_visibility(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let existing = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let show = !existing.show_in_store;
    let mut active: ActiveModel = existing.into();
    active.show_in_store = Set(show);
    active.updated_at = Set(Utc::now().fixed_offset());
    let product = active.update(&state.orm).await?;

    tracing::info!(product_id = %id, show_in_store = show, "store visibility changed");

    Ok(ApiResponse::success(
        if show {
            "Produto visível na loja"
        } else {
            "Produto oculto da loja"
        },
        Product::try_from(product)?,
        Some(Meta::empty()),
    ))
}

pub async fn pdv_search(
    state: &AppState,
    term: Option<&str>,
) -> AppResult<ApiResponse<PdvProductList>> {
    let Some(term) = term else {
        return Ok(ApiResponse::success("OK", PdvProductList { items: Vec::new() }, None));
    };

    let pattern = format!("%{}%", term);
    let items = Products::find()
        .filter(Column::IsActive.eq(true))
        .filter(
            Condition::any()
                .add(Expr::col(Column::Name).ilike(pattern.clone()))
                .add(Expr::col(Column::Barcode).ilike(pattern)),
        )
        .order_by_asc(Column::Name)
        .limit(PDV_SEARCH_LIMIT)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(pdv_product)
        .collect();

    Ok(ApiResponse::success("OK", PdvProductList { items }, None))
}

pub async fn pdv_by_barcode(
    state: &AppState,
    barcode: &str,
) -> AppResult<ApiResponse<PdvProduct>> {
    let product = Products::find()
        .filter(Column::IsActive.eq(true))
        .filter(Column::Barcode.eq(barcode.trim()))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(ApiResponse::success("OK", pdv_product(product), None))
}
