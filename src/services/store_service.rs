use std::collections::HashMap;

use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

use crate::{
    domain::cart::{Cart, CartProduct, CartSnapshot},
    dto::{
        products::ProductList,
        store::{CartView, FeaturedQuery, StoreProductsQuery},
    },
    entity::products::{Column, Entity as Products, Model as ProductModel},
    error::{AppError, AppResult},
    models::Product,
    response::ApiResponse,
    state::AppState,
};

const DEFAULT_FEATURED: u64 = 4;
const MAX_FEATURED: u64 = 24;

/// Products a shopper may see and buy.
fn storefront() -> Condition {
    Condition::all()
        .add(Column::IsActive.eq(true))
        .add(Column::ShowInStore.eq(true))
        .add(Column::StockQuantity.gt(0))
}

fn cart_product(model: ProductModel) -> CartProduct {
    CartProduct {
        id: model.id,
        name: model.name,
        sale_price: model.sale_price,
        stock_quantity: model.stock_quantity,
        image_url: model.image_url,
    }
}

fn to_list(models: Vec<ProductModel>) -> AppResult<ProductList> {
    let items = models
        .into_iter()
        .map(Product::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ProductList { items })
}

pub async fn list_products(
    state: &AppState,
    query: StoreProductsQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let mut condition = storefront();
    if let Some(category) = query.category {
        condition = condition.add(Column::Category.eq(category.as_str()));
    }

    let rows = Products::find()
        .filter(condition)
        .order_by_asc(Column::Name)
        .all(&state.orm)
        .await?;

    Ok(ApiResponse::success("Produtos", to_list(rows)?, None))
}

pub async fn featured_products(
    state: &AppState,
    query: FeaturedQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let limit = query.limit.unwrap_or(DEFAULT_FEATURED).clamp(1, MAX_FEATURED);
    let rows = Products::find()
        .filter(storefront())
        .order_by_desc(Column::CreatedAt)
        .limit(limit)
        .all(&state.orm)
        .await?;

    Ok(ApiResponse::success("Destaques", to_list(rows)?, None))
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Product>> {
    let product = Products::find_by_id(id)
        .filter(Column::IsActive.eq(true))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(ApiResponse::success("Produto", Product::try_from(product)?, None))
}

/// Price a client-held cart against the current catalogue.
pub async fn quote_cart(
    state: &AppState,
    snapshot: CartSnapshot,
) -> AppResult<ApiResponse<CartView>> {
    let ids: Vec<Uuid> = snapshot.items.iter().map(|l| l.product_id).collect();

    let catalogue: HashMap<Uuid, CartProduct> = if ids.is_empty() {
        HashMap::new()
    } else {
        Products::find()
            .filter(storefront().add(Column::Id.is_in(ids)))
            .all(&state.orm)
            .await?
            .into_iter()
            .map(|p| (p.id, cart_product(p)))
            .collect()
    };

    let cart = Cart::hydrate(&snapshot, |id| catalogue.get(&id).cloned());
    let dropped = snapshot.items.len().saturating_sub(cart.lines().len());
    if dropped > 0 {
        tracing::debug!(dropped, "cart lines dropped while quoting");
    }

    Ok(ApiResponse::success(
        "Carrinho",
        CartView {
            total: cart.total(),
            item_count: cart.item_count(),
            snapshot: cart.snapshot(),
            items: cart.lines().to_vec(),
        },
        None,
    ))
}
