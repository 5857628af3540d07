use repair_shop_api::{
    config::AppConfig,
    db::{DbPool, create_pool, run_migrations},
    domain::kinds::{ProductCategory, UserRole},
    services::auth_service::hash_password,
};
use rust_decimal::Decimal;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool).await?;

    let admin_email = std::env::var("SEED_ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".into());
    let admin_password = std::env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".into());
    let admin_id = ensure_profile(&pool, &admin_email, &admin_password, "Administrador", UserRole::Admin).await?;

    seed_payment_methods(&pool).await?;
    seed_expense_categories(&pool).await?;
    seed_problem_types(&pool).await?;
    seed_products(&pool).await?;

    println!("Seed completed. Admin ID: {admin_id}");
    Ok(())
}

async fn ensure_profile(
    pool: &DbPool,
    email: &str,
    password: &str,
    full_name: &str,
    role: UserRole,
) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO profiles (id, email, password_hash, full_name, role)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .bind(full_name)
    .bind(role.as_str())
    .fetch_one(pool)
    .await?;

    println!("Ensured profile {email} (role={role})");
    Ok(id)
}

/// Card fees are percentages of the sale total.
async fn seed_payment_methods(pool: &DbPool) -> anyhow::Result<()> {
    let methods = [
        ("Dinheiro", Decimal::ZERO),
        ("PIX", Decimal::ZERO),
        ("Cartão de Débito", Decimal::new(199, 2)),
        ("Cartão de Crédito", Decimal::new(499, 2)),
    ];

    for (name, fee) in methods {
        sqlx::query(
            r#"
            INSERT INTO payment_methods (id, name, fee_percentage)
            VALUES ($1, $2, $3)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(fee)
        .execute(pool)
        .await?;
    }

    println!("Seeded payment methods");
    Ok(())
}

async fn seed_expense_categories(pool: &DbPool) -> anyhow::Result<()> {
    let categories = [
        ("Aluguel", "#ef4444"),
        ("Fornecedores", "#f59e0b"),
        ("Salários", "#3b82f6"),
        ("Contas de Consumo", "#10b981"),
        ("Outros", "#6b7280"),
    ];

    for (name, color) in categories {
        sqlx::query(
            r#"
            INSERT INTO expense_categories (id, name, color)
            VALUES ($1, $2, $3)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(color)
        .execute(pool)
        .await?;
    }

    println!("Seeded expense categories");
    Ok(())
}

async fn seed_problem_types(pool: &DbPool) -> anyhow::Result<()> {
    let problems = [
        ("Troca de Tela", "Display quebrado ou sem imagem", Decimal::new(35000, 2)),
        ("Troca de Bateria", "Bateria viciada ou estufada", Decimal::new(18000, 2)),
        ("Conector de Carga", "Aparelho não carrega", Decimal::new(12000, 2)),
        ("Software", "Formatação, atualização ou conta bloqueada", Decimal::new(8000, 2)),
        ("Outros", "Diagnóstico necessário", Decimal::ZERO),
    ];

    for (name, description, price) in problems {
        sqlx::query(
            r#"
            INSERT INTO problem_types (id, name, description, estimated_price)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(description)
        .bind(price)
        .execute(pool)
        .await?;
    }

    println!("Seeded problem types");
    Ok(())
}

async fn seed_products(pool: &DbPool) -> anyhow::Result<()> {
    let products = [
        ("Película de Vidro 3D", ProductCategory::Accessory, Decimal::new(500, 2), Decimal::new(3000, 2), 40, true),
        ("Capinha Anti-impacto", ProductCategory::Accessory, Decimal::new(1200, 2), Decimal::new(4990, 2), 25, true),
        ("Carregador Turbo USB-C", ProductCategory::Accessory, Decimal::new(2500, 2), Decimal::new(8990, 2), 12, true),
        ("Bateria iPhone 11", ProductCategory::Part, Decimal::new(9000, 2), Decimal::new(18000, 2), 4, false),
        ("Conector de Carga Samsung A32", ProductCategory::Part, Decimal::new(1500, 2), Decimal::new(6000, 2), 6, false),
    ];

    for (name, category, purchase_price, sale_price, stock, show_in_store) in products {
        sqlx::query(
            r#"
            INSERT INTO products
                (id, name, category, purchase_price, sale_price, stock_quantity, min_stock, show_in_store)
            VALUES ($1, $2, $3, $4, $5, $6, 3, $7)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(category.as_str())
        .bind(purchase_price)
        .bind(sale_price)
        .bind(stock)
        .bind(show_in_store)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}
