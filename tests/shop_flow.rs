use repair_shop_api::{
    db::{create_pool, run_migrations},
    domain::{
        kinds::{DeliveryType, TransactionType, UserRole},
        lead::LeadStatus,
        status::ServiceOrderStatus,
    },
    dto::{
        auth::LoginRequest,
        customers::CreateCustomerRequest,
        financial::CreateTransactionRequest,
        leads::CreateLeadRequest,
        orders::{AdvanceRequest, CreateServiceOrderRequest, UpdateStatusRequest},
        pdv::{CreateSaleRequest, SaleItemInput},
    },
    entity::{
        leads::Entity as Leads,
        payment_methods::ActiveModel as PaymentMethodActive,
        products::{ActiveModel as ProductActive, Entity as Products},
        profiles::ActiveModel as ProfileActive,
        sales::Entity as Sales,
        service_orders::Entity as ServiceOrders,
    },
    error::AppError,
    middleware::auth::{AuthUser, decode_token},
    services::{
        auth_service, customer_service, dashboard_service, financial_service, lead_service,
        pdv_service, service_order_service,
    },
    state::AppState,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};
use uuid::Uuid;

const JWT_SECRET: &str = "test-secret";

// Integration flow: lead -> service order through the board -> PDV sale -> ledger -> dashboard.
#[tokio::test]
async fn repair_and_sale_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;
    let admin = create_admin(&state, "admin@example.com", "segredo123").await?;

    // Sign in
    let login = auth_service::login(
        &state,
        LoginRequest {
            email: "ADMIN@example.com".into(),
            password: "segredo123".into(),
        },
    )
    .await?;
    let token = login.data.unwrap().token;
    let decoded = decode_token(token.trim_start_matches("Bearer "), JWT_SECRET)?;
    assert_eq!(decoded.user_id, admin.user_id);
    assert_eq!(decoded.role, UserRole::Admin);

    let bad_login = auth_service::login(
        &state,
        LoginRequest {
            email: "admin@example.com".into(),
            password: "errada".into(),
        },
    )
    .await;
    assert!(matches!(bad_login, Err(AppError::BadRequest(_))));

    // Public lead and the customer it becomes
    let lead_id = lead_service::create_lead(
        &state,
        CreateLeadRequest {
            customer_name: "Maria".into(),
            customer_phone: "11999990000".into(),
            device_brand: "Samsung".into(),
            device_model: "A32".into(),
            device_password: None,
            problem_type: "Tela".into(),
            problem_description: Some("Tela trincada".into()),
            delivery_type: DeliveryType::Store,
            delivery_address: Some("  ".into()),
        },
    )
    .await?
    .data
    .unwrap()
    .id;

    let customer_id = customer_service::create_customer(
        &state,
        CreateCustomerRequest {
            name: "Maria".into(),
            phone: "11999990000".into(),
            email: Some(String::new()),
            address: None,
            notes: None,
        },
    )
    .await?
    .data
    .unwrap()
    .id;

    let found = customer_service::search_customers(&state, Some("9999")).await?;
    assert_eq!(found.data.unwrap().items.len(), 1);

    // Order opened from the lead
    let order = service_order_service::create_order(
        &state,
        &admin,
        CreateServiceOrderRequest {
            customer_id,
            device_brand: "Samsung".into(),
            device_model: "A32".into(),
            device_password: None,
            device_imei: None,
            device_color: None,
            problem_description: "Tela trincada".into(),
            problem_type_id: None,
            delivery_type: DeliveryType::Store,
            delivery_address: None,
            estimated_price: Some(dec!(350.00)),
            entry_checklist: None,
            lead_id: Some(lead_id),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(order.status, ServiceOrderStatus::AwaitingDevice);
    assert_eq!(order.order_number, 1);

    let lead = Leads::find_by_id(lead_id).one(&state.orm).await?.unwrap();
    assert_eq!(lead.status, LeadStatus::Converted.as_str());
    assert_eq!(lead.converted_order_id, Some(order.id));
    assert_eq!(lead.delivery_address, None);

    // A converted lead keeps its first order
    let reconverted = service_order_service::create_order(
        &state,
        &admin,
        CreateServiceOrderRequest {
            customer_id,
            device_brand: "Samsung".into(),
            device_model: "A32".into(),
            device_password: None,
            device_imei: None,
            device_color: None,
            problem_description: "Tela trincada".into(),
            problem_type_id: None,
            delivery_type: DeliveryType::Store,
            delivery_address: None,
            estimated_price: None,
            entry_checklist: None,
            lead_id: Some(lead_id),
        },
    )
    .await;
    assert!(matches!(reconverted, Err(AppError::BadRequest(_))));
    let lead = Leads::find_by_id(lead_id).one(&state.orm).await?.unwrap();
    assert_eq!(lead.converted_order_id, Some(order.id));
    assert_eq!(ServiceOrders::find().count(&state.orm).await?, 1);

    // Unknown customer leaves nothing behind
    let orphan = service_order_service::create_order(
        &state,
        &admin,
        CreateServiceOrderRequest {
            customer_id: Uuid::new_v4(),
            device_brand: "Apple".into(),
            device_model: "iPhone 11".into(),
            device_password: None,
            device_imei: None,
            device_color: None,
            problem_description: "Bateria".into(),
            problem_type_id: None,
            delivery_type: DeliveryType::Store,
            delivery_address: None,
            estimated_price: None,
            entry_checklist: None,
            lead_id: None,
        },
    )
    .await;
    assert!(matches!(orphan, Err(AppError::BadRequest(_))));

    // Walk the board
    let analysed = service_order_service::update_status(
        &state,
        &admin,
        order.id,
        UpdateStatusRequest {
            status: ServiceOrderStatus::InAnalysis,
            notes: Some("Aparelho recebido".into()),
        },
    )
    .await?
    .data
    .unwrap();
    assert!(analysed.received_at.is_some());

    for _ in 0..4 {
        service_order_service::advance_order(&state, &admin, order.id, AdvanceRequest::default())
            .await?;
    }

    let detail = service_order_service::get_order(&state, order.id).await?.data.unwrap();
    assert_eq!(detail.order.status, ServiceOrderStatus::Delivered);
    assert!(detail.order.approved_at.is_some());
    assert!(detail.order.completed_at.is_some());
    assert!(detail.order.delivered_at.is_some());
    assert_eq!(detail.customer.map(|c| c.name), Some("Maria".to_string()));
    assert_eq!(detail.history.len(), 6);
    assert_eq!(detail.history[0].previous_status, None);
    assert_eq!(detail.history[1].notes.as_deref(), Some("Aparelho recebido"));
    assert_eq!(
        detail.history[1].previous_status,
        Some(ServiceOrderStatus::AwaitingDevice)
    );
    assert_eq!(detail.history[1].new_status, ServiceOrderStatus::InAnalysis);
    assert_eq!(
        detail.history[5].previous_status,
        Some(ServiceOrderStatus::Ready)
    );
    assert_eq!(detail.history[5].new_status, ServiceOrderStatus::Delivered);

    let stuck =
        service_order_service::advance_order(&state, &admin, order.id, AdvanceRequest::default())
            .await;
    assert!(matches!(stuck, Err(AppError::BadRequest(_))));

    let board = service_order_service::kanban_board(&state).await?.data.unwrap();
    assert_eq!(board.columns.len(), 6);
    assert_eq!(board.columns[5].cards.len(), 1);
    assert_eq!(board.columns[5].cards[0].next_status, None);

    // PDV sale with a card fee
    let product = ProductActive {
        id: Set(Uuid::new_v4()),
        barcode: Set(Some("7890000000001".into())),
        name: Set("Película 3D".into()),
        description: Set(None),
        category: Set("accessory".into()),
        purchase_price: Set(dec!(5.00)),
        sale_price: Set(dec!(30.00)),
        stock_quantity: Set(3),
        min_stock: Set(2),
        is_active: Set(true),
        image_url: Set(None),
        show_in_store: Set(true),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    let card = PaymentMethodActive {
        id: Set(Uuid::new_v4()),
        name: Set("Cartão de Crédito".into()),
        fee_percentage: Set(dec!(5.00)),
        is_active: Set(true),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    let receipt = pdv_service::create_sale(
        &state,
        &admin,
        CreateSaleRequest {
            items: vec![
                SaleItemInput {
                    product_id: Some(product.id),
                    description: product.name.clone(),
                    quantity: 2,
                    unit_price: dec!(30.00),
                },
                SaleItemInput {
                    product_id: None,
                    description: "Mão de obra".into(),
                    quantity: 1,
                    unit_price: dec!(40.00),
                },
            ],
            payment_method_id: card.id,
            discount: Some(dec!(10.00)),
            customer_id: Some(customer_id),
            service_order_id: Some(order.id),
            notes: None,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(receipt.totals.subtotal, dec!(100.00));
    assert_eq!(receipt.totals.total, dec!(90.00));
    assert_eq!(receipt.totals.payment_fee, dec!(4.50));
    assert_eq!(receipt.sale.net_total, dec!(85.50));
    assert_eq!(receipt.items.len(), 2);

    let stock = Products::find_by_id(product.id).one(&state.orm).await?.unwrap();
    assert_eq!(stock.stock_quantity, 1);

    // Not enough stock: nothing is written
    let oversold = pdv_service::create_sale(
        &state,
        &admin,
        CreateSaleRequest {
            items: vec![SaleItemInput {
                product_id: Some(product.id),
                description: product.name.clone(),
                quantity: 2,
                unit_price: dec!(30.00),
            }],
            payment_method_id: Uuid::new_v4(),
            discount: None,
            customer_id: None,
            service_order_id: None,
            notes: None,
        },
    )
    .await;
    assert!(matches!(oversold, Err(AppError::BadRequest(_))));

    // Sub-cent prices never reach the database
    let fractional = pdv_service::create_sale(
        &state,
        &admin,
        CreateSaleRequest {
            items: vec![SaleItemInput {
                product_id: None,
                description: "Parafuso".into(),
                quantity: 3,
                unit_price: dec!(0.333),
            }],
            payment_method_id: card.id,
            discount: None,
            customer_id: None,
            service_order_id: None,
            notes: None,
        },
    )
    .await;
    assert!(matches!(fractional, Err(AppError::BadRequest(_))));
    assert_eq!(Sales::find().count(&state.orm).await?, 1);
    let stock = Products::find_by_id(product.id).one(&state.orm).await?.unwrap();
    assert_eq!(stock.stock_quantity, 1);

    // Ledger
    let bill = financial_service::create_transaction(
        &state,
        &admin,
        CreateTransactionRequest {
            kind: TransactionType::Expense,
            category_id: None,
            description: "Aluguel".into(),
            amount: dec!(20.00),
            notes: None,
            due_date: None,
            is_paid: Some(false),
        },
    )
    .await?
    .data
    .unwrap();
    assert!(!bill.is_paid);

    let fractional_bill = financial_service::create_transaction(
        &state,
        &admin,
        CreateTransactionRequest {
            kind: TransactionType::Expense,
            category_id: None,
            description: "Energia".into(),
            amount: dec!(10.005),
            notes: None,
            due_date: None,
            is_paid: Some(true),
        },
    )
    .await;
    assert!(matches!(fractional_bill, Err(AppError::BadRequest(_))));
    assert!(bill.paid_at.is_none());

    let pending = financial_service::pending_transactions(&state).await?.data.unwrap();
    assert_eq!(pending.items.len(), 1);

    let paid = financial_service::mark_paid(&state, bill.id).await?.data.unwrap();
    assert!(paid.is_paid);
    assert!(paid.paid_at.is_some());

    let statement = financial_service::monthly_statement(&state).await?.data.unwrap();
    assert_eq!(statement.items.len(), 2);
    assert_eq!(statement.summary.income, dec!(85.50));
    assert_eq!(statement.summary.expense, dec!(20.00));
    assert_eq!(statement.summary.balance, dec!(65.50));

    // Dashboard
    let kpis = dashboard_service::dashboard(&state).await?.data.unwrap();
    assert_eq!(kpis.orders.total, 1);
    assert_eq!(kpis.orders.completed, 1);
    assert_eq!(kpis.orders.pending, 0);
    assert_eq!(kpis.orders.trend, Decimal::ZERO);
    assert_eq!(kpis.leads.total, 1);
    assert_eq!(kpis.leads.converted, 1);
    assert_eq!(kpis.leads.conversion_rate, dec!(100));
    assert_eq!(kpis.customers.new, 1);
    assert_eq!(kpis.financial.gross_revenue, dec!(90.00));
    assert_eq!(kpis.financial.net_revenue, dec!(85.50));
    assert_eq!(kpis.financial.expenses, dec!(20.00));
    assert_eq!(kpis.financial.profit, dec!(65.50));
    assert_eq!(kpis.financial.ticket_medio, dec!(90.00));
    assert_eq!(kpis.top_problems[0].name, "Troca de Tela");
    assert_eq!(kpis.recent_orders.len(), 1);

    // Direct jump on the board skips the intermediate stages
    let walk_in = service_order_service::create_order(
        &state,
        &admin,
        CreateServiceOrderRequest {
            customer_id,
            device_brand: "Motorola".into(),
            device_model: "G52".into(),
            device_password: None,
            device_imei: None,
            device_color: None,
            problem_description: "Conector de carga".into(),
            problem_type_id: None,
            delivery_type: DeliveryType::Store,
            delivery_address: None,
            estimated_price: None,
            entry_checklist: None,
            lead_id: None,
        },
    )
    .await?
    .data
    .unwrap();
    let jumped = service_order_service::update_status(
        &state,
        &admin,
        walk_in.id,
        UpdateStatusRequest {
            status: ServiceOrderStatus::InRepair,
            notes: None,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(jumped.status, ServiceOrderStatus::InRepair);
    assert!(jumped.received_at.is_none());

    let detail = service_order_service::get_order(&state, walk_in.id).await?.data.unwrap();
    assert_eq!(detail.history.len(), 2);
    let jump = &detail.history[1];
    assert_eq!(jump.previous_status, Some(ServiceOrderStatus::AwaitingDevice));
    assert_eq!(jump.new_status, ServiceOrderStatus::InRepair);
    assert_eq!(jump.user_id, Some(admin.user_id));

    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    run_migrations(&pool).await?;

    // Clean tables between runs
    sqlx::query(
        "TRUNCATE TABLE cash_transactions, expense_categories, sale_items, sales, payment_methods, \
         products, leads, service_order_history, service_orders, problem_types, customers, profiles \
         RESTART IDENTITY CASCADE",
    )
    .execute(&pool)
    .await?;

    Ok(AppState::new(pool, JWT_SECRET))
}

async fn create_admin(state: &AppState, email: &str, password: &str) -> anyhow::Result<AuthUser> {
    let profile = ProfileActive {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        password_hash: Set(auth_service::hash_password(password)?),
        full_name: Set("Administrador".into()),
        role: Set(UserRole::Admin.as_str().into()),
        phone: Set(None),
        commission_rate: Set(Decimal::ZERO),
        is_active: Set(true),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(AuthUser {
        user_id: profile.id,
        role: UserRole::Admin,
    })
}
