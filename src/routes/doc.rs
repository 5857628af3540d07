use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    domain::{
        cart::{CartLine, CartProduct, CartSnapshot, SnapshotLine},
        dashboard::ProblemCount,
        kinds::{DeliveryType, ProductCategory, TransactionType, UserRole},
        lead::LeadStatus,
        sale::SaleTotals,
        status::ServiceOrderStatus,
    },
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        customers::{CreateCustomerRequest, CreatedId, CustomerList, CustomerSearchResult},
        dashboard::{CustomerKpis, DashboardKpis, FinancialKpis, LeadKpis, OrderKpis, RecentOrder},
        financial::{
            CashSummary, CreateTransactionRequest, ExpenseCategoryList, MonthlyStatement,
            TransactionList,
        },
        leads::{CreateLeadRequest, LeadList, UpdateLeadStatusRequest},
        orders::{
            AdvanceRequest, CreateServiceOrderRequest, KanbanBoard, KanbanCard, KanbanColumn,
            OrderDetail, OrderList, OrderWithCustomer, ProblemTypeList,
            UpdateServiceOrderRequest, UpdateStatusRequest,
        },
        pdv::{
            CreateSaleRequest, PaymentMethodList, PdvProduct, PdvProductList, SaleItemInput,
            SaleReceipt,
        },
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
        store::CartView,
    },
    models::{
        CashTransaction, Customer, CustomerSummary, EntryChecklist, ExpenseCategory, Lead,
        PaymentMethod, ProblemType, Product, Profile, Sale, SaleItem, ScreenCondition,
        ServiceOrder, ServiceOrderHistory,
    },
    response::{ApiResponse, Meta},
    routes::{
        auth, customers, dashboard, financial, health, leads, orders, pdv, products, store,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        auth::me,
        leads::create_lead,
        leads::list_leads,
        leads::update_lead_status,
        store::list_products,
        store::featured_products,
        store::get_product,
        store::quote_cart,
        customers::list_customers,
        customers::create_customer,
        customers::search_customers,
        orders::list_orders,
        orders::create_order,
        orders::kanban_board,
        orders::get_order,
        orders::update_order,
        orders::update_status,
        orders::advance_order,
        orders::list_problem_types,
        products::list_products,
        products::create_product,
        products::update_product,
        products::toggle_visibility,
        products::low_stock,
        pdv::create_sale,
        pdv::search_products,
        pdv::product_by_barcode,
        pdv::payment_methods,
        financial::monthly_statement,
        financial::create_transaction,
        financial::mark_paid,
        financial::pending_transactions,
        financial::list_categories,
        dashboard::dashboard
    ),
    components(
        schemas(
            ServiceOrderStatus,
            LeadStatus,
            DeliveryType,
            ProductCategory,
            TransactionType,
            UserRole,
            Profile,
            Customer,
            CustomerSummary,
            ScreenCondition,
            EntryChecklist,
            ProblemType,
            ServiceOrder,
            ServiceOrderHistory,
            Lead,
            Product,
            PaymentMethod,
            Sale,
            SaleItem,
            SaleTotals,
            ExpenseCategory,
            CashTransaction,
            LoginRequest,
            LoginResponse,
            RegisterRequest,
            CreateCustomerRequest,
            CreatedId,
            CustomerList,
            CustomerSearchResult,
            CreateServiceOrderRequest,
            UpdateServiceOrderRequest,
            UpdateStatusRequest,
            AdvanceRequest,
            OrderWithCustomer,
            OrderList,
            OrderDetail,
            KanbanCard,
            KanbanColumn,
            KanbanBoard,
            ProblemTypeList,
            CreateLeadRequest,
            UpdateLeadStatusRequest,
            LeadList,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            SaleItemInput,
            CreateSaleRequest,
            SaleReceipt,
            PdvProduct,
            PdvProductList,
            PaymentMethodList,
            CreateTransactionRequest,
            CashSummary,
            MonthlyStatement,
            TransactionList,
            ExpenseCategoryList,
            OrderKpis,
            LeadKpis,
            CustomerKpis,
            FinancialKpis,
            RecentOrder,
            ProblemCount,
            DashboardKpis,
            CartProduct,
            CartLine,
            SnapshotLine,
            CartSnapshot,
            CartView,
            Meta
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Staff authentication"),
        (name = "Leads", description = "Pre-quote requests from the public site"),
        (name = "Store", description = "Public storefront and cart pricing"),
        (name = "Customers", description = "Customer records"),
        (name = "Service Orders", description = "Repair orders and the kanban board"),
        (name = "Products", description = "Product catalogue management"),
        (name = "PDV", description = "Point of sale"),
        (name = "Financial", description = "Cash ledger"),
        (name = "Dashboard", description = "Monthly KPIs"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
