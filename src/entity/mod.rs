pub mod cash_transactions;
pub mod customers;
pub mod expense_categories;
pub mod leads;
pub mod payment_methods;
pub mod problem_types;
pub mod products;
pub mod profiles;
pub mod sale_items;
pub mod sales;
pub mod service_order_history;
pub mod service_orders;

pub use cash_transactions::Entity as CashTransactions;
pub use customers::Entity as Customers;
pub use expense_categories::Entity as ExpenseCategories;
pub use leads::Entity as Leads;
pub use payment_methods::Entity as PaymentMethods;
pub use problem_types::Entity as ProblemTypes;
pub use products::Entity as Products;
pub use profiles::Entity as Profiles;
pub use sale_items::Entity as SaleItems;
pub use sales::Entity as Sales;
pub use service_order_history::Entity as ServiceOrderHistory;
pub use service_orders::Entity as ServiceOrders;
