use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    domain::kinds::TransactionType,
    models::{CashTransaction, ExpenseCategory},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTransactionRequest {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category_id: Option<Uuid>,
    pub description: String,
    pub amount: Decimal,
    pub notes: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub is_paid: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct CashSummary {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MonthlyStatement {
    pub items: Vec<CashTransaction>,
    pub summary: CashSummary,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionList {
    pub items: Vec<CashTransaction>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExpenseCategoryList {
    pub items: Vec<ExpenseCategory>,
}

impl CashSummary {
    /// Totals inflows (`income`, `deposit`) against outflows (`expense`,
    /// `withdrawal`).
    pub fn tally<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (TransactionType, Decimal)>,
    {
        let mut summary = CashSummary::default();
        for (kind, amount) in entries {
            if kind.is_inflow() {
                summary.income += amount;
            } else {
                summary.expense += amount;
            }
        }
        summary.balance = summary.income - summary.expense;
        summary
    }
}
