//! Point-of-sale arithmetic.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use utoipa::ToSchema;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Decimal places a stored money column keeps.
pub const MONEY_SCALE: u32 = 2;

/// Largest magnitude a `NUMERIC(12, 2)` column holds.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Valores devem ter no máximo 2 casas decimais")]
    TooPrecise,
    #[error("Valor excede o limite permitido")]
    OutOfRange,
}

/// Check that `value` fits a stored money column without rounding.
pub fn check_amount(value: Decimal) -> Result<Decimal, AmountError> {
    if value.normalize().scale() > MONEY_SCALE {
        return Err(AmountError::TooPrecise);
    }
    if value.abs() > MAX_AMOUNT {
        return Err(AmountError::OutOfRange);
    }
    Ok(value)
}

/// Price of one sale line.
pub fn line_total(quantity: i32, unit_price: Decimal) -> Result<Decimal, AmountError> {
    Decimal::from(quantity)
        .checked_mul(check_amount(unit_price)?)
        .ok_or(AmountError::OutOfRange)
        .and_then(check_amount)
}

/// Money fields stored on a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct SaleTotals {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub fee_percentage: Decimal,
    pub payment_fee: Decimal,
    pub net_total: Decimal,
}

impl SaleTotals {
    /// Totals for `(quantity, unit_price)` lines.
    ///
    /// Every amount must fit a stored money column. The discount is not
    /// clamped, so a discount above the subtotal yields a negative total. The
    /// fee is rounded to cents before it is subtracted so
    /// `net_total == total - payment_fee` survives storage.
    pub fn compute<I>(
        lines: I,
        discount: Decimal,
        fee_percentage: Decimal,
    ) -> Result<Self, AmountError>
    where
        I: IntoIterator<Item = (i32, Decimal)>,
    {
        let subtotal = lines
            .into_iter()
            .try_fold(Decimal::ZERO, |acc, (quantity, unit_price)| {
                let line = line_total(quantity, unit_price)?;
                acc.checked_add(line).ok_or(AmountError::OutOfRange)
            })
            .and_then(check_amount)?;
        let discount = check_amount(discount)?;
        let total = check_amount(subtotal - discount)?;
        let payment_fee = total
            .checked_mul(fee_percentage)
            .map(|fee| fee / HUNDRED)
            .ok_or(AmountError::OutOfRange)?
            .round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
        let net_total = check_amount(total - payment_fee)?;

        Ok(Self {
            subtotal,
            discount,
            total,
            fee_percentage,
            payment_fee,
            net_total,
        })
    }
}

/// Description of the income entry a sale posts to the cash ledger.
pub fn ledger_description(sale_id: uuid::Uuid) -> String {
    let id = sale_id.to_string();
    format!("Venda #{}", &id[..8])
}
