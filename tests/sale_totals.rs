use repair_shop_api::domain::sale::{
    AmountError, MAX_AMOUNT, SaleTotals, check_amount, ledger_description, line_total,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

#[test]
fn totals_apply_discount_then_card_fee() {
    // two items: 2 x 50.00 and 1 x 30.00, discount 10.00, fee 3.5%
    let totals = SaleTotals::compute(
        [(2, dec!(50.00)), (1, dec!(30.00))],
        dec!(10.00),
        dec!(3.5),
    )
    .expect("totals");

    assert_eq!(totals.subtotal, dec!(130.00));
    assert_eq!(totals.total, dec!(120.00));
    assert_eq!(totals.payment_fee, dec!(4.20));
    assert_eq!(totals.net_total, dec!(115.80));
    assert_eq!(totals.fee_percentage, dec!(3.5));
}

#[test]
fn zero_fee_keeps_net_equal_to_total() {
    let totals = SaleTotals::compute([(3, dec!(19.90))], Decimal::ZERO, Decimal::ZERO)
        .expect("totals");

    assert_eq!(totals.subtotal, dec!(59.70));
    assert_eq!(totals.payment_fee, Decimal::ZERO);
    assert_eq!(totals.net_total, totals.total);
}

#[test]
fn discount_larger_than_subtotal_is_not_clamped() {
    let totals = SaleTotals::compute([(1, dec!(20.00))], dec!(25.00), Decimal::ZERO)
        .expect("totals");

    assert_eq!(totals.total, dec!(-5.00));
    assert_eq!(totals.net_total, dec!(-5.00));
}

#[test]
fn fee_is_rounded_to_cents_half_away_from_zero() {
    // 10.10 * 2.5% = 0.2525 -> 0.25 ; 10.60 * 2.5% = 0.265 -> 0.27
    let low = SaleTotals::compute([(1, dec!(10.10))], Decimal::ZERO, dec!(2.5))
        .expect("totals");
    let high = SaleTotals::compute([(1, dec!(10.60))], Decimal::ZERO, dec!(2.5))
        .expect("totals");

    assert_eq!(low.payment_fee, dec!(0.25));
    assert_eq!(high.payment_fee, dec!(0.27));
    assert_eq!(high.net_total + high.payment_fee, high.total);
}

#[test]
fn empty_sale_totals_to_zero() {
    let totals = SaleTotals::compute(Vec::<(i32, Decimal)>::new(), Decimal::ZERO, dec!(4.99))
        .expect("totals");
    assert_eq!(totals.subtotal, Decimal::ZERO);
    assert_eq!(totals.net_total, Decimal::ZERO);
}

#[test]
fn line_total_multiplies_quantity() {
    assert_eq!(line_total(4, dec!(2.75)), Ok(dec!(11.00)));
}

#[test]
fn ledger_description_uses_short_sale_id() {
    let id = Uuid::parse_str("1b4e28ba-2fa1-11d2-883f-0016d3cca427").expect("uuid");
    assert_eq!(ledger_description(id), "Venda #1b4e28ba");
}

#[test]
fn huge_quantities_are_rejected_instead_of_overflowing() {
    let result = SaleTotals::compute(
        [(2_000_000_000, dec!(100000000000000000000))],
        Decimal::ZERO,
        Decimal::ZERO,
    );
    assert_eq!(result, Err(AmountError::OutOfRange));

    // each line fits, the sum does not
    let result = SaleTotals::compute(
        [(1, MAX_AMOUNT), (1, dec!(0.01))],
        Decimal::ZERO,
        Decimal::ZERO,
    );
    assert_eq!(result, Err(AmountError::OutOfRange));
}

#[test]
fn amounts_are_limited_to_the_stored_column() {
    assert_eq!(MAX_AMOUNT, dec!(9999999999.99));
    assert_eq!(check_amount(MAX_AMOUNT), Ok(MAX_AMOUNT));
    assert_eq!(check_amount(dec!(10000000000.00)), Err(AmountError::OutOfRange));
    assert_eq!(
        SaleTotals::compute([(1, dec!(10.00))], dec!(10000000000), Decimal::ZERO),
        Err(AmountError::OutOfRange)
    );
}

#[test]
fn sub_cent_prices_are_rejected() {
    assert_eq!(check_amount(dec!(0.333)), Err(AmountError::TooPrecise));
    assert_eq!(check_amount(dec!(19.900)), Ok(dec!(19.900)));
    assert_eq!(line_total(3, dec!(0.333)), Err(AmountError::TooPrecise));
    assert_eq!(
        SaleTotals::compute([(3, dec!(0.333))], Decimal::ZERO, dec!(3)),
        Err(AmountError::TooPrecise)
    );
    assert_eq!(
        SaleTotals::compute([(1, dec!(10.00))], dec!(0.005), Decimal::ZERO),
        Err(AmountError::TooPrecise)
    );
}

#[test]
fn stored_line_totals_match_quantity_times_price() {
    let line = line_total(3, dec!(0.33)).expect("line");
    assert_eq!(line, dec!(0.99));
    let totals = SaleTotals::compute([(3, dec!(0.33))], Decimal::ZERO, Decimal::ZERO)
        .expect("totals");
    assert_eq!(totals.subtotal, line);
}
