use chrono::{TimeZone, Utc};
use repair_shop_api::domain::dashboard::{
    ProblemCount, average_ticket, bucket_problem, conversion_rate, current_month,
    percent_change, previous_month, top_problems,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn trend_is_zero_without_a_previous_month() {
    assert_eq!(percent_change(dec!(10), Decimal::ZERO), Decimal::ZERO);
    assert_eq!(percent_change(dec!(15), dec!(10)), dec!(50));
    assert_eq!(percent_change(dec!(5), dec!(10)), dec!(-50));
}

#[test]
fn conversion_and_ticket_guard_against_empty_periods() {
    assert_eq!(conversion_rate(3, 0), Decimal::ZERO);
    assert_eq!(conversion_rate(1, 3), dec!(33.33));
    assert_eq!(average_ticket(dec!(300.00), 0), Decimal::ZERO);
    assert_eq!(average_ticket(dec!(300.00), 4), dec!(75.00));
}

#[test]
fn month_windows_cover_calendar_months() {
    let now = Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap();

    let current = current_month(now);
    assert_eq!(current.start, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    assert_eq!(current.end, now);

    let previous = previous_month(now);
    assert_eq!(previous.start, Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
    assert_eq!(previous.end, Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).unwrap());
}

#[test]
fn january_reaches_back_to_december() {
    let now = Utc.with_ymd_and_hms(2025, 1, 2, 8, 0, 0).unwrap();
    let previous = previous_month(now);

    assert_eq!(previous.start, Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap());
    assert_eq!(previous.end, Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap());
}

#[test]
fn problems_bucket_by_first_matching_rule() {
    assert_eq!(bucket_problem(Some("Tela quebrada")), "Troca de Tela");
    assert_eq!(bucket_problem(Some("Troca de BATERIA")), "Bateria");
    assert_eq!(bucket_problem(Some("não carrega")), "Outros");
    assert_eq!(bucket_problem(Some("problema na carga")), "Conector de Carga");
    assert_eq!(bucket_problem(Some("esqueci a conta google")), "Software");
    assert_eq!(bucket_problem(Some("formatação")), "Software");
    // "tela" is checked before "carga"
    assert_eq!(bucket_problem(Some("tela e carga")), "Troca de Tela");
    assert_eq!(bucket_problem(Some("molhou")), "Outros");
    assert_eq!(bucket_problem(None), "Outros");
}

#[test]
fn top_problems_are_sorted_by_count() {
    let descriptions = ["Tela quebrada", "Troca de bateria", "tela trincada"];
    let top = top_problems(descriptions.iter().map(|d| Some(*d)));

    assert_eq!(
        top,
        vec![
            ProblemCount {
                name: "Troca de Tela".into(),
                count: 2
            },
            ProblemCount {
                name: "Bateria".into(),
                count: 1
            },
        ]
    );
}

#[test]
fn ties_keep_first_seen_order() {
    let top = top_problems([Some("bateria"), Some("molhou"), None, Some("bateria viciada"), Some("tela")]);
    let names: Vec<&str> = top.iter().map(|p| p.name.as_str()).collect();

    assert_eq!(names, ["Bateria", "Outros", "Troca de Tela"]);
    assert_eq!(top[1].count, 2);
}

#[test]
fn empty_input_has_no_problems() {
    assert!(top_problems(Vec::<Option<&str>>::new()).is_empty());
}
