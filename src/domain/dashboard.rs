//! Dashboard windows and derived KPIs.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// Inclusive time range used to filter `created_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

fn first_of_month(year: i32, month: u32) -> DateTime<Utc> {
    let date = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN);
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}

/// From the 1st of `now`'s month at midnight up to `now`.
pub fn current_month(now: DateTime<Utc>) -> MonthWindow {
    MonthWindow {
        start: first_of_month(now.year(), now.month()),
        end: now,
    }
}

/// The whole calendar month before `now`'s month, ending at 23:59:59 on its
/// last day.
pub fn previous_month(now: DateTime<Utc>) -> MonthWindow {
    let this_month = first_of_month(now.year(), now.month());
    let (year, month) = if now.month() == 1 {
        (now.year() - 1, 12)
    } else {
        (now.year(), now.month() - 1)
    };
    MonthWindow {
        start: first_of_month(year, month),
        end: this_month - Duration::seconds(1),
    }
}

fn round2(value: Decimal) -> Decimal {
    value.round_dp(2)
}

/// Percent change against the previous period; `0` when there is no
/// previous value to compare with.
pub fn percent_change(current: Decimal, previous: Decimal) -> Decimal {
    if previous.is_zero() {
        return Decimal::ZERO;
    }
    round2((current - previous) / previous * Decimal::ONE_HUNDRED)
}

pub fn conversion_rate(converted: i64, total: i64) -> Decimal {
    if total == 0 {
        return Decimal::ZERO;
    }
    round2(Decimal::from(converted) / Decimal::from(total) * Decimal::ONE_HUNDRED)
}

/// Average gross revenue per sale ("ticket médio").
pub fn average_ticket(gross_revenue: Decimal, sales: i64) -> Decimal {
    if sales == 0 {
        return Decimal::ZERO;
    }
    round2(gross_revenue / Decimal::from(sales))
}

/// Ordered keyword rules; the first rule with a matching keyword wins.
pub const PROBLEM_RULES: &[(&[&str], &str)] = &[
    (&["tela"], "Troca de Tela"),
    (&["bateria"], "Bateria"),
    (&["conector", "carga"], "Conector de Carga"),
    (&["formatação", "conta"], "Software"),
];

pub const FALLBACK_PROBLEM: &str = "Outros";

pub const TOP_PROBLEMS_LIMIT: usize = 5;

pub fn bucket_problem(description: Option<&str>) -> &'static str {
    let Some(description) = description else {
        return FALLBACK_PROBLEM;
    };
    let text = description.to_lowercase();
    PROBLEM_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
        .map(|(_, bucket)| *bucket)
        .unwrap_or(FALLBACK_PROBLEM)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProblemCount {
    pub name: String,
    pub count: i64,
}

/// Histogram of problem buckets, most frequent first.
///
/// Buckets with equal counts keep the order in which they were first seen.
pub fn top_problems<'a, I>(descriptions: I) -> Vec<ProblemCount>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut counts: Vec<ProblemCount> = Vec::new();
    for description in descriptions {
        let bucket = bucket_problem(description);
        match counts.iter_mut().find(|c| c.name == bucket) {
            Some(entry) => entry.count += 1,
            None => counts.push(ProblemCount {
                name: bucket.to_string(),
                count: 1,
            }),
        }
    }
    // sort_by is stable, which keeps first-seen order for ties
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TOP_PROBLEMS_LIMIT);
    counts
}
