mod common;

use chrono::FixedOffset;
use common::{at, record};
use lentsurvey::yearly::yearly_report;

fn bangkok() -> FixedOffset {
    FixedOffset::east_opt(7 * 3600).unwrap()
}

#[test]
fn twelve_months_even_when_empty() {
    let report = yearly_report(&[], 2025, bangkok());
    assert_eq!(report.months.len(), 12);
    assert_eq!(report.months[0].month, "January");
    assert_eq!(report.months[11].month, "December");
    assert!(report.months.iter().all(|m| m.registrations == 0 && m.top_province.is_none()));
    assert_eq!(report.summary.total_registrations, 0);
    assert_eq!(report.summary.average_per_month, 0.0);
    assert_eq!(report.summary.peak_month, None);
    assert_eq!(report.summary.top_province, None);
}

#[test]
fn month_and_year_summaries() {
    let mut rows = Vec::new();
    let specs = [
        (1, (2025, 3, 2), Some("ชาย"), "เชียงราย", Some(1000)),
        (2, (2025, 3, 9), Some("หญิง"), "น่าน", Some(3001)),
        (3, (2025, 3, 20), None, "น่าน", None),
        (4, (2025, 3, 21), Some("อื่น ๆ"), "เชียงราย", Some(500)),
        (5, (2025, 7, 1), Some("หญิง"), "น่าน", Some(2000)),
        (6, (2024, 7, 1), Some("หญิง"), "ลำปาง", Some(9000)),
    ];
    for (id, (y, m, d), gender, province, expense) in specs {
        let mut r = record(id, at(y, m, d));
        r.gender = gender.map(str::to_string);
        r.province = province.to_string();
        r.monthly_expense = expense;
        rows.push(r);
    }

    let report = yearly_report(&rows, 2025, bangkok());
    let march = &report.months[2];
    assert_eq!(march.registrations, 4);
    assert_eq!(march.total_expense, 4501);
    assert_eq!(march.average_expense, 1500);
    assert_eq!((march.male, march.female, march.other, march.unspecified), (1, 1, 1, 1));
    // tie between เชียงราย and น่าน, first seen wins
    assert_eq!(march.top_province.as_deref(), Some("เชียงราย"));

    let july = &report.months[6];
    assert_eq!(july.registrations, 1);
    assert_eq!(july.top_province.as_deref(), Some("น่าน"));

    assert_eq!(report.summary.total_registrations, 5);
    assert_eq!(report.summary.total_expense, 6501);
    assert_eq!(report.summary.average_per_month, 0.4);
    assert_eq!(report.summary.peak_month.as_deref(), Some("March"));
    assert_eq!(report.summary.top_province.as_deref(), Some("น่าน"));
}

#[test]
fn expense_totals_saturate() {
    let mut a = record(1, at(2025, 5, 1));
    a.monthly_expense = Some(i64::MAX);
    let mut b = record(2, at(2025, 5, 2));
    b.monthly_expense = Some(1_000_000);
    let mut c = record(3, at(2025, 6, 2));
    c.monthly_expense = Some(500);
    let report = yearly_report(&[a, b, c], 2025, bangkok());
    assert_eq!(report.months[4].total_expense, i64::MAX);
    assert_eq!(report.months[4].registrations, 2);
    assert_eq!(report.summary.total_expense, i64::MAX);
}
