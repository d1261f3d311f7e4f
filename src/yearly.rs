use crate::aggregate::{average, round_to, OrderedCounts};
use crate::record::SurveyRecord;
use crate::trend::{local_date, month_name};
use chrono::{Datelike, FixedOffset};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
    Unspecified,
}

impl Gender {
    pub fn classify(raw: Option<&str>) -> Gender {
        let Some(t) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
            return Gender::Unspecified;
        };
        match t.to_lowercase().as_str() {
            "ชาย" | "male" | "m" => Gender::Male,
            "หญิง" | "female" | "f" => Gender::Female,
            _ => Gender::Other,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthSummary {
    pub month: String,
    pub registrations: u64,
    pub total_expense: i64,
    pub average_expense: i64,
    pub male: u64,
    pub female: u64,
    pub other: u64,
    pub unspecified: u64,
    pub top_province: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearSummary {
    pub total_registrations: u64,
    pub total_expense: i64,
    pub average_per_month: f64,
    pub peak_month: Option<String>,
    pub top_province: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyReport {
    pub year: i32,
    pub months: Vec<MonthSummary>,
    pub summary: YearSummary,
}

#[derive(Default)]
struct MonthAcc {
    registrations: u64,
    expense_sum: i64,
    expense_count: u64,
    genders: [u64; 4],
    provinces: OrderedCounts,
}

pub fn yearly_report(records: &[SurveyRecord], year: i32, offset: FixedOffset) -> YearlyReport {
    let mut months: Vec<MonthAcc> = (0..12).map(|_| MonthAcc::default()).collect();
    let mut year_provinces = OrderedCounts::new();

    for r in records {
        let d = local_date(r.created_at, offset);
        if d.year() != year {
            continue;
        }
        let m = &mut months[d.month0() as usize];
        m.registrations += 1;
        if let Some(e) = r.monthly_expense {
            m.expense_sum = m.expense_sum.saturating_add(e);
            m.expense_count += 1;
        }
        m.genders[Gender::classify(r.gender.as_deref()) as usize] += 1;
        if !r.province.is_empty() {
            m.provinces.add(&r.province, 1);
            year_provinces.add(&r.province, 1);
        }
    }

    let summaries: Vec<MonthSummary> = months
        .iter()
        .enumerate()
        .map(|(i, m)| MonthSummary {
            month: month_name(i as u32 + 1).to_string(),
            registrations: m.registrations,
            total_expense: m.expense_sum,
            average_expense: average(m.expense_sum, m.expense_count),
            male: m.genders[Gender::Male as usize],
            female: m.genders[Gender::Female as usize],
            other: m.genders[Gender::Other as usize],
            unspecified: m.genders[Gender::Unspecified as usize],
            top_province: m.provinces.leader().map(str::to_string),
        })
        .collect();

    let total_registrations: u64 = summaries.iter().map(|m| m.registrations).sum();
    let total_expense = summaries.iter().fold(0i64, |acc, m| acc.saturating_add(m.total_expense));
    let mut peak: Option<&MonthSummary> = None;
    for m in summaries.iter().filter(|m| m.registrations > 0) {
        if peak.map_or(true, |p| m.registrations > p.registrations) {
            peak = Some(m);
        }
    }
    let peak_month = peak.map(|m| m.month.clone());

    tracing::debug!(year, total_registrations, "built yearly report");

    YearlyReport {
        year,
        summary: YearSummary {
            total_registrations,
            total_expense,
            average_per_month: round_to(total_registrations as f64 / 12.0, 1),
            peak_month,
            top_province: year_provinces.leader().map(str::to_string),
        },
        months: summaries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_variants() {
        assert_eq!(Gender::classify(Some(" ชาย ")), Gender::Male);
        assert_eq!(Gender::classify(Some("Female")), Gender::Female);
        assert_eq!(Gender::classify(Some("LGBTQ+")), Gender::Other);
        assert_eq!(Gender::classify(Some("")), Gender::Unspecified);
        assert_eq!(Gender::classify(None), Gender::Unspecified);
    }
}
