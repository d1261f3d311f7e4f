use chrono::{DateTime, Datelike, Duration, FixedOffset, Month, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

pub const DEFAULT_TREND_DAYS: u32 = 30;
pub const MAX_TREND_DAYS: u32 = 3660;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyPoint {
    pub date: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyPoint {
    pub year: i32,
    pub month: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearPoint {
    pub year: i32,
    pub count: u64,
}

/// Calendar date of an instant in the reporting timezone.
pub fn local_date(t: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    t.with_timezone(&offset).date_naive()
}

pub fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("")
}

/// One point per day for the `days` days ending at `today`, oldest first,
/// including days without records.
pub fn daily_trend<I>(times: I, today: NaiveDate, days: u32, offset: FixedOffset) -> Vec<DailyPoint>
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    if days == 0 {
        return Vec::new();
    }
    let Some(first) = today.checked_sub_signed(Duration::days(i64::from(days) - 1)) else {
        return Vec::new();
    };
    let mut counts: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for d in first.iter_days().take(days as usize) {
        counts.insert(d, 0);
    }
    for t in times {
        let d = local_date(t, offset);
        if let Some(c) = counts.get_mut(&d) {
            *c += 1;
        }
    }
    counts
        .into_iter()
        .map(|(d, count)| DailyPoint { date: d.format("%Y-%m-%d").to_string(), count })
        .collect()
}

/// One point per month that has records, in calendar order.
pub fn monthly_trend<I>(times: I, offset: FixedOffset) -> Vec<MonthlyPoint>
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    let mut counts: BTreeMap<(i32, u32), u64> = BTreeMap::new();
    for t in times {
        let d = local_date(t, offset);
        *counts.entry((d.year(), d.month())).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|((year, month), count)| MonthlyPoint { year, month: month_name(month).to_string(), count })
        .collect()
}

pub fn yearly_counts<I>(times: I, offset: FixedOffset) -> Vec<YearPoint>
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    let mut counts: BTreeMap<i32, u64> = BTreeMap::new();
    for t in times {
        *counts.entry(local_date(t, offset).year()).or_insert(0) += 1;
    }
    counts.into_iter().map(|(year, count)| YearPoint { year, count }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn offset_moves_late_utc_evening_to_next_day() {
        let bangkok = FixedOffset::east_opt(7 * 3600).unwrap();
        let t = Utc.with_ymd_and_hms(2025, 3, 31, 18, 30, 0).unwrap();
        assert_eq!(local_date(t, bangkok), NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
    }

    #[test]
    fn month_names_are_english() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(13), "");
    }
}
