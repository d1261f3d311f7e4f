use ahash::AHashMap;
use serde::Serialize;

/// Label used for missing or blank categorical values.
pub const UNSPECIFIED: &str = "ไม่ระบุ";

pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameValue {
    pub name: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareOf {
    pub name: String,
    pub value: u64,
    pub percentage: f64,
}

/// Counts keyed by label, remembering the order labels were first seen.
#[derive(Debug, Default)]
pub struct OrderedCounts {
    index: AHashMap<String, usize>,
    entries: Vec<NameValue>,
}

impl OrderedCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, label: &str, weight: u64) {
        match self.index.get(label) {
            Some(&i) => self.entries[i].value += weight,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push(NameValue { name: label.to_string(), value: weight });
            }
        }
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.value).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-encountered order.
    pub fn into_entries(self) -> Vec<NameValue> {
        self.entries
    }

    /// Entries by descending count, ties kept in first-encountered order.
    pub fn into_ranked(self) -> Vec<NameValue> {
        let mut v = self.entries;
        v.sort_by(|a, b| b.value.cmp(&a.value));
        v
    }

    /// The highest-count label; the earliest wins a tie.
    pub fn leader(&self) -> Option<&str> {
        let mut best: Option<&NameValue> = None;
        for e in &self.entries {
            if best.map_or(true, |b| e.value > b.value) {
                best = Some(e);
            }
        }
        best.map(|e| e.name.as_str())
    }
}

fn label_or_unspecified(v: Option<&str>) -> &str {
    match v.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => UNSPECIFIED,
    }
}

pub fn group_count<'a, I>(values: I) -> Vec<NameValue>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut counts = OrderedCounts::new();
    for v in values {
        counts.add(label_or_unspecified(v), 1);
    }
    counts.into_ranked()
}

/// Group count over a multi-valued field; every label of every record counts
/// once. Records with no labels contribute nothing.
pub fn group_count_many<I, L, S>(records: I) -> Vec<NameValue>
where
    I: IntoIterator<Item = L>,
    L: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts = OrderedCounts::new();
    for labels in records {
        for l in labels {
            let t = l.as_ref().trim();
            if !t.is_empty() {
                counts.add(t, 1);
            }
        }
    }
    counts.into_ranked()
}

pub fn top_n(mut counts: Vec<NameValue>, n: usize) -> Vec<NameValue> {
    counts.sort_by(|a, b| b.value.cmp(&a.value));
    counts.truncate(n);
    counts
}

pub fn round_to(x: f64, decimals: i32) -> f64 {
    let p = 10f64.powi(decimals);
    (x * p).round() / p
}

pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to(count as f64 / total as f64 * 100.0, 1)
}

pub fn average(sum: i64, count: u64) -> i64 {
    if count == 0 {
        return 0;
    }
    (sum as f64 / count as f64).round() as i64
}

pub fn with_percentages(counts: &[NameValue]) -> Vec<ShareOf> {
    let total: u64 = counts.iter().map(|c| c.value).sum();
    counts
        .iter()
        .map(|c| ShareOf { name: c.name.clone(), value: c.value, percentage: percentage(c.value, total) })
        .collect()
}
