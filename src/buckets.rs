use crate::aggregate::average;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_RANGE: &str = "Unknown";

/// A fixed, ordered set of inclusive integer ranges. The last range has no
/// upper bound.
#[derive(Debug, Clone, Copy)]
pub struct RangeTable {
    pub ranges: &'static [(&'static str, i64, Option<i64>)],
    /// Emit zero-count ranges instead of dropping them.
    pub keep_empty: bool,
}

pub const AGE_GROUPS: RangeTable = RangeTable {
    ranges: &[
        ("18-25", 18, Some(25)),
        ("26-35", 26, Some(35)),
        ("36-45", 36, Some(45)),
        ("46-55", 46, Some(55)),
        ("56-65", 56, Some(65)),
        (">65", 66, None),
    ],
    keep_empty: true,
};

pub const EXPENSE_RANGES: RangeTable = RangeTable {
    ranges: &[
        ("0-1,000", 0, Some(1_000)),
        ("1,001-3,000", 1_001, Some(3_000)),
        ("3,001-5,000", 3_001, Some(5_000)),
        ("5,001-10,000", 5_001, Some(10_000)),
        ("10,001-20,000", 10_001, Some(20_000)),
        (">20,000", 20_001, None),
    ],
    keep_empty: false,
};

pub const SIGNER_RANGES: RangeTable = RangeTable {
    ranges: &[
        ("1-5", 1, Some(5)),
        ("6-10", 6, Some(10)),
        ("11-20", 11, Some(20)),
        ("21-50", 21, Some(50)),
        ("51-100", 51, Some(100)),
        (">100", 101, None),
    ],
    keep_empty: false,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullPolicy {
    #[default]
    Exclude,
    BucketAsUnknown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeCount {
    pub range: String,
    pub count: u64,
    pub sum: i64,
    pub average: i64,
}

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    count: u64,
    sum: i64,
}

impl Tally {
    fn add(&mut self, v: i64) {
        self.count += 1;
        self.sum = self.sum.saturating_add(v);
    }
}

impl RangeTable {
    pub fn classify(&self, v: i64) -> Option<usize> {
        self.ranges
            .iter()
            .position(|(_, lo, hi)| v >= *lo && hi.map_or(true, |h| v <= h))
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.ranges.iter().map(|(label, _, _)| *label)
    }

    pub fn label_of(&self, v: i64) -> Option<&'static str> {
        self.classify(v).map(|i| self.ranges[i].0)
    }
}

/// Fold values into the table's ranges and emit them in declared order.
/// Values below the lowest bound are not counted under either policy.
pub fn bucketize<I>(table: &RangeTable, values: I, policy: NullPolicy) -> Vec<RangeCount>
where
    I: IntoIterator<Item = Option<i64>>,
{
    let mut tallies = vec![Tally::default(); table.ranges.len()];
    let mut unknown = Tally::default();
    for v in values {
        match v {
            Some(x) => {
                if let Some(i) = table.classify(x) {
                    tallies[i].add(x);
                }
            }
            None if policy == NullPolicy::BucketAsUnknown => unknown.count += 1,
            None => {}
        }
    }

    let mut out: Vec<RangeCount> = table
        .labels()
        .zip(tallies)
        .filter(|(_, t)| table.keep_empty || t.count > 0)
        .map(|(label, t)| RangeCount {
            range: label.to_string(),
            count: t.count,
            sum: t.sum,
            average: average(t.sum, t.count),
        })
        .collect();
    if unknown.count > 0 {
        out.push(RangeCount { range: UNKNOWN_RANGE.to_string(), count: unknown.count, sum: 0, average: 0 });
    }
    out
}
