use crate::aggregate::NameValue;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static RE_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

// En/em dash, minus sign, tilde and "ถึง" ("to") all read as a range
static RE_DASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"[‐-―−~]|ถึง").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DrinkingFrequency {
    Daily,
    NearDaily,
    Weekly,
    Monthly,
    Rarely,
}

impl DrinkingFrequency {
    pub const ALL: [DrinkingFrequency; 5] = [
        DrinkingFrequency::Daily,
        DrinkingFrequency::NearDaily,
        DrinkingFrequency::Weekly,
        DrinkingFrequency::Monthly,
        DrinkingFrequency::Rarely,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DrinkingFrequency::Daily => "ทุกวัน (7 วัน/สัปดาห์)",
            DrinkingFrequency::NearDaily => "เกือบทุกวัน (3-5 วัน/สัปดาห์)",
            DrinkingFrequency::Weekly => "ทุกสัปดาห์ (1-2 วัน/สัปดาห์)",
            DrinkingFrequency::Monthly => "ทุกเดือน (1-3 วัน/เดือน)",
            DrinkingFrequency::Rarely => "นาน ๆ ครั้ง (8-11 วัน/ปี)",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Lower-case, drop whitespace and fold dash variants to `-`.
pub fn normalize_text(raw: &str) -> String {
    let lower = raw.to_lowercase();
    let s = RE_SPACE.replace_all(&lower, "");
    RE_DASH.replace_all(&s, "-").into_owned()
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

fn is_label(text: &str, category: DrinkingFrequency) -> bool {
    text == normalize_text(category.label())
}

fn mentions_week(text: &str) -> bool {
    contains_any(text, &["สัปดาห์", "week"])
}

fn mentions_month(text: &str) -> bool {
    contains_any(text, &["เดือน", "month"])
}

fn daily(text: &str) -> bool {
    text == "ทุกวัน" || text == "daily" || is_label(text, DrinkingFrequency::Daily)
}

fn near_daily(text: &str) -> bool {
    contains_any(text, &["3-5", "4-5", "5-6", "สัปดาห์ละ3", "สัปดาห์ละ4", "สัปดาห์ละ5"])
        || is_label(text, DrinkingFrequency::NearDaily)
}

fn weekly(text: &str) -> bool {
    (text.contains("1-2") && mentions_week(text))
        || contains_any(text, &["สัปดาห์ละ1", "สัปดาห์ละ2"])
        || (text.contains("2-3") && mentions_week(text))
        || is_label(text, DrinkingFrequency::Weekly)
}

fn monthly(text: &str) -> bool {
    (mentions_month(text)
        && contains_any(text, &["1-2", "1-3", "2-3", "เดือนละ1", "เดือนละ2", "เดือนละ3"]))
        || is_label(text, DrinkingFrequency::Monthly)
}

fn anything(_: &str) -> bool {
    true
}

/// Classification rules in priority order. The last rule always matches.
pub const RULES: &[(DrinkingFrequency, fn(&str) -> bool)] = &[
    (DrinkingFrequency::Daily, daily),
    (DrinkingFrequency::NearDaily, near_daily),
    (DrinkingFrequency::Weekly, weekly),
    (DrinkingFrequency::Monthly, monthly),
    (DrinkingFrequency::Rarely, anything),
];

pub fn classify(raw: &str) -> DrinkingFrequency {
    let text = normalize_text(raw);
    RULES
        .iter()
        .find(|(_, matches)| matches(&text))
        .map(|(category, _)| *category)
        .unwrap_or(DrinkingFrequency::Rarely)
}

/// Classify pre-grouped `(raw value, count)` pairs. Blank values are skipped,
/// empty categories dropped, and the rest emitted in canonical order.
pub fn classify_weighted<'a, I>(groups: I) -> Vec<NameValue>
where
    I: IntoIterator<Item = (Option<&'a str>, u64)>,
{
    let mut counts = [0u64; 5];
    for (raw, weight) in groups {
        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            continue;
        };
        counts[classify(raw).index()] += weight;
    }
    DrinkingFrequency::ALL
        .iter()
        .filter(|c| counts[c.index()] > 0)
        .map(|c| NameValue { name: c.label().to_string(), value: counts[c.index()] })
        .collect()
}
