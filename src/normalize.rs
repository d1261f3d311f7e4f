use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// Integer with optional thousands separators, e.g. 1500, 1,500, -20
static RE_COUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.0+)?$").unwrap()
});

#[derive(Debug, Error)]
pub enum MotivationsError {
    #[error("motivations is not valid JSON: {source}")]
    Malformed {
        raw: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("motivations JSON is not a list")]
    NotAList { raw: String },
}

impl MotivationsError {
    pub fn raw(&self) -> &str {
        match self {
            MotivationsError::Malformed { raw, .. } => raw,
            MotivationsError::NotAList { raw } => raw,
        }
    }
}

/// What a call site does with a motivations string that does not decode
/// to a JSON list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Treat as no motivations (chart aggregation).
    #[default]
    Drop,
    /// Keep the raw text as a single label (record listing).
    Verbatim,
}

/// Decode the stored motivations attribute into labels.
///
/// Non-string list elements are dropped, not stringified. Objects yield their
/// string values in the map's enumeration order.
pub fn parse_motivations(v: &Value) -> Result<Vec<String>, MotivationsError> {
    match v {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(strings_of(items.iter())),
        Value::Object(map) => Ok(strings_of(map.values())),
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Array(items)) => Ok(strings_of(items.iter())),
            Ok(_) => Err(MotivationsError::NotAList { raw: raw.clone() }),
            Err(source) => Err(MotivationsError::Malformed { raw: raw.clone(), source }),
        },
        Value::Bool(_) | Value::Number(_) => Ok(Vec::new()),
    }
}

pub fn normalize_motivations(v: &Value, policy: MalformedPolicy) -> Vec<String> {
    match parse_motivations(v) {
        Ok(labels) => labels,
        Err(err) => match policy {
            MalformedPolicy::Drop => Vec::new(),
            MalformedPolicy::Verbatim => {
                let raw = err.raw().trim();
                if raw.is_empty() {
                    Vec::new()
                } else {
                    vec![raw.to_string()]
                }
            }
        },
    }
}

fn strings_of<'a>(items: impl Iterator<Item = &'a Value>) -> Vec<String> {
    items
        .filter_map(|v| v.as_str())
        .map(str::to_string)
        .collect()
}

/// Nullable integer normalization for numeric columns that may arrive as
/// numbers, integral floats or numeric strings.
pub fn parse_count(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i)
            } else {
                n.as_f64().filter(|f| f.is_finite() && f.fract() == 0.0).map(|f| f as i64)
            }
        }
        Value::String(s) => {
            let t = s.trim();
            if !RE_COUNT.is_match(t) {
                return None;
            }
            let digits: String = t.chars().take_while(|c| *c != '.').filter(|c| *c != ',').collect();
            digits.parse::<i64>().ok()
        }
        _ => None,
    }
}

pub fn clean_text(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|t| !t.is_empty()).map(str::to_string)
}
