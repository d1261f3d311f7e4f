use crate::aggregate::DEFAULT_TOP_N;
use crate::buckets::NullPolicy;
use crate::error::{Result, SurveyError};
use crate::normalize::MalformedPolicy;
use crate::trend::{DEFAULT_TREND_DAYS, MAX_TREND_DAYS};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Report settings, loadable from a TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Fixed UTC offset used for calendar bucketing, `±HH:MM`.
    pub utc_offset: String,
    /// Length of ranked lists (provinces, motivations).
    pub top_n: usize,
    /// Days in the daily trend window, ending today.
    pub trend_days: u32,
    /// How missing numeric values are bucketed.
    pub null_policy: NullPolicy,
    /// How undecodable motivations are treated in charts.
    pub malformed_motivations: MalformedPolicy,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            utc_offset: "+07:00".to_string(),
            top_n: DEFAULT_TOP_N,
            trend_days: DEFAULT_TREND_DAYS,
            null_policy: NullPolicy::Exclude,
            malformed_motivations: MalformedPolicy::Drop,
        }
    }
}

impl ReportConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: ReportConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|source| SurveyError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        self.offset()?;
        if self.top_n == 0 {
            return Err(SurveyError::Config("top_n must be at least 1".into()));
        }
        if !(1..=MAX_TREND_DAYS).contains(&self.trend_days) {
            return Err(SurveyError::Config(format!(
                "trend_days must be between 1 and {MAX_TREND_DAYS}, got {}",
                self.trend_days
            )));
        }
        Ok(())
    }

    pub fn offset(&self) -> Result<FixedOffset> {
        parse_offset(&self.utc_offset)
    }
}

pub fn parse_offset(s: &str) -> Result<FixedOffset> {
    let bad = || SurveyError::Config(format!("invalid utc_offset '{s}', expected ±HH:MM"));
    let t = s.trim();
    if t.eq_ignore_ascii_case("z") || t.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(bad);
    }
    let (sign, rest) = match t.chars().next() {
        Some('+') => (1, &t[1..]),
        Some('-') => (-1, &t[1..]),
        _ => return Err(bad()),
    };
    let (h, m) = rest.split_once(':').ok_or_else(bad)?;
    let digits = |part: &str| -> Result<i32> {
        if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }
        part.parse().map_err(|_| bad())
    };
    let h = digits(h)?;
    let m = digits(m)?;
    if h > 14 || m > 59 {
        return Err(bad());
    }
    FixedOffset::east_opt(sign * (h * 3600 + m * 60)).ok_or_else(bad)
}
