use crate::aggregate::OrderedCounts;
use crate::error::{Result, SurveyError};
use crate::record::{OrganizationRecord, RawOrganizationRecord, RawSurveyRecord, SurveyRecord};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Supplies complete snapshots of the stored data.
pub trait DataSource: Send + Sync {
    fn survey_records(&self) -> Result<Vec<SurveyRecord>>;

    fn organizations(&self) -> Result<Vec<OrganizationRecord>>;

    /// Raw drinking-frequency values with their record counts, in
    /// descending count order. Records without a value are left out.
    fn frequency_groups(&self) -> Result<Vec<(String, u64)>> {
        Ok(frequency_groups(&self.survey_records()?))
    }
}

/// Group raw drinking-frequency values of an already loaded snapshot.
pub fn frequency_groups(records: &[SurveyRecord]) -> Vec<(String, u64)> {
    let mut counts = OrderedCounts::new();
    for r in records {
        if let Some(f) = r.drinking_frequency.as_deref() {
            counts.add(f, 1);
        }
    }
    counts.into_ranked().into_iter().map(|nv| (nv.name, nv.value)).collect()
}

#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    pub records: Vec<SurveyRecord>,
    pub organizations: Vec<OrganizationRecord>,
}

impl InMemorySource {
    pub fn new(records: Vec<SurveyRecord>, organizations: Vec<OrganizationRecord>) -> Self {
        Self { records, organizations }
    }
}

impl DataSource for InMemorySource {
    fn survey_records(&self) -> Result<Vec<SurveyRecord>> {
        Ok(self.records.clone())
    }

    fn organizations(&self) -> Result<Vec<OrganizationRecord>> {
        Ok(self.organizations.clone())
    }
}

/// Newline-delimited JSON exports, one object per line.
#[derive(Debug, Clone, Default)]
pub struct JsonlSource {
    pub records_path: Option<PathBuf>,
    pub organizations_path: Option<PathBuf>,
    /// Abort on the first undecodable line instead of skipping it.
    pub fail_fast: bool,
}

impl JsonlSource {
    pub fn new(records_path: impl Into<PathBuf>) -> Self {
        Self { records_path: Some(records_path.into()), ..Self::default() }
    }

    pub fn with_organizations(mut self, path: impl Into<PathBuf>) -> Self {
        self.organizations_path = Some(path.into());
        self
    }

    pub fn fail_fast(mut self, yes: bool) -> Self {
        self.fail_fast = yes;
        self
    }
}

impl DataSource for JsonlSource {
    fn survey_records(&self) -> Result<Vec<SurveyRecord>> {
        match &self.records_path {
            Some(p) => Ok(read_jsonl::<RawSurveyRecord>(p, self.fail_fast)?
                .into_iter()
                .map(RawSurveyRecord::canonicalize)
                .collect()),
            None => Ok(Vec::new()),
        }
    }

    fn organizations(&self) -> Result<Vec<OrganizationRecord>> {
        match &self.organizations_path {
            Some(p) => Ok(read_jsonl::<RawOrganizationRecord>(p, self.fail_fast)?
                .into_iter()
                .map(RawOrganizationRecord::canonicalize)
                .collect()),
            None => Ok(Vec::new()),
        }
    }
}

pub fn read_jsonl<T: DeserializeOwned>(path: &Path, fail_fast: bool) -> Result<Vec<T>> {
    let io_err = |source: std::io::Error| SurveyError::Io { path: path.to_path_buf(), source };
    let f = File::open(path).map_err(io_err)?;
    let reader = BufReader::new(f);
    let mut out = Vec::new();
    let mut skipped = 0usize;
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(io_err)?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<T>(trimmed) {
            Ok(v) => out.push(v),
            Err(source) if fail_fast => {
                return Err(SurveyError::Parse { path: path.to_path_buf(), line: i + 1, source });
            }
            Err(e) => {
                skipped += 1;
                warn!(path = %path.display(), line = i + 1, error = %e, "skipping undecodable line");
            }
        }
    }
    debug!(path = %path.display(), loaded = out.len(), skipped, "read jsonl");
    Ok(out)
}
