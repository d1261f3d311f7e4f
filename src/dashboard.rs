use crate::aggregate::{average, group_count, group_count_many, top_n, with_percentages, NameValue, ShareOf};
use crate::buckets::{bucketize, RangeCount, AGE_GROUPS, EXPENSE_RANGES, SIGNER_RANGES};
use crate::config::ReportConfig;
use crate::error::Result;
use crate::frequency;
use crate::record::{OrganizationRecord, SurveyRecord};
use crate::source::{frequency_groups, DataSource};
use crate::trend::{daily_trend, monthly_trend, DailyPoint, MonthlyPoint};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub participants: u64,
    pub organizations: u64,
    pub total_signers: i64,
    pub average_age: i64,
    pub average_expense: i64,
    pub with_drinking_frequency: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub overview: Overview,
    pub gender: Vec<ShareOf>,
    pub age_groups: Vec<RangeCount>,
    pub expense_ranges: Vec<RangeCount>,
    pub drinking_frequency: Vec<NameValue>,
    pub intent_period: Vec<NameValue>,
    pub health_impact: Vec<NameValue>,
    pub top_provinces: Vec<NameValue>,
    pub top_motivations: Vec<NameValue>,
    pub daily_trend: Vec<DailyPoint>,
    pub monthly_trend: Vec<MonthlyPoint>,
    pub signer_ranges: Vec<RangeCount>,
    pub organization_types: Vec<NameValue>,
}

impl Dashboard {
    pub fn from_source<S: DataSource + ?Sized>(source: &S, cfg: &ReportConfig, today: NaiveDate) -> Result<Self> {
        let records = source.survey_records()?;
        let organizations = source.organizations()?;
        let groups = frequency_groups(&records);
        build_dashboard(&records, &organizations, &groups, cfg, today)
    }
}

fn build_overview(records: &[SurveyRecord], organizations: &[OrganizationRecord]) -> Overview {
    let (age_sum, age_n) = sum_count(records.iter().filter_map(|r| r.age));
    let (exp_sum, exp_n) = sum_count(records.iter().filter_map(|r| r.monthly_expense));
    Overview {
        participants: records.len() as u64,
        organizations: organizations.len() as u64,
        total_signers: organizations.iter().filter_map(|o| o.signers).fold(0i64, i64::saturating_add),
        average_age: average(age_sum, age_n),
        average_expense: average(exp_sum, exp_n),
        with_drinking_frequency: records.iter().filter(|r| r.drinking_frequency.is_some()).count() as u64,
    }
}

fn sum_count(values: impl Iterator<Item = i64>) -> (i64, u64) {
    values.fold((0, 0), |(s, n), v| (s.saturating_add(v), n + 1))
}

/// Build every chart section from one snapshot. Sections are independent and
/// computed in parallel.
pub fn build_dashboard(
    records: &[SurveyRecord],
    organizations: &[OrganizationRecord],
    frequency_groups: &[(String, u64)],
    cfg: &ReportConfig,
    today: NaiveDate,
) -> Result<Dashboard> {
    let offset = cfg.offset()?;
    let policy = cfg.null_policy;
    let top = cfg.top_n;

    let ((overview, gender), (age_groups, expense_ranges)) = rayon::join(
        || {
            let gender = with_percentages(&group_count(records.iter().map(|r| r.gender.as_deref())));
            (build_overview(records, organizations), gender)
        },
        || {
            rayon::join(
                || bucketize(&AGE_GROUPS, records.iter().map(|r| r.age), policy),
                || bucketize(&EXPENSE_RANGES, records.iter().map(|r| r.monthly_expense), policy),
            )
        },
    );

    let ((drinking_frequency, intent_period, health_impact), (top_provinces, top_motivations)) = rayon::join(
        || {
            (
                frequency::classify_weighted(frequency_groups.iter().map(|(raw, n)| (Some(raw.as_str()), *n))),
                group_count(records.iter().map(|r| r.intent_period.as_deref())),
                group_count(records.iter().map(|r| Some(r.health_impact.as_str()))),
            )
        },
        || {
            let provinces = records.iter().filter(|r| !r.province.is_empty()).map(|r| Some(r.province.as_str()));
            let motivations = group_count_many(records.iter().map(|r| r.motivations(cfg.malformed_motivations)));
            (top_n(group_count(provinces), top), top_n(motivations, top))
        },
    );

    let ((daily, monthly), (signer_ranges, organization_types)) = rayon::join(
        || {
            (
                daily_trend(records.iter().map(|r| r.created_at), today, cfg.trend_days, offset),
                monthly_trend(records.iter().map(|r| r.created_at), offset),
            )
        },
        || {
            (
                bucketize(&SIGNER_RANGES, organizations.iter().map(|o| o.signers), policy),
                group_count(organizations.iter().map(|o| o.organization_type.as_deref())),
            )
        },
    );

    debug!(
        participants = records.len(),
        organizations = organizations.len(),
        provinces = top_provinces.len(),
        "built dashboard"
    );

    Ok(Dashboard {
        overview,
        gender,
        age_groups,
        expense_ranges,
        drinking_frequency,
        intent_period,
        health_impact,
        top_provinces,
        top_motivations,
        daily_trend: daily,
        monthly_trend: monthly,
        signer_ranges,
        organization_types,
    })
}
