#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use lentsurvey::record::{OrganizationRecord, SurveyRecord};
use serde_json::Value;

pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    // 05:00 UTC is noon in Bangkok, so the calendar day is the same in both
    Utc.with_ymd_and_hms(y, m, d, 5, 0, 0).unwrap()
}

pub fn record(id: i64, created_at: DateTime<Utc>) -> SurveyRecord {
    SurveyRecord {
        id,
        gender: None,
        age: None,
        province: String::new(),
        district: String::new(),
        subdistrict: String::new(),
        monthly_expense: None,
        drinking_frequency: None,
        intent_period: None,
        health_impact: String::new(),
        motivations: Value::Null,
        created_at,
    }
}

pub fn organization(id: i64, signers: Option<i64>) -> OrganizationRecord {
    OrganizationRecord {
        id,
        name: format!("org-{id}"),
        organization_type: None,
        province: None,
        signers,
        created_at: at(2025, 7, 1),
    }
}
