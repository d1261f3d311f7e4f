use crate::normalize::{self, MalformedPolicy};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One participant response as stored. Numeric columns and motivations are
/// kept as raw JSON until [`RawSurveyRecord::canonicalize`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSurveyRecord {
    pub id: i64,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age: Value,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default, alias = "tambon")]
    pub subdistrict: Option<String>,
    #[serde(default, alias = "monthly_expense")]
    pub monthly_expense: Value,
    #[serde(default, alias = "drinking_frequency")]
    pub drinking_frequency: Option<String>,
    #[serde(default, alias = "intent_period")]
    pub intent_period: Option<String>,
    #[serde(default, alias = "health_impact")]
    pub health_impact: Option<String>,
    #[serde(default)]
    pub motivations: Value,
    #[serde(alias = "created_at")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyRecord {
    pub id: i64,
    pub gender: Option<String>,
    pub age: Option<i64>,
    pub province: String,
    pub district: String,
    pub subdistrict: String,
    pub monthly_expense: Option<i64>,
    pub drinking_frequency: Option<String>,
    pub intent_period: Option<String>,
    pub health_impact: String,
    pub motivations: Value,
    pub created_at: DateTime<Utc>,
}

impl RawSurveyRecord {
    pub fn canonicalize(self) -> SurveyRecord {
        SurveyRecord {
            id: self.id,
            gender: normalize::clean_text(self.gender.as_deref()),
            age: normalize::parse_count(&self.age).filter(|a| *a > 0),
            province: self.province.unwrap_or_default().trim().to_string(),
            district: self.district.unwrap_or_default().trim().to_string(),
            subdistrict: self.subdistrict.unwrap_or_default().trim().to_string(),
            monthly_expense: normalize::parse_count(&self.monthly_expense).filter(|e| *e >= 0),
            drinking_frequency: normalize::clean_text(self.drinking_frequency.as_deref()),
            intent_period: normalize::clean_text(self.intent_period.as_deref()),
            health_impact: self.health_impact.unwrap_or_default().trim().to_string(),
            motivations: self.motivations,
            created_at: self.created_at,
        }
    }
}

impl SurveyRecord {
    pub fn motivations(&self, policy: MalformedPolicy) -> Vec<String> {
        normalize::normalize_motivations(&self.motivations, policy)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrganizationRecord {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "organization_type", alias = "type")]
    pub organization_type: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default, alias = "signerCount", alias = "numberOfSigners")]
    pub signers: Value,
    #[serde(alias = "created_at")]
    pub created_at: DateTime<Utc>,
}

/// An organization sign-up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrganizationRecord {
    pub id: i64,
    pub name: String,
    pub organization_type: Option<String>,
    pub province: Option<String>,
    pub signers: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl RawOrganizationRecord {
    pub fn canonicalize(self) -> OrganizationRecord {
        OrganizationRecord {
            id: self.id,
            name: self.name.unwrap_or_default().trim().to_string(),
            organization_type: normalize::clean_text(self.organization_type.as_deref()),
            province: normalize::clean_text(self.province.as_deref()),
            signers: normalize::parse_count(&self.signers).filter(|s| *s >= 0),
            created_at: self.created_at,
        }
    }
}
