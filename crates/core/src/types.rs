use crate::error::{CampaignError, CampaignResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Enumerations ───────────────────────────────────────────────────────

/// Lifecycle status reported by the campaign API.
///
/// Unknown wire values are kept verbatim in `Unrecognized` so that a record
/// with an unexpected status still deserializes and still shows up in the
/// table view; distributions simply leave it out of the named buckets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CampaignStatus {
    Active,
    Paused,
    Completed,
    Unrecognized(String),
}

impl CampaignStatus {
    /// The three statuses that have a named bucket, in display order.
    pub const RECOGNIZED: [CampaignStatus; 3] = [Self::Active, Self::Paused, Self::Completed];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<String> for CampaignStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "active" => Self::Active,
            "paused" => Self::Paused,
            "completed" => Self::Completed,
            _ => Self::Unrecognized(raw),
        }
    }
}

impl From<&str> for CampaignStatus {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<CampaignStatus> for String {
    fn from(status: CampaignStatus) -> Self {
        match status {
            CampaignStatus::Unrecognized(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advertising platform a campaign runs on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    Meta,
    Google,
    Linkedin,
    Other,
    Unrecognized(String),
}

impl Platform {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Meta => "meta",
            Self::Google => "google",
            Self::Linkedin => "linkedin",
            Self::Other => "other",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<String> for Platform {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "meta" => Self::Meta,
            "google" => Self::Google,
            "linkedin" => Self::Linkedin,
            "other" => Self::Other,
            _ => Self::Unrecognized(raw),
        }
    }
}

impl From<&str> for Platform {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        match platform {
            Platform::Unrecognized(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Campaign ───────────────────────────────────────────────────────────

/// One advertising campaign as served by the campaign API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub brand_id: String,
    pub status: CampaignStatus,
    pub budget: f64,
    pub daily_budget: f64,
    pub platforms: Vec<Platform>,
    /// ISO-8601 timestamp, only used for ordering.
    pub created_at: String,
    /// Click-through rate, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ctr: Option<f64>,
    /// Conversion rate, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_rate: Option<f64>,
    /// Cost per click, in currency units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpc: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clicks: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversions: Option<u64>,
}

impl Campaign {
    /// Minimal active campaign; fill in the rest with the `with_*` setters.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand_id: String::new(),
            status: CampaignStatus::Active,
            budget: 0.0,
            daily_budget: 0.0,
            platforms: Vec::new(),
            created_at: String::new(),
            ctr: None,
            conversion_rate: None,
            cpc: None,
            clicks: None,
            conversions: None,
        }
    }

    pub fn with_brand(mut self, brand_id: impl Into<String>) -> Self {
        self.brand_id = brand_id.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<CampaignStatus>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_budget(mut self, budget: f64, daily_budget: f64) -> Self {
        self.budget = budget;
        self.daily_budget = daily_budget;
        self
    }

    pub fn with_platforms<P: Into<Platform>>(mut self, platforms: impl IntoIterator<Item = P>) -> Self {
        self.platforms = platforms.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = created_at.into();
        self
    }

    pub fn with_engagement(mut self, clicks: u64, conversions: u64) -> Self {
        self.clicks = Some(clicks);
        self.conversions = Some(conversions);
        self
    }

    pub fn with_rates(mut self, ctr: Option<f64>, conversion_rate: Option<f64>, cpc: Option<f64>) -> Self {
        self.ctr = ctr;
        self.conversion_rate = conversion_rate;
        self.cpc = cpc;
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == CampaignStatus::Active
    }

    /// `created_at` as milliseconds since the Unix epoch, `None` if unparsable.
    pub fn created_at_millis(&self) -> Option<i64> {
        parse_timestamp_millis(&self.created_at)
    }

    /// Check the data-model invariants: non-negative finite amounts and at
    /// least one platform tag.
    pub fn validate(&self) -> CampaignResult<()> {
        if !self.budget.is_finite() || self.budget < 0.0 {
            return Err(CampaignError::Validation(format!(
                "campaign '{}' has invalid budget {}",
                self.id, self.budget
            )));
        }
        if !self.daily_budget.is_finite() || self.daily_budget < 0.0 {
            return Err(CampaignError::Validation(format!(
                "campaign '{}' has invalid daily budget {}",
                self.id, self.daily_budget
            )));
        }
        if self.platforms.is_empty() {
            return Err(CampaignError::Validation(format!(
                "campaign '{}' has no platforms",
                self.id
            )));
        }
        Ok(())
    }
}

/// Parse an ISO-8601 timestamp into epoch milliseconds.
///
/// Accepts RFC 3339, a local date-time without offset (read as UTC) and a
/// bare calendar date (UTC midnight).
pub fn parse_timestamp_millis(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    for layout in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, layout) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

// ─── API payloads ───────────────────────────────────────────────────────

/// Body of `GET /campaigns`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignsResponse {
    pub campaigns: Vec<Campaign>,
    #[serde(default)]
    pub total: u64,
}

/// Body of `GET /campaigns/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignResponse {
    pub campaign: Campaign,
}
