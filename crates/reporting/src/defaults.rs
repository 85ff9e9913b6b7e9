//! Value-or-default resolution for optional performance fields.

use campaign_core::config::MetricDefaultsConfig;
use campaign_core::Campaign;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CTR: f64 = 4.42;
pub const DEFAULT_CONVERSION_RATE: f64 = 4.74;
pub const DEFAULT_CPC: f64 = 2.26;
pub const DEFAULT_SPEND_RATIO: f64 = 0.30;

/// Fallbacks substituted per missing value before any averaging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricDefaults {
    pub ctr: f64,
    pub conversion_rate: f64,
    pub cpc: f64,
    pub spend_ratio: f64,
}

impl Default for MetricDefaults {
    fn default() -> Self {
        Self {
            ctr: DEFAULT_CTR,
            conversion_rate: DEFAULT_CONVERSION_RATE,
            cpc: DEFAULT_CPC,
            spend_ratio: DEFAULT_SPEND_RATIO,
        }
    }
}

impl From<&MetricDefaultsConfig> for MetricDefaults {
    fn from(config: &MetricDefaultsConfig) -> Self {
        Self {
            ctr: config.ctr,
            conversion_rate: config.conversion_rate,
            cpc: config.cpc,
            spend_ratio: config.spend_ratio,
        }
    }
}

impl MetricDefaults {
    pub fn resolve_ctr(&self, campaign: &Campaign) -> f64 {
        campaign.ctr.unwrap_or(self.ctr)
    }

    pub fn resolve_conversion_rate(&self, campaign: &Campaign) -> f64 {
        campaign.conversion_rate.unwrap_or(self.conversion_rate)
    }

    pub fn resolve_cpc(&self, campaign: &Campaign) -> f64 {
        campaign.cpc.unwrap_or(self.cpc)
    }

    /// Spend assumed for a budget when none is reported.
    pub fn estimate_spend(&self, total_budget: f64) -> f64 {
        total_budget * self.spend_ratio
    }
}
