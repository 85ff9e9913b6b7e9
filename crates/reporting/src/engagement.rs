//! Clicks vs. conversions bar chart.
//!
//! When the API reports no engagement at all the chart still renders, using
//! a per-campaign click estimate and the baseline conversion rate. The
//! `estimated` flag tells the caller the bars are not measured values.

use campaign_core::Campaign;
use serde::{Deserialize, Serialize};

/// Upper bound of the fixed y-axis.
pub const AXIS_MAX: u64 = 18_000;
/// Y-axis tick step.
pub const AXIS_STEP: u64 = 4_500;
/// Clicks assumed per campaign when none are reported.
pub const ESTIMATED_CLICKS_PER_CAMPAIGN: u64 = 1_200;
/// Conversions-per-click ratio assumed when none are reported.
pub const ESTIMATED_CONVERSION_RATIO: f64 = 0.047;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementChart {
    pub clicks: u64,
    pub conversions: u64,
    pub estimated: bool,
    /// Bar heights as a fraction of the axis, clamped to `[0, 1]`.
    pub clicks_ratio: f64,
    pub conversions_ratio: f64,
    pub ticks: Vec<u64>,
}

impl EngagementChart {
    pub fn compute(campaigns: &[Campaign]) -> Self {
        let reported_clicks: u64 = campaigns.iter().map(|c| c.clicks.unwrap_or(0)).sum();
        let reported_conversions: u64 = campaigns.iter().map(|c| c.conversions.unwrap_or(0)).sum();

        let clicks = if reported_clicks > 0 {
            reported_clicks
        } else if campaigns.is_empty() {
            AXIS_MAX
        } else {
            campaigns.len() as u64 * ESTIMATED_CLICKS_PER_CAMPAIGN
        };
        let conversions = if reported_conversions > 0 {
            reported_conversions
        } else {
            (clicks as f64 * ESTIMATED_CONVERSION_RATIO).round() as u64
        };

        Self {
            clicks,
            conversions,
            estimated: reported_clicks == 0 || reported_conversions == 0,
            clicks_ratio: axis_ratio(clicks),
            conversions_ratio: axis_ratio(conversions),
            ticks: (0..=AXIS_MAX).step_by(AXIS_STEP as usize).collect(),
        }
    }
}

fn axis_ratio(value: u64) -> f64 {
    (value as f64 / AXIS_MAX as f64).clamp(0.0, 1.0)
}
