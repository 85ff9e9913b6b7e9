//! Scalar summary metrics: counts, budgets and derived performance rates.

use crate::defaults::MetricDefaults;
use crate::percentage;
use campaign_core::Campaign;
use serde::{Deserialize, Serialize};

/// Counts and budget totals shown on the summary cards.
///
/// Ratios are percentages in `[0, 100]` and are `0.0` for empty input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub total_count: usize,
    pub active_count: usize,
    pub active_ratio: f64,
    pub total_budget: f64,
    pub total_daily_budget: f64,
    pub active_budget: f64,
    pub active_budget_ratio: f64,
}

impl SummaryMetrics {
    pub fn compute(campaigns: &[Campaign]) -> Self {
        let mut metrics = campaigns.iter().fold(Self::default(), |mut acc, c| {
            acc.total_count += 1;
            acc.total_budget += c.budget;
            acc.total_daily_budget += c.daily_budget;
            if c.is_active() {
                acc.active_count += 1;
                acc.active_budget += c.budget;
            }
            acc
        });

        metrics.active_ratio = percentage(metrics.active_count as f64, metrics.total_count as f64);
        metrics.active_budget_ratio = percentage(metrics.active_budget, metrics.total_budget);
        metrics
    }
}

/// Click, conversion and cost aggregates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub total_clicks: u64,
    pub total_conversions: u64,
    /// Mean click-through rate in percent.
    pub avg_ctr: f64,
    /// Conversion rate in percent.
    pub conversion_rate: f64,
    pub total_spend: f64,
    /// True when `total_spend` was derived from the budget.
    pub spend_estimated: bool,
    pub avg_cpc: f64,
}

impl PerformanceMetrics {
    /// Aggregate performance over `campaigns`.
    ///
    /// Averages substitute `defaults` for each missing field. When clicks
    /// were reported, conversion rate is `conversions / clicks` and CPC is
    /// `spend / clicks`; `spend` falls back to a share of the total budget.
    pub fn compute(campaigns: &[Campaign], defaults: &MetricDefaults, spend: Option<f64>) -> Self {
        if campaigns.is_empty() {
            return Self {
                total_spend: spend.unwrap_or(0.0),
                spend_estimated: spend.is_none(),
                ..Self::default()
            };
        }

        let count = campaigns.len() as f64;
        let mut total_clicks = 0u64;
        let mut total_conversions = 0u64;
        let mut total_budget = 0.0;
        let mut ctr_sum = 0.0;
        let mut conversion_sum = 0.0;
        let mut cpc_sum = 0.0;

        for campaign in campaigns {
            total_clicks += campaign.clicks.unwrap_or(0);
            total_conversions += campaign.conversions.unwrap_or(0);
            total_budget += campaign.budget;
            ctr_sum += defaults.resolve_ctr(campaign);
            conversion_sum += defaults.resolve_conversion_rate(campaign);
            cpc_sum += defaults.resolve_cpc(campaign);
        }

        let total_spend = spend.unwrap_or_else(|| defaults.estimate_spend(total_budget));

        let (conversion_rate, avg_cpc) = if total_clicks > 0 {
            (
                percentage(total_conversions as f64, total_clicks as f64),
                total_spend / total_clicks as f64,
            )
        } else {
            (conversion_sum / count, cpc_sum / count)
        };

        Self {
            total_clicks,
            total_conversions,
            avg_ctr: ctr_sum / count,
            conversion_rate,
            total_spend,
            spend_estimated: spend.is_none(),
            avg_cpc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Campaign> {
        vec![
            Campaign::new("1", "Alpha")
                .with_status("active")
                .with_budget(1000.0, 100.0)
                .with_platforms(["meta"]),
            Campaign::new("2", "Beta")
                .with_status("paused")
                .with_budget(2000.0, 200.0)
                .with_platforms(["google", "meta"]),
            Campaign::new("3", "Gamma")
                .with_status("completed")
                .with_budget(500.0, 50.0)
                .with_platforms(["linkedin"]),
        ]
    }

    #[test]
    fn test_summary_scenario() {
        let summary = SummaryMetrics::compute(&sample());
        assert_eq!(summary.total_count, 3);
        assert_eq!(summary.active_count, 1);
        assert!((summary.total_budget - 3500.0).abs() < f64::EPSILON);
        assert!((summary.total_daily_budget - 350.0).abs() < f64::EPSILON);
        assert!((summary.active_budget - 1000.0).abs() < f64::EPSILON);
        assert!((summary.active_budget_ratio - 28.571_428).abs() < 1e-4);
        assert!((summary.active_ratio - 33.333_333).abs() < 1e-4);
    }

    #[test]
    fn test_summary_empty_is_all_zero() {
        let summary = SummaryMetrics::compute(&[]);
        assert_eq!(summary, SummaryMetrics::default());
        assert!(summary.active_ratio.is_finite());
        assert!(summary.active_budget_ratio.is_finite());
    }

    #[test]
    fn test_zero_budget_ratio_is_guarded() {
        let campaigns = vec![Campaign::new("1", "Free").with_budget(0.0, 0.0)];
        let summary = SummaryMetrics::compute(&campaigns);
        assert_eq!(summary.active_budget_ratio, 0.0);
        assert!((summary.active_ratio - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_performance_defaults_substituted_per_record() {
        let mut campaigns = sample();
        campaigns[0].ctr = Some(2.0);
        let perf = PerformanceMetrics::compute(&campaigns, &MetricDefaults::default(), None);

        let expected_ctr = (2.0 + 4.42 + 4.42) / 3.0;
        assert!((perf.avg_ctr - expected_ctr).abs() < 1e-9);
        assert!((perf.conversion_rate - 4.74).abs() < 1e-9);
        assert!((perf.avg_cpc - 2.26).abs() < 1e-9);
        assert_eq!(perf.total_clicks, 0);
    }

    #[test]
    fn test_performance_uses_clicks_when_reported() {
        let mut campaigns = sample();
        campaigns[0] = campaigns[0].clone().with_engagement(1000, 50);
        campaigns[1] = campaigns[1].clone().with_engagement(500, 25);

        let perf = PerformanceMetrics::compute(&campaigns, &MetricDefaults::default(), None);
        assert_eq!(perf.total_clicks, 1500);
        assert_eq!(perf.total_conversions, 75);
        assert!((perf.conversion_rate - 5.0).abs() < 1e-9);
        assert!(perf.spend_estimated);
        assert!((perf.total_spend - 1050.0).abs() < 1e-9);
        assert!((perf.avg_cpc - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_performance_explicit_spend() {
        let campaigns = vec![Campaign::new("1", "A").with_budget(100.0, 10.0).with_engagement(200, 0)];
        let perf = PerformanceMetrics::compute(&campaigns, &MetricDefaults::default(), Some(50.0));
        assert!(!perf.spend_estimated);
        assert!((perf.avg_cpc - 0.25).abs() < 1e-9);
        assert_eq!(perf.conversion_rate, 0.0);
    }

    #[test]
    fn test_performance_empty_is_zero() {
        let perf = PerformanceMetrics::compute(&[], &MetricDefaults::default(), None);
        assert_eq!(perf.avg_ctr, 0.0);
        assert_eq!(perf.conversion_rate, 0.0);
        assert_eq!(perf.avg_cpc, 0.0);
        assert_eq!(perf.total_spend, 0.0);
    }
}
