//! Campaign dashboard snapshot: every derived view over one campaign list.

use crate::defaults::MetricDefaults;
use crate::distribution::{PieSlice, PlatformDistribution, StatusDistribution};
use crate::engagement::EngagementChart;
use crate::format::{format_currency, format_percent_with};
use crate::summary::{PerformanceMetrics, SummaryMetrics};
use campaign_core::Campaign;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether there is anything to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataState {
    /// No campaigns, either because none exist or the fetch failed.
    Empty,
    Ready,
}

/// A headline card: title, big value, small subtitle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryCard {
    pub title: String,
    pub value: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub state: DataState,
    pub summary: SummaryMetrics,
    pub performance: PerformanceMetrics,
    pub status: StatusDistribution,
    pub status_slices: Vec<PieSlice>,
    pub platforms: PlatformDistribution,
    pub engagement: EngagementChart,
    pub generated_at: DateTime<Utc>,
}

impl DashboardSnapshot {
    pub fn build(campaigns: &[Campaign], defaults: &MetricDefaults) -> Self {
        let status = StatusDistribution::compute(campaigns);
        Self {
            state: if campaigns.is_empty() {
                DataState::Empty
            } else {
                DataState::Ready
            },
            summary: SummaryMetrics::compute(campaigns),
            performance: PerformanceMetrics::compute(campaigns, defaults, None),
            status_slices: status.pie_slices(),
            status,
            platforms: PlatformDistribution::compute(campaigns),
            engagement: EngagementChart::compute(campaigns),
            generated_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.state == DataState::Empty
    }

    pub fn summary_cards(&self) -> Vec<SummaryCard> {
        let s = &self.summary;
        vec![
            SummaryCard {
                title: "Total Campaigns".to_string(),
                value: s.total_count.to_string(),
                subtitle: format!("{} active", s.active_count),
            },
            SummaryCard {
                title: "Active Campaigns".to_string(),
                value: s.active_count.to_string(),
                subtitle: format!("{} of total", format_percent_with(s.active_ratio, 1)),
            },
            SummaryCard {
                title: "Total Budget".to_string(),
                value: format_currency(s.total_budget),
                subtitle: format!("{} daily", format_currency(s.total_daily_budget)),
            },
            SummaryCard {
                title: "Active Budget".to_string(),
                value: format_currency(s.active_budget),
                subtitle: format!("{} of total", format_percent_with(s.active_budget_ratio, 1)),
            },
        ]
    }
}
