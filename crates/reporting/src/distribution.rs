//! Status and platform distributions, plus the pie-chart angle layout.

use crate::percentage;
use campaign_core::{Campaign, CampaignStatus, Platform};
use serde::{Deserialize, Serialize};

/// Angle (degrees) where the first pie slice starts: 12 o'clock.
pub const PIE_START_ANGLE: f64 = -90.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusBucket {
    pub status: CampaignStatus,
    pub count: usize,
    /// Share of all campaigns, in percent.
    pub percentage: f64,
}

impl StatusBucket {
    fn empty(status: CampaignStatus) -> Self {
        Self {
            status,
            count: 0,
            percentage: 0.0,
        }
    }
}

/// Campaign counts per status.
///
/// Campaigns with an unrecognized status count towards `total` but land in
/// none of the named buckets; they are tallied in `unrecognized` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusDistribution {
    pub total: usize,
    pub active: StatusBucket,
    pub paused: StatusBucket,
    pub completed: StatusBucket,
    pub unrecognized: usize,
}

impl StatusDistribution {
    pub fn compute(campaigns: &[Campaign]) -> Self {
        let mut dist = Self {
            total: campaigns.len(),
            active: StatusBucket::empty(CampaignStatus::Active),
            paused: StatusBucket::empty(CampaignStatus::Paused),
            completed: StatusBucket::empty(CampaignStatus::Completed),
            unrecognized: 0,
        };

        for campaign in campaigns {
            match campaign.status {
                CampaignStatus::Active => dist.active.count += 1,
                CampaignStatus::Paused => dist.paused.count += 1,
                CampaignStatus::Completed => dist.completed.count += 1,
                CampaignStatus::Unrecognized(_) => dist.unrecognized += 1,
            }
        }

        let total = dist.total as f64;
        for bucket in [&mut dist.active, &mut dist.paused, &mut dist.completed] {
            bucket.percentage = percentage(bucket.count as f64, total);
        }
        dist
    }

    /// Named buckets in display order: active, paused, completed.
    pub fn buckets(&self) -> [&StatusBucket; 3] {
        [&self.active, &self.paused, &self.completed]
    }

    pub fn unrecognized_ratio(&self) -> f64 {
        percentage(self.unrecognized as f64, self.total as f64) / 100.0
    }

    /// Contiguous clockwise slices starting at 12 o'clock.
    pub fn pie_slices(&self) -> Vec<PieSlice> {
        let mut angle = PIE_START_ANGLE;
        self.buckets()
            .into_iter()
            .map(|bucket| {
                let sweep = bucket.percentage / 100.0 * 360.0;
                let slice = PieSlice {
                    status: bucket.status.clone(),
                    start_angle: angle,
                    sweep,
                    end_angle: angle + sweep,
                };
                angle += sweep;
                slice
            })
            .collect()
    }
}

/// One sector of the status pie chart, angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub status: CampaignStatus,
    pub start_angle: f64,
    pub sweep: f64,
    pub end_angle: f64,
}

impl PieSlice {
    /// SVG large-arc flag.
    pub fn large_arc(&self) -> bool {
        self.sweep > 180.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformShare {
    pub platform: Platform,
    /// Number of campaigns carrying this tag.
    pub count: usize,
    /// Share of all recognized platform mentions, in percent.
    pub share: f64,
}

/// "Contains" counts per platform tag.
///
/// A campaign on several platforms increments several entries, so counts may
/// sum to more than the number of campaigns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformDistribution {
    /// Sorted by count descending; ties keep first-encountered order.
    pub entries: Vec<PlatformShare>,
    pub total_mentions: usize,
    pub unrecognized: usize,
}

impl PlatformDistribution {
    pub fn compute(campaigns: &[Campaign]) -> Self {
        let mut entries: Vec<PlatformShare> = Vec::new();
        let mut unrecognized = 0;

        // Repeated tags within one campaign count once.
        let tags = campaigns.iter().flat_map(|c| {
            c.platforms
                .iter()
                .enumerate()
                .filter(move |(i, p)| !c.platforms[..*i].contains(p))
                .map(|(_, p)| p)
        });

        for platform in tags {
            if !platform.is_recognized() {
                unrecognized += 1;
                continue;
            }
            match entries.iter_mut().find(|e| &e.platform == platform) {
                Some(entry) => entry.count += 1,
                None => entries.push(PlatformShare {
                    platform: platform.clone(),
                    count: 1,
                    share: 0.0,
                }),
            }
        }

        let total_mentions: usize = entries.iter().map(|e| e.count).sum();
        for entry in &mut entries {
            entry.share = percentage(entry.count as f64, total_mentions as f64);
        }
        entries.sort_by(|a, b| b.count.cmp(&a.count));

        Self {
            entries,
            total_mentions,
            unrecognized,
        }
    }

    pub fn count(&self, platform: &Platform) -> usize {
        self.entries
            .iter()
            .find(|e| &e.platform == platform)
            .map_or(0, |e| e.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Campaign> {
        vec![
            Campaign::new("1", "A").with_status("active").with_platforms(["meta"]),
            Campaign::new("2", "B").with_status("paused").with_platforms(["google", "meta"]),
            Campaign::new("3", "C").with_status("completed").with_platforms(["linkedin"]),
        ]
    }

    #[test]
    fn test_status_distribution_counts() {
        let dist = StatusDistribution::compute(&sample());
        assert_eq!(dist.total, 3);
        assert_eq!(dist.active.count, 1);
        assert_eq!(dist.paused.count, 1);
        assert_eq!(dist.completed.count, 1);
        assert_eq!(dist.unrecognized, 0);
        let sum: f64 = dist.buckets().iter().map(|b| b.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_unrecognized_status_excluded_from_buckets() {
        let mut campaigns = sample();
        campaigns.push(Campaign::new("4", "D").with_status("archived"));
        let dist = StatusDistribution::compute(&campaigns);

        let named: usize = dist.buckets().iter().map(|b| b.count).sum();
        assert_eq!(named + dist.unrecognized, dist.total);
        assert_eq!(dist.unrecognized, 1);

        let sum: f64 = dist.buckets().iter().map(|b| b.percentage).sum();
        assert!((sum - 100.0 * (1.0 - dist.unrecognized_ratio())).abs() < 1e-9);
        assert!((sum - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_status_distribution_empty() {
        let dist = StatusDistribution::compute(&[]);
        assert!(dist.buckets().iter().all(|b| b.count == 0 && b.percentage == 0.0));
        assert_eq!(dist.unrecognized_ratio(), 0.0);
        assert!(dist.pie_slices().iter().all(|s| s.sweep == 0.0));
    }

    #[test]
    fn test_pie_slices_layout() {
        let campaigns = vec![
            Campaign::new("1", "A").with_status("active"),
            Campaign::new("2", "B").with_status("active"),
            Campaign::new("3", "C").with_status("paused"),
            Campaign::new("4", "D").with_status("completed"),
        ];
        let slices = StatusDistribution::compute(&campaigns).pie_slices();

        assert_eq!(slices.len(), 3);
        assert_eq!(slices[0].status, CampaignStatus::Active);
        assert!((slices[0].start_angle + 90.0).abs() < 1e-9);
        assert!((slices[0].sweep - 180.0).abs() < 1e-9);
        assert!(!slices[0].large_arc());
        assert_eq!(slices[1].status, CampaignStatus::Paused);
        assert!((slices[1].start_angle - 90.0).abs() < 1e-9);
        assert!((slices[2].start_angle - 180.0).abs() < 1e-9);
        assert!((slices[2].end_angle - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_platform_distribution_contains_counts() {
        let campaigns = sample();
        let dist = PlatformDistribution::compute(&campaigns);

        assert_eq!(dist.count(&Platform::Meta), 2);
        assert_eq!(dist.count(&Platform::Google), 1);
        assert_eq!(dist.count(&Platform::Linkedin), 1);
        assert_eq!(dist.count(&Platform::Other), 0);
        assert_eq!(dist.total_mentions, 4);
        assert!(dist.total_mentions >= campaigns.len());

        let order: Vec<_> = dist.entries.iter().map(|e| e.platform.clone()).collect();
        assert_eq!(order, vec![Platform::Meta, Platform::Google, Platform::Linkedin]);
        assert!((dist.entries[0].share - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_platform_ties_keep_first_encountered_order() {
        let campaigns = vec![
            Campaign::new("1", "A").with_platforms(["linkedin"]),
            Campaign::new("2", "B").with_platforms(["other", "google"]),
            Campaign::new("3", "C").with_platforms(["google"]),
        ];
        let dist = PlatformDistribution::compute(&campaigns);
        let order: Vec<_> = dist.entries.iter().map(|e| e.platform.as_str().to_string()).collect();
        assert_eq!(order, vec!["google", "linkedin", "other"]);
    }

    #[test]
    fn test_platform_single_tag_sum_equals_count() {
        let campaigns = vec![
            Campaign::new("1", "A").with_platforms(["meta"]),
            Campaign::new("2", "B").with_platforms(["google"]),
        ];
        let dist = PlatformDistribution::compute(&campaigns);
        assert_eq!(dist.total_mentions, campaigns.len());
    }

    #[test]
    fn test_repeated_tag_counts_campaign_once() {
        let campaigns = vec![
            Campaign::new("1", "A").with_platforms(["meta", "meta"]),
            Campaign::new("2", "B").with_platforms(["google"]),
        ];
        let dist = PlatformDistribution::compute(&campaigns);
        assert_eq!(dist.count(&Platform::Meta), 1);
        assert_eq!(dist.count(&Platform::Google), 1);
        assert_eq!(dist.total_mentions, 2);
        assert!((dist.entries[0].share - 50.0).abs() < 1e-9);
        assert_eq!(dist.entries[0].platform, Platform::Meta);
    }

    #[test]
    fn test_unrecognized_platforms_are_dropped() {
        let campaigns = vec![Campaign::new("1", "A").with_platforms(["tiktok", "meta"])];
        let dist = PlatformDistribution::compute(&campaigns);
        assert_eq!(dist.entries.len(), 1);
        assert_eq!(dist.unrecognized, 1);
        assert_eq!(dist.total_mentions, 1);
    }
}
