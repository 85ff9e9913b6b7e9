//! Plain-text rendering of a dashboard snapshot and table view.

use campaign_reporting::format::{abbreviate, capitalize, format_currency, format_date, format_percent, format_percent_with};
use campaign_reporting::{DashboardSnapshot, TableView};
use std::fmt::Write;

pub fn render(snapshot: &DashboardSnapshot, table: &TableView<'_>) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    write_report(&mut out, snapshot, table)?;
    Ok(out)
}

fn write_report(out: &mut String, snapshot: &DashboardSnapshot, table: &TableView<'_>) -> std::fmt::Result {
    writeln!(out, "Campaign Dashboard")?;
    writeln!(out, "==================")?;

    if snapshot.is_empty() {
        writeln!(out)?;
        writeln!(out, "No campaign data available.")?;
        return Ok(());
    }

    writeln!(out)?;
    for card in snapshot.summary_cards() {
        writeln!(out, "  {:<18} {:>14}   {}", card.title, card.value, card.subtitle)?;
    }

    let perf = &snapshot.performance;
    writeln!(out)?;
    writeln!(out, "Performance")?;
    writeln!(out, "  Avg CTR:          {}", format_percent(perf.avg_ctr))?;
    writeln!(out, "  Conversion rate:  {}", format_percent(perf.conversion_rate))?;
    writeln!(out, "  Avg CPC:          ${:.2}", perf.avg_cpc)?;
    writeln!(
        out,
        "  Spend:            {}{}",
        format_currency(perf.total_spend),
        if perf.spend_estimated { " (estimated)" } else { "" }
    )?;

    writeln!(out)?;
    writeln!(out, "Status distribution")?;
    for bucket in snapshot.status.buckets() {
        writeln!(
            out,
            "  {:<10} {:>5}  {:>8}",
            capitalize(bucket.status.as_str()),
            bucket.count,
            format_percent_with(bucket.percentage, 1)
        )?;
    }
    if snapshot.status.unrecognized > 0 {
        writeln!(out, "  {:<10} {:>5}", "Other", snapshot.status.unrecognized)?;
    }

    writeln!(out)?;
    writeln!(out, "Platforms")?;
    for entry in &snapshot.platforms.entries {
        writeln!(
            out,
            "  {:<10} {:>5}  {:>8}",
            capitalize(entry.platform.as_str()),
            entry.count,
            format_percent_with(entry.share, 1)
        )?;
    }

    let engagement = &snapshot.engagement;
    writeln!(out)?;
    writeln!(
        out,
        "Engagement{}",
        if engagement.estimated { " (estimated)" } else { "" }
    )?;
    writeln!(out, "  Clicks:       {:>8}", abbreviate(engagement.clicks))?;
    writeln!(out, "  Conversions:  {:>8}", abbreviate(engagement.conversions))?;

    writeln!(out)?;
    writeln!(out, "Campaigns (showing {} of {})", table.showing, table.total)?;
    if table.is_empty() {
        writeln!(out, "  No campaigns match the current filter.")?;
        return Ok(());
    }
    writeln!(
        out,
        "  {:<28} {:<10} {:>12} {:>10}  {:<22} {}",
        "Name", "Status", "Budget", "Daily", "Platforms", "Created"
    )?;
    for campaign in &table.rows {
        let platforms: Vec<&str> = campaign.platforms.iter().map(|p| p.as_str()).collect();
        writeln!(
            out,
            "  {:<28} {:<10} {:>12} {:>10}  {:<22} {}",
            campaign.name,
            capitalize(campaign.status.as_str()),
            format_currency(campaign.budget),
            format_currency(campaign.daily_budget),
            platforms.join(", "),
            format_date(&campaign.created_at)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_core::Campaign;
    use campaign_reporting::{MetricDefaults, StatusFilter, TableQuery};

    fn campaigns() -> Vec<Campaign> {
        vec![
            Campaign::new("1", "Spring Launch")
                .with_status("active")
                .with_budget(12500.0, 400.0)
                .with_platforms(["meta", "google"])
                .with_created_at("2024-01-05T00:00:00Z"),
            Campaign::new("2", "Retargeting")
                .with_status("paused")
                .with_budget(3000.0, 100.0)
                .with_platforms(["meta"])
                .with_created_at("2024-02-10T00:00:00Z"),
        ]
    }

    #[test]
    fn test_render_full_report() {
        let campaigns = campaigns();
        let snapshot = DashboardSnapshot::build(&campaigns, &MetricDefaults::default());
        let table = TableQuery::default().apply(&campaigns);
        let text = render(&snapshot, &table).unwrap();

        assert!(text.contains("Total Budget"));
        assert!(text.contains("$15,500"));
        assert!(text.contains("Campaigns (showing 2 of 2)"));
        assert!(text.contains("Jan 5, 2024"));
        // Default sort: newest first.
        let retargeting = text.find("Retargeting").unwrap();
        let spring = text.rfind("Spring Launch").unwrap();
        assert!(retargeting < spring);
    }

    #[test]
    fn test_render_empty_state() {
        let campaigns: Vec<Campaign> = Vec::new();
        let snapshot = DashboardSnapshot::build(&campaigns, &MetricDefaults::default());
        let table = TableQuery::default().apply(&campaigns);
        let text = render(&snapshot, &table).unwrap();
        assert!(text.contains("No campaign data available."));
        assert!(!text.contains("Status distribution"));
    }

    #[test]
    fn test_render_filtered_to_nothing() {
        let campaigns = campaigns();
        let snapshot = DashboardSnapshot::build(&campaigns, &MetricDefaults::default());
        let query = TableQuery {
            filter: StatusFilter::Completed,
            ..TableQuery::default()
        };
        let text = render(&snapshot, &query.apply(&campaigns)).unwrap();
        assert!(text.contains("showing 0 of 2"));
        assert!(text.contains("No campaigns match"));
    }
}
