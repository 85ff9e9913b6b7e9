//! Filter + sort engine behind the campaign table.

use campaign_core::{Campaign, CampaignError, CampaignStatus};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

// ─── Query state ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Paused,
    Completed,
}

impl StatusFilter {
    pub fn matches(self, status: &CampaignStatus) -> bool {
        match self {
            Self::All => true,
            Self::Active => *status == CampaignStatus::Active,
            Self::Paused => *status == CampaignStatus::Paused,
            Self::Completed => *status == CampaignStatus::Completed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Completed => "completed",
        }
    }

    /// The status to send upstream, `None` for `All`.
    pub fn as_status(self) -> Option<CampaignStatus> {
        match self {
            Self::All => None,
            Self::Active => Some(CampaignStatus::Active),
            Self::Paused => Some(CampaignStatus::Paused),
            Self::Completed => Some(CampaignStatus::Completed),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = CampaignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            "completed" => Ok(Self::Completed),
            other => Err(CampaignError::Validation(format!(
                "unknown status filter '{other}' (expected all, active, paused or completed)"
            ))),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    Budget,
    #[default]
    CreatedAt,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Budget => "budget",
            Self::CreatedAt => "created_at",
        }
    }
}

impl FromStr for SortKey {
    type Err = CampaignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "budget" => Ok(Self::Budget),
            "created_at" => Ok(Self::CreatedAt),
            other => Err(CampaignError::Validation(format!(
                "unknown sort key '{other}' (expected name, budget or created_at)"
            ))),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    fn orient(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = CampaignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(CampaignError::Validation(format!(
                "unknown sort direction '{other}' (expected asc or desc)"
            ))),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Active sort column and direction. Defaults to newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortState {
    /// State after the user clicks the `clicked` column header.
    pub fn toggle(self, clicked: SortKey) -> Self {
        let (key, direction) = next_sort_state(self.key, self.direction, clicked);
        Self { key, direction }
    }
}

/// Clicking the active column flips direction; clicking another column
/// selects it in descending order.
pub fn next_sort_state(
    current_key: SortKey,
    current_direction: SortDirection,
    clicked_key: SortKey,
) -> (SortKey, SortDirection) {
    if clicked_key == current_key {
        (current_key, current_direction.flip())
    } else {
        (clicked_key, SortDirection::Desc)
    }
}

/// Complete table query: status filter plus sort state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableQuery {
    #[serde(default)]
    pub filter: StatusFilter,
    #[serde(default)]
    pub sort: SortState,
}

impl TableQuery {
    pub fn apply<'a, I>(&self, campaigns: I) -> TableView<'a>
    where
        I: IntoIterator<Item = &'a Campaign>,
    {
        apply(campaigns, self.filter, self.sort.key, self.sort.direction)
    }
}

// ─── Engine ─────────────────────────────────────────────────────────────

/// Filtered, ordered rows borrowed from the input ("showing N of M").
#[derive(Debug, Clone, Serialize)]
pub struct TableView<'a> {
    pub rows: Vec<&'a Campaign>,
    pub showing: usize,
    pub total: usize,
    /// Rows whose `created_at` did not parse when sorting by creation date.
    /// They are placed after every parsable row in either direction.
    pub unparsable_timestamps: usize,
}

impl TableView<'_> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.rows.iter().map(|c| c.id.as_str()).collect()
    }
}

/// Filter by status, then stable-sort by `key` in `direction`.
pub fn apply<'a, I>(
    campaigns: I,
    filter: StatusFilter,
    key: SortKey,
    direction: SortDirection,
) -> TableView<'a>
where
    I: IntoIterator<Item = &'a Campaign>,
{
    let mut total = 0;
    let mut retained = Vec::new();
    for campaign in campaigns {
        total += 1;
        if filter.matches(&campaign.status) {
            retained.push(campaign);
        }
    }

    let (rows, unparsable_timestamps) = match key {
        SortKey::Name => sort_rows(retained, direction, |c| Some(c.name.to_lowercase()), Ord::cmp),
        SortKey::Budget => sort_rows(retained, direction, |c| Some(c.budget), f64::total_cmp),
        SortKey::CreatedAt => sort_rows(retained, direction, Campaign::created_at_millis, Ord::cmp),
    };

    if unparsable_timestamps > 0 {
        debug!(count = unparsable_timestamps, "Campaigns with unparsable created_at sorted last");
    }

    TableView {
        showing: rows.len(),
        rows,
        total,
        unparsable_timestamps,
    }
}

/// Stable sort on a precomputed key; rows without a key go last.
fn sort_rows<'a, K>(
    rows: Vec<&'a Campaign>,
    direction: SortDirection,
    key: impl Fn(&Campaign) -> Option<K>,
    compare: impl Fn(&K, &K) -> Ordering,
) -> (Vec<&'a Campaign>, usize) {
    let mut keyed: Vec<(Option<K>, &'a Campaign)> = rows.into_iter().map(|c| (key(c), c)).collect();
    let missing = keyed.iter().filter(|(k, _)| k.is_none()).count();

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => direction.orient(compare(a, b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    (keyed.into_iter().map(|(_, c)| c).collect(), missing)
}
