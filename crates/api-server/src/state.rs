//! Shared state for the dashboard API.

use campaign_client::CampaignClient;
use campaign_core::{Campaign, ThemeState, ThemeStore};
use campaign_reporting::MetricDefaults;
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::time::Instant;

pub type SharedThemeState = ThemeState<Box<dyn ThemeStore>>;

/// Most recent campaign list pulled from upstream.
#[derive(Debug, Clone, Default)]
pub struct CampaignSet {
    pub campaigns: Vec<Campaign>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

/// Application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<CampaignClient>,
    pub defaults: MetricDefaults,
    pub campaigns: Arc<RwLock<CampaignSet>>,
    pub theme: Arc<Mutex<SharedThemeState>>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(client: CampaignClient, defaults: MetricDefaults, theme: SharedThemeState) -> Self {
        Self {
            client: Arc::new(client),
            defaults,
            campaigns: Arc::new(RwLock::new(CampaignSet::default())),
            theme: Arc::new(Mutex::new(theme)),
            start_time: Instant::now(),
        }
    }

    /// Copy of the current campaign list.
    pub fn campaigns(&self) -> Vec<Campaign> {
        self.campaigns.read().campaigns.clone()
    }

    pub fn replace_campaigns(&self, campaigns: Vec<Campaign>) {
        let mut set = self.campaigns.write();
        set.campaigns = campaigns;
        set.fetched_at = Some(Utc::now());
        set.last_error = None;
    }

    pub fn record_refresh_error(&self, error: String) {
        self.campaigns.write().last_error = Some(error);
    }
}
