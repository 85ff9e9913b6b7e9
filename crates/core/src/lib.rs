//! Campaign dashboard core: data model, configuration, errors and theme state.

pub mod config;
pub mod error;
pub mod theme;
pub mod types;

pub use config::AppConfig;
pub use error::{CampaignError, CampaignResult};
pub use theme::{FileThemeStore, MemoryThemeStore, Theme, ThemeState, ThemeStore};
pub use types::{Campaign, CampaignResponse, CampaignStatus, CampaignsResponse, Platform};
