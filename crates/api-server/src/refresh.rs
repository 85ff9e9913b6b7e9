//! Periodic revalidation of the campaign list.

use crate::state::AppState;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Fetch once and swap the list in; a failure keeps the previous list.
pub async fn refresh_once(state: &AppState) -> bool {
    match state.client.fetch_campaigns(None).await {
        Ok(body) => {
            let count = body.campaigns.len();
            state.replace_campaigns(body.campaigns);
            metrics::counter!("api.refresh.success").increment(1);
            info!(count, "Campaign list refreshed");
            true
        }
        Err(e) => {
            warn!(error = %e, "Campaign refresh failed, keeping previous list");
            metrics::counter!("api.refresh.failures").increment(1);
            state.record_refresh_error(e.to_string());
            false
        }
    }
}

/// Refresh immediately, then every `interval` (at least one second).
pub fn spawn_refresh_task(state: AppState, interval: Duration) -> JoinHandle<()> {
    let interval = interval.max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            refresh_once(&state).await;
        }
    })
}
