//! API server: builds the router, serves HTTP and the optional metrics exporter.

use crate::refresh::spawn_refresh_task;
use crate::rest;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use campaign_core::config::AppConfig;
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Dashboard routes over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Dashboard views
        .route("/api/v1/dashboard", get(rest::dashboard))
        .route("/api/v1/campaigns", get(rest::list_campaigns))
        .route("/api/v1/campaigns/:id", get(rest::get_campaign))
        .route("/api/v1/sort/next", get(rest::next_sort))
        // Theme
        .route("/api/v1/theme", get(rest::get_theme).put(rest::put_theme))
        .route("/api/v1/theme/toggle", post(rest::toggle_theme))
        // Operational endpoints
        .route("/health", get(rest::health_check))
        .route("/live", get(rest::liveness))
        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// HTTP server for the dashboard API.
pub struct ApiServer {
    config: AppConfig,
    state: AppState,
}

impl ApiServer {
    pub fn new(config: AppConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Start background revalidation and serve HTTP until shutdown.
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let refresh = spawn_refresh_task(
            self.state.clone(),
            Duration::from_secs(self.config.api.revalidate_secs),
        );

        let addr = SocketAddr::new(self.config.server.host.parse()?, self.config.server.http_port);
        info!(addr = %addr, upstream = %self.state.client.base_url(), "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        let result = axum::serve(listener, router(self.state.clone())).await;
        refresh.abort();
        result?;

        Ok(())
    }

    /// Start the Prometheus exporter on a separate port.
    pub fn start_metrics(&self) -> anyhow::Result<()> {
        metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(SocketAddr::new(
                self.config.server.host.parse()?,
                self.config.metrics.port,
            ))
            .install()?;

        info!(port = self.config.metrics.port, "Metrics exporter started");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::{ErrorResponse, TableResponse, ThemeResponse};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use campaign_client::CampaignClient;
    use campaign_core::config::ApiConfig;
    use campaign_core::{Campaign, MemoryThemeStore, Theme, ThemeState, ThemeStore};
    use campaign_reporting::{DashboardSnapshot, MetricDefaults, SortKey, SortState};
    use serde::de::DeserializeOwned;
    use tower::ServiceExt;

    fn state() -> AppState {
        // Nothing listens on port 9; upstream lookups fail fast.
        let client = CampaignClient::new(&ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_ms: 500,
            ..ApiConfig::default()
        })
        .unwrap();
        let store: Box<dyn ThemeStore> = Box::new(MemoryThemeStore::default());
        let theme = ThemeState::resolve(store, Theme::Light);
        let state = AppState::new(client, MetricDefaults::default(), theme);
        state.replace_campaigns(vec![
            Campaign::new("1", "Alpha")
                .with_status("active")
                .with_budget(1000.0, 100.0)
                .with_platforms(["meta"])
                .with_created_at("2024-01-10T00:00:00Z"),
            Campaign::new("2", "Bravo")
                .with_status("paused")
                .with_budget(2000.0, 200.0)
                .with_platforms(["google", "meta"])
                .with_created_at("2024-03-05T00:00:00Z"),
            Campaign::new("3", "Charlie")
                .with_status("completed")
                .with_budget(500.0, 50.0)
                .with_platforms(["linkedin"])
                .with_created_at("2023-12-24T00:00:00Z"),
        ]);
        state
    }

    async fn call<T: DeserializeOwned>(app: Router, request: Request<Body>) -> (StatusCode, T) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_dashboard_endpoint() {
        let (status, snapshot): (_, DashboardSnapshot) = call(router(state()), get_req("/api/v1/dashboard")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(snapshot.summary.total_count, 3);
        assert!((snapshot.summary.total_budget - 3500.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_table_default_and_filtered() {
        let app = router(state());
        let (_, table): (_, TableResponse) = call(app.clone(), get_req("/api/v1/campaigns")).await;
        let ids: Vec<_> = table.rows.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1", "3"]);
        assert_eq!(table.total, 3);

        let (_, table): (_, TableResponse) =
            call(app, get_req("/api/v1/campaigns?status=paused&sort=name&order=asc")).await;
        assert_eq!(table.showing, 1);
        assert_eq!(table.rows[0].id, "2");
        assert_eq!(table.query.sort.key, SortKey::Name);
    }

    #[tokio::test]
    async fn test_table_rejects_bad_query() {
        let (status, body): (_, ErrorResponse) =
            call(router(state()), get_req("/api/v1/campaigns?sort=clicks")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "invalid_query");
    }

    #[tokio::test]
    async fn test_campaign_lookup() {
        let app = router(state());
        let (status, campaign): (_, Campaign) = call(app.clone(), get_req("/api/v1/campaigns/3")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(campaign.name, "Charlie");

        let (status, body): (_, ErrorResponse) = call(app, get_req("/api/v1/campaigns/missing")).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body.error, "upstream_failed");
    }

    #[tokio::test]
    async fn test_next_sort_transition() {
        let app = router(state());
        let (_, next): (_, SortState) =
            call(app.clone(), get_req("/api/v1/sort/next?key=created_at&current=created_at&order=desc")).await;
        assert_eq!(next.key, SortKey::CreatedAt);
        assert_eq!(next.direction.as_str(), "asc");

        let (_, next): (_, SortState) = call(app, get_req("/api/v1/sort/next?key=budget")).await;
        assert_eq!(next.key, SortKey::Budget);
        assert_eq!(next.direction.as_str(), "desc");
    }

    #[tokio::test]
    async fn test_theme_endpoints() {
        let app = router(state());
        let (_, theme): (_, ThemeResponse) = call(app.clone(), get_req("/api/v1/theme")).await;
        assert_eq!(theme.theme, Theme::Light);

        let toggle = Request::post("/api/v1/theme/toggle").body(Body::empty()).unwrap();
        let (_, theme): (_, ThemeResponse) = call(app.clone(), toggle).await;
        assert_eq!(theme.theme, Theme::Dark);

        let put = Request::put("/api/v1/theme")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"theme":"light"}"#))
            .unwrap();
        let (status, theme): (_, ThemeResponse) = call(app, put).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(theme.theme, Theme::Light);
    }
}
