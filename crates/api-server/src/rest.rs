//! REST API handlers for the dashboard views, theme and operational endpoints.

use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use campaign_core::{Campaign, CampaignError, Theme};
use campaign_reporting::{next_sort_state, DashboardSnapshot, SortDirection, SortKey, SortState, TableQuery};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{error, warn};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

/// GET /health: Health check endpoint.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let set = state.campaigns.read();
    let status = match (&set.last_error, set.fetched_at) {
        (Some(_), _) => "degraded",
        (None, None) => "starting",
        (None, Some(_)) => "healthy",
    };
    Json(HealthResponse {
        status: status.to_string(),
        campaigns: set.campaigns.len(),
        last_refresh: set.fetched_at,
        last_error: set.last_error.clone(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /api/v1/dashboard: every derived view over the current list.
pub async fn dashboard(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    metrics::counter!("api.dashboard.requests").increment(1);
    let campaigns = state.campaigns();
    Json(DashboardSnapshot::build(&campaigns, &state.defaults))
}

/// GET /api/v1/campaigns?status=&sort=&order=: filtered, sorted table rows.
pub async fn list_campaigns(
    State(state): State<AppState>,
    Query(params): Query<TableParams>,
) -> ApiResult<TableResponse> {
    metrics::counter!("api.table.requests").increment(1);
    let query = params.into_query().map_err(|e| {
        warn!(error = %e, "Rejected table query");
        bad_request(e)
    })?;

    let campaigns = state.campaigns();
    let view = query.apply(&campaigns);
    Ok(Json(TableResponse {
        query,
        showing: view.showing,
        total: view.total,
        unparsable_timestamps: view.unparsable_timestamps,
        rows: view.rows.into_iter().cloned().collect(),
    }))
}

/// GET /api/v1/campaigns/:id: from the current list, else from upstream.
pub async fn get_campaign(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Campaign> {
    let cached = state
        .campaigns
        .read()
        .campaigns
        .iter()
        .find(|c| c.id == id)
        .cloned();
    if let Some(campaign) = cached {
        return Ok(Json(campaign));
    }

    match state.client.fetch_campaign(&id).await {
        Ok(campaign) => Ok(Json(campaign)),
        Err(CampaignError::NotFound(_)) => Err(error_response(
            StatusCode::NOT_FOUND,
            "campaign_not_found",
            format!("no campaign with id '{}'", id),
        )),
        Err(e) => {
            error!(error = %e, campaign_id = %id, "Upstream campaign lookup failed");
            Err(error_response(StatusCode::BAD_GATEWAY, "upstream_failed", e.to_string()))
        }
    }
}

/// GET /api/v1/sort/next?key=&current=&order=: header-click transition.
pub async fn next_sort(Query(params): Query<SortParams>) -> ApiResult<SortState> {
    let clicked: SortKey = params.key.parse().map_err(bad_request)?;
    let current: SortKey = parse_or_default(params.current.as_deref()).map_err(bad_request)?;
    let order: SortDirection = parse_or_default(params.order.as_deref()).map_err(bad_request)?;

    let (key, direction) = next_sort_state(current, order, clicked);
    Ok(Json(SortState { key, direction }))
}

/// GET /api/v1/theme
pub async fn get_theme(State(state): State<AppState>) -> Json<ThemeResponse> {
    Json(ThemeResponse {
        theme: state.theme.lock().current(),
    })
}

/// PUT /api/v1/theme
pub async fn put_theme(State(state): State<AppState>, Json(req): Json<ThemeResponse>) -> ApiResult<ThemeResponse> {
    let theme = state.theme.lock().set(req.theme).map_err(theme_failure)?;
    Ok(Json(ThemeResponse { theme }))
}

/// POST /api/v1/theme/toggle
pub async fn toggle_theme(State(state): State<AppState>) -> ApiResult<ThemeResponse> {
    let theme = state.theme.lock().toggle().map_err(theme_failure)?;
    Ok(Json(ThemeResponse { theme }))
}

/// GET /live: Liveness probe.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

fn parse_or_default<T>(raw: Option<&str>) -> Result<T, CampaignError>
where
    T: FromStr<Err = CampaignError> + Default,
{
    raw.map(str::parse).transpose().map(Option::unwrap_or_default)
}

fn bad_request(e: CampaignError) -> (StatusCode, Json<ErrorResponse>) {
    metrics::counter!("api.validation_errors").increment(1);
    error_response(StatusCode::BAD_REQUEST, "invalid_query", e.to_string())
}

fn theme_failure(e: CampaignError) -> (StatusCode, Json<ErrorResponse>) {
    error!(error = %e, "Theme store failure");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "theme_store_failed", e.to_string())
}

fn error_response(status: StatusCode, error: &str, message: String) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            message,
        }),
    )
}

// ─── Request/Response types ────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct TableParams {
    pub status: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

impl TableParams {
    pub fn into_query(self) -> Result<TableQuery, CampaignError> {
        let mut query = TableQuery::default();
        if let Some(status) = self.status.as_deref() {
            query.filter = status.parse()?;
        }
        if let Some(sort) = self.sort.as_deref() {
            query.sort.key = sort.parse()?;
        }
        if let Some(order) = self.order.as_deref() {
            query.sort.direction = order.parse()?;
        }
        Ok(query)
    }
}

#[derive(Debug, Deserialize)]
pub struct SortParams {
    pub key: String,
    pub current: Option<String>,
    pub order: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TableResponse {
    pub query: TableQuery,
    pub rows: Vec<Campaign>,
    pub showing: usize,
    pub total: usize,
    pub unparsable_timestamps: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ThemeResponse {
    pub theme: Theme,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub campaigns: usize,
    pub last_refresh: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub uptime_secs: u64,
}
