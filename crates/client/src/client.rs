use campaign_core::config::ApiConfig;
use campaign_core::{Campaign, CampaignError, CampaignResponse, CampaignResult, CampaignStatus, CampaignsResponse};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Client for `GET /campaigns` and `GET /campaigns/{id}`.
#[derive(Debug, Clone)]
pub struct CampaignClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CampaignClient {
    pub fn new(config: &ApiConfig) -> CampaignResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| CampaignError::Config(format!("invalid API base URL '{}': {}", config.base_url, e)))?;

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| CampaignError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// List campaigns, optionally restricted to one status upstream.
    pub async fn fetch_campaigns(&self, status: Option<&CampaignStatus>) -> CampaignResult<CampaignsResponse> {
        let mut url = self.endpoint(&["campaigns"])?;
        if let Some(status) = status {
            url.query_pairs_mut().append_pair("status", status.as_str());
        }

        let response = self.send(url.clone()).await?;
        if !response.status().is_success() {
            return Err(self.http_failure(response.status(), &url));
        }

        let body: CampaignsResponse = self.decode(response, &url).await?;
        for campaign in &body.campaigns {
            if let Err(e) = campaign.validate() {
                warn!(campaign_id = %campaign.id, error = %e, "Campaign violates data invariants");
            }
        }

        info!(count = body.campaigns.len(), total = body.total, "Campaigns fetched");
        Ok(body)
    }

    /// Fetch a single campaign; a 404 maps to [`CampaignError::NotFound`].
    pub async fn fetch_campaign(&self, id: &str) -> CampaignResult<Campaign> {
        let url = self.endpoint(&["campaigns", id])?;

        let response = self.send(url.clone()).await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(CampaignError::NotFound(id.to_string())),
            status if !status.is_success() => Err(self.http_failure(status, &url)),
            _ => {
                let body: CampaignResponse = self.decode(response, &url).await?;
                Ok(body.campaign)
            }
        }
    }

    /// Fetch all campaigns, logging and returning an empty list on failure.
    pub async fn load_campaigns_or_empty(&self) -> Vec<Campaign> {
        match self.fetch_campaigns(None).await {
            Ok(body) => body.campaigns,
            Err(e) => {
                error!(error = %e, "Failed to fetch campaigns, showing empty dashboard");
                Vec::new()
            }
        }
    }

    fn endpoint(&self, segments: &[&str]) -> CampaignResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CampaignError::Config(format!("API base URL '{}' cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, url: Url) -> CampaignResult<reqwest::Response> {
        debug!(url = %url, "Requesting campaign API");
        self.http.get(url.clone()).send().await.map_err(|e| {
            metrics::counter!("client.fetch.failures").increment(1);
            CampaignError::Fetch(format!("request to {} failed: {}", url, e))
        })
    }

    async fn decode<T: DeserializeOwned>(&self, response: reqwest::Response, url: &Url) -> CampaignResult<T> {
        response.json::<T>().await.map_err(|e| {
            metrics::counter!("client.fetch.failures").increment(1);
            CampaignError::Fetch(format!("invalid response body from {}: {}", url, e))
        })
    }

    fn http_failure(&self, status: StatusCode, url: &Url) -> CampaignError {
        metrics::counter!("client.fetch.failures").increment(1);
        warn!(status = status.as_u16(), url = %url, "Campaign API returned an error status");
        CampaignError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        }
    }
}
