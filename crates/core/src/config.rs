use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `CAMPAIGN_DASHBOARD__` and an optional TOML config file.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub defaults: MetricDefaultsConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// Upstream campaign API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Interval at which the server re-fetches the campaign list.
    #[serde(default = "default_revalidate_secs")]
    pub revalidate_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

/// Fallbacks substituted for missing per-campaign performance fields.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricDefaultsConfig {
    #[serde(default = "default_ctr")]
    pub ctr: f64,
    #[serde(default = "default_conversion_rate")]
    pub conversion_rate: f64,
    #[serde(default = "default_cpc")]
    pub cpc: f64,
    /// Share of the total budget assumed spent when no spend is reported.
    #[serde(default = "default_spend_ratio")]
    pub spend_ratio: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThemeConfig {
    #[serde(default = "default_theme_store_path")]
    pub store_path: String,
    /// Stand-in for the OS color-scheme preference.
    #[serde(default = "default_system_preference")]
    pub system_preference: String,
}

// Default functions
fn default_base_url() -> String {
    "https://mixo-fe-backend-task.vercel.app".to_string()
}
fn default_timeout_ms() -> u64 {
    10_000
}
fn default_revalidate_secs() -> u64 {
    60
}
fn default_user_agent() -> String {
    concat!("campaign-dashboard/", env!("CARGO_PKG_VERSION")).to_string()
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    8080
}
fn default_metrics_port() -> u16 {
    9091
}
fn default_ctr() -> f64 {
    4.42
}
fn default_conversion_rate() -> f64 {
    4.74
}
fn default_cpc() -> f64 {
    2.26
}
fn default_spend_ratio() -> f64 {
    0.30
}
fn default_theme_store_path() -> String {
    ".campaign-dashboard/theme.json".to_string()
}
fn default_system_preference() -> String {
    "light".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            revalidate_secs: default_revalidate_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: default_metrics_port(),
        }
    }
}

impl Default for MetricDefaultsConfig {
    fn default() -> Self {
        Self {
            ctr: default_ctr(),
            conversion_rate: default_conversion_rate(),
            cpc: default_cpc(),
            spend_ratio: default_spend_ratio(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            store_path: default_theme_store_path(),
            system_preference: default_system_preference(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            server: ServerConfig::default(),
            metrics: MetricsConfig::default(),
            defaults: MetricDefaultsConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and optional config file.
    pub fn load(file: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }
        let builder = builder.add_source(
            config::Environment::with_prefix("CAMPAIGN_DASHBOARD")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
