//! Campaign Dashboard: aggregates and ranks campaign data from the campaign API.
//!
//! Prints a one-shot report, serves the dashboard API, or manages the stored theme.

mod report;

use campaign_api::{ApiServer, AppState};
use campaign_client::CampaignClient;
use campaign_core::config::AppConfig;
use campaign_core::{FileThemeStore, Theme, ThemeState, ThemeStore};
use campaign_reporting::{DashboardSnapshot, MetricDefaults, SortDirection, SortKey, SortState, StatusFilter, TableQuery};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "campaign-dashboard")]
#[command(about = "Campaign aggregation and ranking dashboard")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Campaign API base URL (overrides config)
    #[arg(long, global = true, env = "CAMPAIGN_DASHBOARD__API__BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch campaigns once and print the dashboard
    Report {
        /// Status filter: all, active, paused, completed
        #[arg(long, default_value = "all")]
        status: StatusFilter,

        /// Sort column: name, budget, created_at
        #[arg(long, default_value = "created_at")]
        sort: SortKey,

        /// Sort direction: asc, desc
        #[arg(long, default_value = "desc")]
        order: SortDirection,

        /// Print the snapshot and table as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Serve the dashboard API
    Serve {
        /// HTTP port (overrides config)
        #[arg(long, env = "CAMPAIGN_DASHBOARD__SERVER__HTTP_PORT")]
        http_port: Option<u16>,
    },

    /// Show or change the stored theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
}

#[derive(Subcommand, Debug)]
enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch between light and dark
    Toggle,
    /// Store a specific theme
    Set {
        /// light or dark
        theme: Theme,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(matches!(cli.command, Commands::Serve { .. }));

    let mut config = AppConfig::load(cli.config.as_deref()).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }

    match cli.command {
        Commands::Report {
            status,
            sort,
            order,
            json,
        } => {
            let query = TableQuery {
                filter: status,
                sort: SortState { key: sort, direction: order },
            };
            run_report(&config, query, json).await
        }
        Commands::Serve { http_port } => {
            if let Some(port) = http_port {
                config.server.http_port = port;
            }
            run_server(config).await
        }
        Commands::Theme { action } => run_theme(&config, action.unwrap_or(ThemeAction::Show)),
    }
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "campaign_dashboard=info,campaign_client=info,tower_http=info".into());

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .with_writer(std::io::stderr)
            .init();
    }
}

fn system_theme(config: &AppConfig) -> Theme {
    config.theme.system_preference.parse().unwrap_or_else(|e| {
        warn!(error = %e, "Invalid system theme preference, using light");
        Theme::Light
    })
}

async fn run_report(config: &AppConfig, query: TableQuery, json: bool) -> anyhow::Result<()> {
    let client = CampaignClient::new(&config.api)?;
    let campaigns = client.load_campaigns_or_empty().await;
    let defaults = MetricDefaults::from(&config.defaults);

    let snapshot = DashboardSnapshot::build(&campaigns, &defaults);
    let table = query.apply(&campaigns);
    info!(
        campaigns = campaigns.len(),
        showing = table.showing,
        filter = %query.filter,
        "Report built"
    );

    if json {
        let body = serde_json::json!({
            "dashboard": snapshot,
            "query": query,
            "table": table,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print!("{}", report::render(&snapshot, &table)?);
    }
    Ok(())
}

async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    info!(
        upstream = %config.api.base_url,
        http_port = config.server.http_port,
        revalidate_secs = config.api.revalidate_secs,
        "Campaign Dashboard starting up"
    );

    let client = CampaignClient::new(&config.api)?;
    let store: Box<dyn ThemeStore> = Box::new(FileThemeStore::new(&config.theme.store_path));
    let theme = ThemeState::resolve(store, system_theme(&config));
    let state = AppState::new(client, MetricDefaults::from(&config.defaults), theme);

    let api_server = ApiServer::new(config.clone(), state);

    if config.metrics.enabled {
        if let Err(e) = api_server.start_metrics() {
            error!(error = %e, "Failed to start metrics exporter");
        }
    }

    // Blocks until shutdown
    api_server.start_http().await?;

    Ok(())
}

fn run_theme(config: &AppConfig, action: ThemeAction) -> anyhow::Result<()> {
    let store = FileThemeStore::new(&config.theme.store_path);
    let mut state = ThemeState::resolve(store, system_theme(config));

    let theme = match action {
        ThemeAction::Show => state.current(),
        ThemeAction::Toggle => state.toggle()?,
        ThemeAction::Set { theme } => state.set(theme)?,
    };
    println!("{theme}");
    Ok(())
}
