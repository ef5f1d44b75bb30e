//! ServerInfo - terminal front-end for a server metrics endpoint
//!
//! Polls the endpoint for two screens and prints them as they change:
//! - Hardware: CPU, RAM, storage and network, every 5s
//! - System: distribution, kernel, uptime and CPU identity, every 1s
//!
//! The endpoint address comes from the config file, `--url`, or the setup
//! wizard on first launch.

mod config;
mod terminal;
mod wizard;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use config::{ApiAddressManager, AppConfig};
use serde::Serialize;
use serverinfo_core::{
    EndpointResolver, HardwareView, HttpFetcher, Labels, Poller, PollerHandle, RenderTarget,
    SnapshotSource, SystemView, TickOutcome, ViewUpdater,
};
use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;
use terminal::ScreenText;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wizard::SetupWizard;

#[derive(Parser)]
#[command(
    name = "serverinfo",
    about = "Live hardware and system info from a metrics endpoint",
    version,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Screens to show
    #[arg(value_enum, default_value_t = ScreenChoice::Both)]
    screens: ScreenChoice,

    /// Endpoint URL for this run, overrides the configured address
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Fetch and print each screen once, then exit
    #[arg(long)]
    once: bool,

    /// With --once, print the widget model as JSON
    #[arg(long, requires = "once")]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive first-run configuration
    Setup,
    /// Save the endpoint address without prompting
    SetAddress {
        #[arg(value_name = "URL")]
        url: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ScreenChoice {
    Hardware,
    System,
    Both,
}

impl ScreenChoice {
    fn hardware(self) -> bool {
        matches!(self, ScreenChoice::Hardware | ScreenChoice::Both)
    }

    fn system(self) -> bool {
        matches!(self, ScreenChoice::System | ScreenChoice::Both)
    }
}

/// Shared pieces every screen's poller is built from
struct Pipeline {
    source: Arc<dyn SnapshotSource>,
    resolver: Arc<dyn EndpointResolver>,
    labels: Arc<Labels>,
}

impl Pipeline {
    fn poller<V: ViewUpdater>(&self, view: V, period: Duration) -> Poller<V> {
        Poller::new(
            Arc::clone(&self.source),
            Arc::clone(&self.resolver),
            RenderTarget::new(view),
        )
        .with_period(period)
        .with_labels(Arc::clone(&self.labels))
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("serverinfo=info,serverinfo_core=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let path = AppConfig::config_file_path()?;
    let config = AppConfig::load_from(&path)
        .await
        .context("Failed to load configuration")?;
    let manager = Arc::new(ApiAddressManager::new(config, path));

    match cli.command {
        Some(Command::Setup) => {
            SetupWizard::stdio().run(&manager).await?;
            return Ok(());
        }
        Some(Command::SetAddress { url }) => {
            manager
                .set_address(url)
                .await
                .context("Failed to save endpoint address")?;
            println!("✅ Endpoint address saved to {}", manager.path().display());
            return Ok(());
        }
        None => {}
    }

    if let Some(url) = cli.url {
        manager.override_address(url);
    } else if !manager.config().has_address() && std::io::stdin().is_terminal() {
        info!("No endpoint configured, starting setup wizard");
        SetupWizard::stdio().run(&manager).await?;
    }

    let config = manager.config();
    if !config.has_address() {
        warn!("⚠️ No endpoint address configured, every fetch will fail until one is set");
    }

    let fetcher = HttpFetcher::with_timeout(config.polling.request_timeout())
        .context("Failed to build HTTP client")?;
    let pipeline = Pipeline {
        source: Arc::new(fetcher),
        resolver: manager.clone(),
        labels: Arc::new(config.labels.clone()),
    };

    info!("🖥️ ServerInfo starting on {}", manager.api_address());

    if cli.once {
        run_once(&pipeline, cli.screens, cli.json, &config).await
    } else {
        run_until_interrupted(&pipeline, cli.screens, &config).await
    }
}

/// One fetch+render per selected screen
async fn run_once(
    pipeline: &Pipeline,
    screens: ScreenChoice,
    json: bool,
    config: &AppConfig,
) -> Result<()> {
    let mut failures = Vec::new();

    if screens.hardware() {
        let poller = pipeline.poller(HardwareView::default(), config.polling.hardware_period());
        if let Err(outcome) = print_once(&poller, json).await? {
            failures.push(format!("{}: {:?}", HardwareView::SCREEN, outcome));
        }
    }

    if screens.system() {
        let poller = pipeline.poller(SystemView::default(), config.polling.system_period());
        if let Err(outcome) = print_once(&poller, json).await? {
            failures.push(format!("{}: {:?}", SystemView::SCREEN, outcome));
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("Nothing rendered for {}", failures.join(", "))
    }
}

async fn print_once<V>(poller: &Poller<V>, json: bool) -> Result<Result<(), TickOutcome>>
where
    V: ViewUpdater + ScreenText + Serialize,
{
    let outcome = poller.tick().await;
    if outcome != TickOutcome::Rendered {
        return Ok(Err(outcome));
    }

    let text = if json {
        poller
            .target()
            .read(|view| serde_json::to_string_pretty(view))
            .transpose()
            .context("Failed to serialize view")?
    } else {
        poller.target().read(terminal::screen_block)
    };

    if let Some(text) = text {
        terminal::print_block(&text);
    }
    Ok(Ok(()))
}

/// Run the selected screens until Ctrl-C, then tear them down
async fn run_until_interrupted(
    pipeline: &Pipeline,
    screens: ScreenChoice,
    config: &AppConfig,
) -> Result<()> {
    let mut followers: Vec<JoinHandle<()>> = Vec::new();

    let mut hardware: Option<PollerHandle<HardwareView>> = None;
    if screens.hardware() {
        let handle = pipeline
            .poller(HardwareView::default(), config.polling.hardware_period())
            .spawn();
        followers.push(tokio::spawn(terminal::follow(handle.target().clone())));
        hardware = Some(handle);
    }

    let mut system: Option<PollerHandle<SystemView>> = None;
    if screens.system() {
        let handle = pipeline
            .poller(SystemView::default(), config.polling.system_period())
            .spawn();
        followers.push(tokio::spawn(terminal::follow(handle.target().clone())));
        system = Some(handle);
    }

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    info!("🛑 Interrupted, stopping pollers");

    if let Some(mut handle) = hardware {
        handle.cancel();
        info!(screen = HardwareView::SCREEN, stats = ?handle.stats(), "Screen closed");
    }
    if let Some(mut handle) = system {
        handle.cancel();
        info!(screen = SystemView::SCREEN, stats = ?handle.stats(), "Screen closed");
    }

    for follower in followers {
        if let Err(e) = follower.await {
            warn!("Terminal renderer ended abnormally: {}", e);
        }
    }

    Ok(())
}
