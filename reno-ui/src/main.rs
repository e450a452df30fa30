use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use tracing::{debug, info, warn};

use reno_core::Session;
use reno_core::analysis::SerializedGateway;
use reno_gemini::GeminiGateway;
use reno_ui::app::{self, RenoApp};
use reno_ui::config::{AppConfig, ConfigOverrides};
use reno_ui::{APP_TITLE, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Renovation cost estimator for residential investment properties.
///
/// Opens the configured store, restores the last property and estimate,
/// and starts the desktop window.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Settings file. Defaults to `renovation.toml` in the working
    /// directory when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Storage backend to use (`sqlite` or `memory`).
    #[arg(long)]
    backend: Option<String>,

    /// File holding the saved property and estimate (e.g. `renovation.db`),
    /// or `:memory:` to keep nothing between runs.
    #[arg(long)]
    db: Option<String>,

    /// Log filter, e.g. `debug` or `reno_core=trace`.
    #[arg(long)]
    log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_overrides(ConfigOverrides {
        backend: cli.backend,
        db: cli.db,
        log_level: cli.log_level,
        log_file: cli.log_file,
    });

    let log_control = logging::init_logging(&config.logging);
    info!(version = env!("CARGO_PKG_VERSION"), "starting");

    // eframe owns the main thread, so the runtime is built by hand.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("reno-runtime")
        .build()
        .context("failed to start async runtime")?;

    let store_config = config.store_config();
    debug!(store = %store_config, "opening storage");
    let persistence = runtime
        .block_on(app::build_registry().open(&store_config))
        .with_context(|| format!("failed to open the {store_config}"))?;
    let session = runtime.block_on(Session::open(persistence));

    let gemini = GeminiGateway::new(config.gemini_config(|name| std::env::var(name).ok()))
        .context("failed to create analysis client")?;
    if !gemini.is_configured() {
        warn!(
            env = %config.analysis.api_key_env,
            "no API key found; analysis will show the fallback text"
        );
    }
    let gateway = Arc::new(SerializedGateway::new(Arc::new(gemini)));

    let app = RenoApp::new(
        session,
        gateway,
        runtime.handle().clone(),
        config.export.directory.clone(),
    )
    .with_logging(log_control);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 760.0])
            .with_min_inner_size([720.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        native_options,
        Box::new(move |_creation_context| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("window error: {e}"))?;

    info!("shutting down");
    drop(runtime);
    Ok(())
}
