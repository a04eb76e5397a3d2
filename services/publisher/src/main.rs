//! Forecast gallery publisher.
//!
//! Rebuilds the static gallery under a web root:
//! - `data.js` catalog and `index.html` viewer for every run directory
//! - the landing calendar at the root
//!
//! Runs once by default, for a single run directory when one is given,
//! or periodically with `--watch`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use publisher::{load_publisher_config, run_watch, Publisher, PublisherConfig, WatchConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Json,
    Pretty,
}

#[derive(Parser, Debug)]
#[command(name = "publisher")]
#[command(about = "Publish forecast run catalogs, viewer pages and the landing calendar")]
struct Args {
    /// Publish only this run directory (skips discovery and the landing page)
    run_dir: Option<PathBuf>,

    /// Web root holding the YYYYMMDDHH run directories
    #[arg(long, env = "WEB_ROOT", default_value = "/var/www/html")]
    root: PathBuf,

    /// Publisher configuration file (YAML)
    #[arg(short, long, env = "PUBLISHER_CONFIG")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Json)]
    log_format: LogFormat,

    /// Republish periodically until interrupted
    #[arg(long, conflicts_with = "run_dir")]
    watch: bool,

    /// Seconds between publish cycles in watch mode
    #[arg(long, env = "POLL_INTERVAL_SECS", default_value = "300")]
    poll_interval_secs: u64,

    /// Parallel run rebuilds (0 = one per core, 1 = sequential)
    #[arg(long, env = "PUBLISH_JOBS", default_value = "0")]
    jobs: usize,

    /// Date the landing calendar treats as today (YYYY-MM-DD)
    #[arg(long)]
    today: Option<NaiveDate>,
}

fn init_tracing(log_level: &str, format: LogFormat) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true);

    match format {
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
        LogFormat::Pretty => tracing::subscriber::set_global_default(builder.pretty().finish())?,
    }
    Ok(())
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.log_format)?;

    info!("Starting forecast gallery publisher");

    let (config, config_dir) = match &args.config {
        Some(path) => {
            let config = load_publisher_config(path)?;
            info!(path = %path.display(), "Loaded publisher config");
            (config, path.parent().map(|p| p.to_path_buf()))
        }
        None => (PublisherConfig::default(), None),
    };
    let today = args.today.or(config.site.today);
    let publisher = Publisher::from_config(config, config_dir.as_deref())?;

    if let Some(run_dir) = &args.run_dir {
        publisher
            .publish_run(run_dir)
            .with_context(|| format!("Failed to publish run {:?}", run_dir))?;
        return Ok(());
    }

    if args.watch {
        anyhow::ensure!(args.poll_interval_secs > 0, "--poll-interval-secs must be positive");
        let watch = WatchConfig {
            root: args.root.clone(),
            interval: Duration::from_secs(args.poll_interval_secs),
            jobs: args.jobs,
            today,
        };
        let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
        return runtime.block_on(run_watch(Arc::new(publisher), watch));
    }

    let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
    let report = publisher.publish_all(&args.root, today, args.jobs)?;
    report.log_summary();

    Ok(())
}
