//! Periodic republishing.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDate;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

use crate::publish::{BatchReport, Publisher};

/// Settings of the watch loop.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub root: PathBuf,
    pub interval: Duration,
    pub jobs: usize,
    /// Fixed date for the landing calendar; the local date otherwise.
    pub today: Option<NaiveDate>,
}

impl WatchConfig {
    fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

/// Republish every `config.interval` until Ctrl-C.
pub async fn run_watch(publisher: Arc<Publisher>, config: WatchConfig) -> Result<()> {
    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("Received shutdown signal");
    };
    run_watch_until(publisher, config, shutdown).await?;
    Ok(())
}

/// Republish every `config.interval` until `shutdown` resolves.
///
/// The first cycle runs immediately. A failing cycle (including a
/// missing root) is logged and retried on the next tick. Returns the
/// number of completed cycles.
pub async fn run_watch_until<F>(
    publisher: Arc<Publisher>,
    config: WatchConfig,
    shutdown: F,
) -> Result<usize>
where
    F: Future<Output = ()>,
{
    info!(
        root = %config.root.display(),
        interval_secs = config.interval.as_secs(),
        "Starting watch loop"
    );

    let mut ticker = interval(config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    let mut cycles = 0;
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {
                match run_cycle(publisher.clone(), config.clone()).await {
                    Ok(report) => report.log_summary(),
                    Err(e) => error!(error = %e, "Publish cycle failed"),
                }
                cycles += 1;
            }
        }
    }

    info!(cycles, "Watch loop stopped");
    Ok(cycles)
}

async fn run_cycle(publisher: Arc<Publisher>, config: WatchConfig) -> Result<BatchReport> {
    let today = config.today();
    tokio::task::spawn_blocking(move || publisher.publish_all(&config.root, today, config.jobs))
        .await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PublisherConfig;
    use catalog::VariableDescriptions;
    use test_utils::{fixtures::names, fixtures::runs, RunTree};

    fn publisher() -> Arc<Publisher> {
        Arc::new(Publisher::new(
            PublisherConfig::default(),
            VariableDescriptions::builtin().unwrap(),
        ))
    }

    #[tokio::test]
    async fn test_first_cycle_runs_immediately() {
        let tree = RunTree::new(runs::JUNE_1_00Z);
        tree.frame("d01", "slp", names::SLP_00Z);

        let config = WatchConfig {
            root: tree.root().to_path_buf(),
            interval: Duration::from_secs(3600),
            jobs: 1,
            today: NaiveDate::from_ymd_opt(2025, 6, 1),
        };
        let cycles = run_watch_until(
            publisher(),
            config,
            tokio::time::sleep(Duration::from_millis(200)),
        )
        .await
        .unwrap();

        assert_eq!(cycles, 1);
        assert!(tree.root().join("index.html").is_file());
        assert!(tree.run_path().join("data.js").is_file());
    }

    #[tokio::test]
    async fn test_missing_root_does_not_stop_loop() {
        let dir = tempfile::tempdir().unwrap();
        let config = WatchConfig {
            root: dir.path().join("missing"),
            interval: Duration::from_secs(3600),
            jobs: 1,
            today: None,
        };
        let cycles = run_watch_until(
            publisher(),
            config,
            tokio::time::sleep(Duration::from_millis(100)),
        )
        .await
        .unwrap();
        assert_eq!(cycles, 1);
    }
}
