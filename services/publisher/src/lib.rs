//! Forecast gallery publisher.
//!
//! Discovers forecast runs under a web root, rebuilds each run's catalog
//! script and viewer page, and refreshes the landing calendar.

pub mod config;
pub mod publish;
pub mod watch;

pub use config::{
    load_publisher_config, parse_publisher_config, DescriptionsConfig, OutputConfig, PublisherConfig,
};
pub use publish::{BatchReport, Publisher, RunReport};
pub use watch::{run_watch, WatchConfig};
