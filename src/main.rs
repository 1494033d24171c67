//! Wildfire Dashboard Server
//!
//! Run with: cargo run --bin wildfire-dashboard
//!
//! # Configuration
//!
//! Settings come from a TOML file (see `wildfire-cli config`), then
//! environment variables, then command-line flags:
//! - `WILDFIRE_DATA_SOURCE`: Dataset path or URL (default: upstream CSV)
//! - `WILDFIRE_HOST`: Host to bind to (default: 0.0.0.0)
//! - `WILDFIRE_PORT`: Port to listen on (default: 8050)
//! - `WILDFIRE_DEFAULT_REGION` / `WILDFIRE_DEFAULT_YEAR`: Initial selection
//! - `WILDFIRE_LOG_LEVEL` / `WILDFIRE_LOG_FORMAT`: Logging (pretty or json)
//! - `RUST_LOG`: Full filter directive, overrides the log level

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt};
use wildfire_dashboard::api::{serve, AppState};
use wildfire_dashboard::config::{Config, LoggingConfig};
use wildfire_dashboard::dashboard::Dashboard;
use wildfire_dashboard::dataset::{DatasetLoader, DatasetSource};

#[derive(Parser)]
#[command(name = "wildfire-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Serve the Australian wildfire dashboard")]
struct Args {
    /// Config file (default: standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Dataset path or URL
    #[arg(short, long)]
    source: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = load_config(&args, bootstrap_subscriber(std::io::stderr))?;
    init_tracing(&config.logging);

    tracing::info!(
        "Starting Wildfire Dashboard v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Load the dataset once; the server cannot run without it
    let source: DatasetSource = config.dataset.source();
    tracing::info!("Loading dataset from {}", source);
    let dataset = DatasetLoader::new(config.dataset.fetch_timeout())
        .load(&source)
        .await
        .with_context(|| format!("Failed to load dataset from {}", source))?;

    let dashboard = Dashboard::new(
        Arc::new(dataset),
        config.dashboard.default_region,
        config.dashboard.default_year,
    );
    let default = dashboard.default_selection();
    tracing::info!(
        region = %default.region,
        year = default.year,
        "Default selection"
    );

    let state = AppState::new(dashboard, source.to_string());
    serve(state, &config.server).await?;

    tracing::info!("Wildfire Dashboard stopped");
    Ok(())
}

/// Read the config file and apply command-line overrides
///
/// The global subscriber depends on the logging section, so anything logged
/// while the config is located goes through `bootstrap` instead.
fn load_config<S>(args: &Args, bootstrap: S) -> anyhow::Result<Config>
where
    S: tracing::Subscriber + Send + Sync + 'static,
{
    tracing::subscriber::with_default(bootstrap, || -> anyhow::Result<Config> {
        let mut config = match &args.config {
            Some(path) => Config::load_with_env(path)?,
            None => Config::load_default(),
        };
        if let Some(port) = args.port {
            config.server.port = port;
        }
        if let Some(source) = &args.source {
            config.dataset.source = source.clone();
        }
        Ok(config)
    })
}

/// Stderr subscriber used until the configured one is installed
fn bootstrap_subscriber<W>(writer: W) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wildfire_dashboard=info".into()),
        )
        .with_writer(writer)
        .finish()
}

/// Install the global tracing subscriber
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "wildfire_dashboard={},tower_http=debug",
            logging.level
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_config_loading_is_logged_before_global_init() {
        let captured = Captured::default();
        let writer = captured.clone();
        let args = Args {
            config: None,
            port: Some(9050),
            source: Some("./wildfires.csv".to_string()),
        };

        let config = load_config(&args, bootstrap_subscriber(move || writer.clone())).unwrap();
        assert_eq!(config.server.port, 9050);
        assert_eq!(config.dataset.source, "./wildfires.csv");

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("config"), "nothing logged: {:?}", logs);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args {
            config: Some(dir.path().join("absent.toml")),
            port: None,
            source: None,
        };

        assert!(load_config(&args, bootstrap_subscriber(io::sink)).is_err());
    }
}
