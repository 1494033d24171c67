//! Wildfire CLI
//!
//! Command-line access to the wildfire dataset:
//! - Print monthly aggregates for a region and year
//! - List available years and regions
//! - Check a running dashboard server
//! - Generate a config file

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wildfire_dashboard::aggregate::{aggregate, MonthlyAggregate, Selection};
use wildfire_dashboard::chart::shares;
use wildfire_dashboard::config::{generate_default_config, Config};
use wildfire_dashboard::dataset::{Dataset, DatasetLoader, DatasetSource, Metric, Region};

#[derive(Parser)]
#[command(name = "wildfire-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Explore historical Australian wildfire data")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Dataset path or URL (default: from config)
    #[arg(short, long, global = true)]
    pub source: Option<String>,

    /// Config file (default: standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Monthly means for a region and year
    Summary {
        /// Region code (NSW, NT, QL, SA, TA, VI, WA)
        #[arg(short, long, default_value = "NSW")]
        region: String,
        /// Year
        #[arg(short, long, default_value = "2005")]
        year: i32,
        /// Metric (estimated_fire_area, count, mean_brightness, mean_radiative_power, mean_confidence)
        #[arg(short, long, default_value = "estimated_fire_area")]
        metric: String,
    },

    /// List years present in the dataset
    Years,

    /// List region codes
    Regions,

    /// Show status of a running dashboard server
    Status {
        /// Dashboard server URL
        #[arg(long, default_value = "http://localhost:8050")]
        url: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wildfire_dashboard=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summary {
            ref region,
            year,
            ref metric,
        } => {
            let region: Region = region.parse().map_err(anyhow::Error::msg)?;
            let metric: Metric = metric.parse().map_err(anyhow::Error::msg)?;

            let dataset = load_dataset(&cli).await?;
            if !dataset.has_year(year) {
                bail!(
                    "No data for year {}. Available: {}",
                    year,
                    format_years(dataset.years())
                );
            }

            let result = aggregate(&dataset, Selection::new(region, year), metric);

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&result)?),
                "csv" => print_csv(&result),
                _ => print_table(&result),
            }
        }

        Commands::Years => {
            let dataset = load_dataset(&cli).await?;

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string(dataset.years())?),
                _ => {
                    for year in dataset.years() {
                        println!("{}", year);
                    }
                }
            }
        }

        Commands::Regions => {
            println!("{:<6} {}", "Code", "Name");
            println!("{}", "-".repeat(26));
            for region in Region::all() {
                println!("{:<6} {}", region.code(), region.label());
            }
        }

        Commands::Status { ref url } => {
            let response = reqwest::get(format!("{}/health", url))
                .await
                .with_context(|| format!("Cannot connect to dashboard at {}", url))?;

            if !response.status().is_success() {
                bail!("Dashboard returned error: {}", response.status());
            }

            let health: serde_json::Value = response.json().await?;

            println!(
                "Status: {}",
                health["status"].as_str().unwrap_or("unknown")
            );
            println!(
                "Version: {}",
                health["version"].as_str().unwrap_or("unknown")
            );
            println!();
            println!("Dataset:");
            println!(
                "  Source: {}",
                health["dataset"]["source"].as_str().unwrap_or("-")
            );
            println!(
                "  Records: {}",
                health["dataset"]["records"].as_u64().unwrap_or(0)
            );
            if let (Some(first), Some(last)) = (
                health["dataset"]["first_year"].as_i64(),
                health["dataset"]["last_year"].as_i64(),
            ) {
                println!("  Years: {} - {}", first, last);
            }
            if let Some(uptime) = health["uptime_seconds"].as_u64() {
                println!();
                println!("Uptime: {}", format_duration(uptime));
            }
        }

        Commands::Config { ref output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Load the dataset named on the command line, or the configured one
async fn load_dataset(cli: &Cli) -> anyhow::Result<Dataset> {
    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    let source = match &cli.source {
        Some(s) => DatasetSource::parse(s),
        None => config.dataset.source(),
    };

    DatasetLoader::new(config.dataset.fetch_timeout())
        .load(&source)
        .await
        .with_context(|| format!("Failed to load dataset from {}", source))
}

fn format_years(years: &[i32]) -> String {
    match (years.first(), years.last()) {
        (Some(first), Some(last)) => format!("{} - {}", first, last),
        _ => "none".to_string(),
    }
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

fn print_table(result: &MonthlyAggregate) {
    if result.is_empty() {
        println!(
            "No {} data for {} in {}",
            result.selection.region,
            result.metric.column(),
            result.selection.year
        );
        return;
    }

    let values: Vec<f64> = result.values().collect();
    let shares = shares(&values);

    println!(
        "{} : mean {} by month in {}",
        result.selection.region,
        result.metric.column(),
        result.selection.year
    );
    println!();
    println!("{:<10} | {:>12} | {:>7} | {:>7}", "Month", "Mean", "Share", "Rows");
    println!("{}", "-".repeat(45));

    for (entry, share) in result.entries.iter().zip(shares) {
        println!(
            "{:<10} | {:>12.2} | {:>6.1}% | {:>7}",
            entry.month.name(),
            entry.value,
            share,
            entry.samples
        );
    }
}

fn print_csv(result: &MonthlyAggregate) {
    println!("Month,{},samples", result.metric.column());
    for entry in &result.entries {
        println!("{},{:.4},{}", entry.month.name(), entry.value, entry.samples);
    }
}
