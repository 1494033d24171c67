//! # Wildfire Dashboard
//!
//! Interactive dashboard of historical Australian wildfire data, filtered by
//! region and year.
//!
//! ## Features
//!
//! - **Dataset loading**: CSV from a local file or remote URL, calendar fields derived once
//! - **Monthly aggregation**: Mean fire area and pixel count per calendar month
//! - **Chart specs**: Donut and bar figures serialized as Plotly JSON
//! - **Interactive**: HTML page, REST endpoints and a WebSocket channel
//!
//! ## Modules
//!
//! - [`dataset`]: Records, regions, months and the CSV loader
//! - [`aggregate`]: Filter, group by month, average
//! - [`chart`]: Chart specifications and theme
//! - [`dashboard`]: Selection handling that ties the above together
//! - [`api`]: HTTP server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wildfire_dashboard::aggregate::Selection;
//! use wildfire_dashboard::dashboard::Dashboard;
//! use wildfire_dashboard::dataset::{DatasetLoader, DatasetSource, Region};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = DatasetLoader::default()
//!         .load(&DatasetSource::parse("./Historical_Wildfires.csv"))
//!         .await?;
//!
//!     let dashboard = Dashboard::new(Arc::new(dataset), Region::NewSouthWales, 2005);
//!     let charts = dashboard.on_selection_change(Selection::new(Region::Victoria, 2009));
//!
//!     println!("{}", serde_json::to_string_pretty(&charts.fire_area)?);
//!
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod api;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod websocket;

// Re-export top-level types for convenience
pub use dataset::{
    Dataset, DatasetError, DatasetLoader, DatasetResult, DatasetSource, Metric, Month, Region,
    WildfireRecord,
};

pub use aggregate::{aggregate, MonthlyAggregate, MonthlyValue, Selection};

pub use chart::{render_bar, render_pie, ChartSpec, Theme};

pub use dashboard::{Dashboard, DashboardCharts, DashboardOptions, SelectionError};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{Config, ConfigError, DashboardConfig, DatasetConfig, LoggingConfig, ServerConfig};

pub use websocket::{websocket_handler, ClientMessage, ServerMessage};
