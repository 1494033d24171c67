//! Wildfire Dataset
//!
//! Loading and representation of the historical wildfire observations:
//!
//! - **types**: Core data structures (WildfireRecord, Region, Month, Metric)
//! - **loader**: CSV decoding from a local file or remote URL
//! - **table**: The immutable `Dataset` shared by every request
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use wildfire_dashboard::dataset::{DatasetLoader, DatasetSource, Region};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = DatasetSource::parse("./Historical_Wildfires.csv");
//!     let dataset = DatasetLoader::default().load(&source).await?;
//!
//!     let rows = dataset.select(Region::NewSouthWales, 2005).count();
//!     println!("{} NSW rows in 2005", rows);
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod loader;
pub mod table;
pub mod types;

pub use error::{DatasetError, DatasetResult};
pub use loader::{parse_csv, parse_date, DatasetLoader, DatasetSource, DEFAULT_SOURCE_URL};
pub use table::Dataset;
pub use types::{Metric, Month, Region, WildfireRecord};
