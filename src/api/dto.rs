//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::aggregate::MonthlyValue;
use crate::dataset::{Metric, Region};

// ============================================
// CHART DTOs
// ============================================

/// Query string for `GET /api/v1/charts`
///
/// Missing values fall back to the default selection.
#[derive(Debug, Default, Deserialize)]
pub struct ChartsQuery {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
}

// ============================================
// AGGREGATE DTOs
// ============================================

/// Query string for `GET /api/v1/aggregate`
#[derive(Debug, Deserialize)]
pub struct AggregateQuery {
    pub region: String,
    pub year: i32,
    /// Metric key, defaults to estimated_fire_area
    #[serde(default)]
    pub metric: Option<String>,
    /// Output format: json, csv
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "json".to_string()
}

/// Monthly aggregate response (JSON format)
#[derive(Debug, Serialize)]
pub struct AggregateResponse {
    pub region: Region,
    pub year: i32,
    pub metric: Metric,
    /// Source column the metric was read from
    pub column: String,
    /// Months in calendar order
    pub months: Vec<MonthlyValue>,
    pub meta: AggregateMeta,
}

/// Aggregate metadata
#[derive(Debug, Serialize)]
pub struct AggregateMeta {
    /// Rows averaged across all months
    pub row_count: usize,
    pub execution_time_us: u64,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    pub dataset: DatasetHealth,
    pub uptime_seconds: u64,
    pub version: String,
}

/// Dataset summary for health output
#[derive(Debug, Serialize)]
pub struct DatasetHealth {
    pub source: String,
    pub records: usize,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
}
