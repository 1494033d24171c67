//! Aggregate Routes
//!
//! Raw monthly means, for clients that draw their own charts.
//!
//! - GET /api/v1/aggregate?region=NSW&year=2005&metric=count&format=csv

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use std::time::Instant;

use crate::aggregate::MonthlyAggregate;
use crate::api::dto::{AggregateMeta, AggregateQuery, AggregateResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::dataset::Metric;

/// GET /api/v1/aggregate
///
/// Monthly means of one metric for a region and year.
pub async fn get_aggregate(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AggregateQuery>,
) -> ApiResult<Response> {
    let started = Instant::now();

    let metric = match query.metric.as_deref() {
        Some(key) => parse_metric(key)?,
        None => Metric::EstimatedFireArea,
    };
    let selection = state.dashboard.selection(&query.region, query.year)?;

    let aggregate = state.dashboard.aggregate(selection, metric);
    let elapsed_us = started.elapsed().as_micros() as u64;

    match query.format.to_lowercase().as_str() {
        "csv" => Ok(format_csv_response(&aggregate)),
        "json" => Ok(format_json_response(aggregate, elapsed_us)),
        other => Err(ApiError::Validation(format!(
            "Invalid format: {}. Use json or csv",
            other
        ))),
    }
}

/// Format response as JSON
fn format_json_response(aggregate: MonthlyAggregate, execution_time_us: u64) -> Response {
    let row_count = aggregate.entries.iter().map(|e| e.samples).sum();

    let response = AggregateResponse {
        region: aggregate.selection.region,
        year: aggregate.selection.year,
        metric: aggregate.metric,
        column: aggregate.metric.column().to_string(),
        months: aggregate.entries,
        meta: AggregateMeta {
            row_count,
            execution_time_us,
        },
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Format response as CSV
fn format_csv_response(aggregate: &MonthlyAggregate) -> Response {
    let mut csv = String::new();

    csv.push_str("Month,");
    csv.push_str(aggregate.metric.column());
    csv.push_str(",samples\n");

    for entry in &aggregate.entries {
        csv.push_str(entry.month.name());
        csv.push(',');
        csv.push_str(&entry.value.to_string());
        csv.push(',');
        csv.push_str(&entry.samples.to_string());
        csv.push('\n');
    }

    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/csv")],
        csv,
    )
        .into_response()
}

/// Parse a metric key
fn parse_metric(s: &str) -> ApiResult<Metric> {
    s.parse().map_err(|_| {
        let keys: Vec<&str> = Metric::all().iter().map(|m| m.key()).collect();
        ApiError::Validation(format!("Invalid metric: {}. Use one of {}", s, keys.join(", ")))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_metric() {
        assert!(matches!(parse_metric("count"), Ok(Metric::Count)));
        assert!(matches!(
            parse_metric("MEAN_CONFIDENCE"),
            Ok(Metric::MeanConfidence)
        ));

        let err = parse_metric("area").unwrap_err();
        assert!(err.to_string().contains("estimated_fire_area"));
    }
}
