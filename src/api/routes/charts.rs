//! Chart Routes
//!
//! - GET /api/v1/options - Selector contents and defaults
//! - GET /api/v1/charts - Both charts for a region and year

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::ChartsQuery;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::dashboard::{DashboardCharts, DashboardOptions};

/// GET /api/v1/options
pub async fn get_options(State(state): State<Arc<AppState>>) -> Json<DashboardOptions> {
    Json(state.dashboard.options())
}

/// GET /api/v1/charts?region=NSW&year=2005
///
/// Recompute the donut and bar charts for a selection.
pub async fn get_charts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChartsQuery>,
) -> ApiResult<Json<DashboardCharts>> {
    let default = state.dashboard.default_selection();

    let region = query
        .region
        .unwrap_or_else(|| default.region.code().to_string());
    let year = query.year.unwrap_or(default.year);

    let selection = state.dashboard.selection(&region, year)?;

    Ok(Json(state.dashboard.on_selection_change(selection)))
}
