//! Interaction Controller
//!
//! Turns a (region, year) selection into the dashboard's two charts:
//!
//! ```text
//! Selection ─┬─ aggregate(Estimated_fire_area) → render_pie ─┐
//!            └─ aggregate(Count)               → render_bar ─┴→ DashboardCharts
//! ```
//!
//! The controller holds nothing but the read-only dataset, so any number of
//! requests can call it at once.

use crate::aggregate::{aggregate, MonthlyAggregate, Selection};
use crate::chart::{chart_title, render_bar, render_pie, ChartSpec, Theme};
use crate::dataset::{Dataset, Metric, Region};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

/// Description used in the donut chart title
pub const FIRE_AREA_DESCRIPTION: &str = "Monthly Average Estimated Fire Area";

/// Description used in the bar chart title
pub const PIXEL_COUNT_DESCRIPTION: &str = "Average Count of Pixels for Presumed Vegetation Fires";

/// Both charts for one selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardCharts {
    pub selection: Selection,
    /// Donut chart of mean fire area per month
    pub fire_area: ChartSpec,
    /// Bar chart of mean pixel count per month
    pub pixel_count: ChartSpec,
}

/// One entry of the region selector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionOption {
    pub value: Region,
    pub label: &'static str,
}

/// Everything needed to populate the selectors
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardOptions {
    pub regions: Vec<RegionOption>,
    /// Distinct years in the dataset, ascending
    pub years: Vec<i32>,
    pub default: Selection,
}

/// Rejected selector values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    #[error("No data for year {0}")]
    UnknownYear(i32),
}

/// Recomputes charts for every selection change
pub struct Dashboard {
    dataset: Arc<Dataset>,
    theme: Theme,
    default_selection: Selection,
}

impl Dashboard {
    /// Create a controller over `dataset`
    ///
    /// If `default_year` is not in the dataset the earliest year is used.
    pub fn new(dataset: Arc<Dataset>, default_region: Region, default_year: i32) -> Self {
        let year = if dataset.has_year(default_year) {
            default_year
        } else {
            let fallback = dataset.years().first().copied().unwrap_or(default_year);
            tracing::warn!(
                requested = default_year,
                fallback,
                "Default year not present in dataset"
            );
            fallback
        };

        Self {
            dataset,
            theme: Theme::default(),
            default_selection: Selection::new(default_region, year),
        }
    }

    /// The shared dataset
    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    /// The theme charts are rendered with
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Selection shown on first load
    pub fn default_selection(&self) -> Selection {
        self.default_selection
    }

    /// Selector contents
    pub fn options(&self) -> DashboardOptions {
        DashboardOptions {
            regions: Region::all()
                .iter()
                .map(|r| RegionOption {
                    value: *r,
                    label: r.label(),
                })
                .collect(),
            years: self.dataset.years().to_vec(),
            default: self.default_selection,
        }
    }

    /// Check raw selector values against the fixed regions and the dataset's years
    pub fn selection(&self, region: &str, year: i32) -> Result<Selection, SelectionError> {
        let region: Region = region
            .parse()
            .map_err(|_| SelectionError::UnknownRegion(region.to_string()))?;

        if !self.dataset.has_year(year) {
            return Err(SelectionError::UnknownYear(year));
        }

        Ok(Selection::new(region, year))
    }

    /// Monthly means of one metric for a selection
    pub fn aggregate(&self, selection: Selection, metric: Metric) -> MonthlyAggregate {
        aggregate(&self.dataset, selection, metric)
    }

    /// Recompute both charts for a new selection
    pub fn on_selection_change(&self, selection: Selection) -> DashboardCharts {
        let started = Instant::now();

        let fire_area = self.aggregate(selection, Metric::EstimatedFireArea);
        let pixel_count = self.aggregate(selection, Metric::Count);

        let charts = DashboardCharts {
            selection,
            fire_area: render_pie(
                &fire_area,
                &chart_title(selection, FIRE_AREA_DESCRIPTION),
                &self.theme,
            ),
            pixel_count: render_bar(
                &pixel_count,
                &chart_title(selection, PIXEL_COUNT_DESCRIPTION),
                &self.theme,
            ),
        };

        tracing::debug!(
            region = %selection.region,
            year = selection.year,
            fire_area_months = fire_area.len(),
            pixel_count_months = pixel_count.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "Charts recomputed"
        );

        charts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Trace;
    use crate::dataset::{Month, WildfireRecord};
    use chrono::NaiveDate;

    fn record(region: Region, y: i32, m: u32, area: f64, count: f64) -> WildfireRecord {
        WildfireRecord::new(NaiveDate::from_ymd_opt(y, m, 1).unwrap(), region, area, count)
    }

    fn dashboard() -> Dashboard {
        let dataset = Dataset::new(vec![
            record(Region::NewSouthWales, 2005, 1, 10.0, 4.0),
            record(Region::NewSouthWales, 2005, 1, 20.0, 6.0),
            record(Region::NewSouthWales, 2005, 9, 5.0, 1.0),
            record(Region::Victoria, 2006, 3, 7.0, 2.0),
        ]);
        Dashboard::new(Arc::new(dataset), Region::NewSouthWales, 2005)
    }

    #[test]
    fn test_default_selection() {
        let dashboard = dashboard();
        assert_eq!(
            dashboard.default_selection(),
            Selection::new(Region::NewSouthWales, 2005)
        );
    }

    #[test]
    fn test_default_year_falls_back_to_earliest() {
        let dataset = Dataset::new(vec![
            record(Region::Tasmania, 2012, 1, 1.0, 1.0),
            record(Region::Tasmania, 2009, 1, 1.0, 1.0),
        ]);
        let dashboard = Dashboard::new(Arc::new(dataset), Region::Tasmania, 2005);
        assert_eq!(dashboard.default_selection().year, 2009);
    }

    #[test]
    fn test_options() {
        let options = dashboard().options();

        assert_eq!(options.regions.len(), 7);
        assert_eq!(options.regions[0].value, Region::NewSouthWales);
        assert_eq!(options.regions[0].label, "New South Wales");
        assert_eq!(options.years, vec![2005, 2006]);
    }

    #[test]
    fn test_selection_validation() {
        let dashboard = dashboard();

        assert_eq!(
            dashboard.selection("nsw", 2006),
            Ok(Selection::new(Region::NewSouthWales, 2006))
        );
        assert_eq!(
            dashboard.selection("ACT", 2005),
            Err(SelectionError::UnknownRegion("ACT".to_string()))
        );
        assert_eq!(
            dashboard.selection("NSW", 1990),
            Err(SelectionError::UnknownYear(1990))
        );
    }

    #[test]
    fn test_on_selection_change_builds_both_charts() {
        let charts = dashboard().on_selection_change(Selection::new(Region::NewSouthWales, 2005));

        assert_eq!(
            charts.fire_area.title(),
            "NSW : Monthly Average Estimated Fire Area in year 2005"
        );
        assert_eq!(
            charts.pixel_count.title(),
            "NSW : Average Count of Pixels for Presumed Vegetation Fires in year 2005"
        );

        match &charts.fire_area.data[0] {
            Trace::Pie(pie) => {
                assert_eq!(pie.labels, vec!["January", "September"]);
                assert_eq!(pie.values, vec![15.0, 5.0]);
            }
            other => panic!("Expected pie trace, got {:?}", other),
        }

        match &charts.pixel_count.data[0] {
            Trace::Bar(bar) => {
                assert_eq!(bar.x, vec![Month::January.name(), Month::September.name()]);
                assert_eq!(bar.y, vec![5.0, 1.0]);
            }
            other => panic!("Expected bar trace, got {:?}", other),
        }
    }

    #[test]
    fn test_region_without_data_gives_empty_charts() {
        let charts = dashboard().on_selection_change(Selection::new(Region::Victoria, 2005));

        assert!(charts.fire_area.is_empty());
        assert!(charts.pixel_count.is_empty());
    }
}
