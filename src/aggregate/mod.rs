//! Aggregation Engine
//!
//! Filters the dataset to one region and year, then averages a metric per
//! calendar month.
//!
//! # Pipeline
//!
//! ```text
//! Dataset → Filter (region, year) → Group by month → Mean → Calendar order
//! ```
//!
//! Months without matching rows are omitted rather than zero-filled, and an
//! empty selection yields an empty aggregate instead of an error.

use crate::dataset::{Dataset, Metric, Month, Region};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A (region, year) pair chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub region: Region,
    pub year: i32,
}

impl Selection {
    /// Create a new selection
    pub fn new(region: Region, year: i32) -> Self {
        Self { region, year }
    }
}

/// Mean of a metric for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyValue {
    pub month: Month,
    /// Arithmetic mean over the month's rows
    pub value: f64,
    /// Rows that contributed to the mean
    pub samples: usize,
}

/// Monthly means of one metric for one selection, ordered January to December
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyAggregate {
    pub metric: Metric,
    pub selection: Selection,
    pub entries: Vec<MonthlyValue>,
}

impl MonthlyAggregate {
    /// Number of months present
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no month had data
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Months in calendar order
    pub fn months(&self) -> impl Iterator<Item = Month> + '_ {
        self.entries.iter().map(|e| e.month)
    }

    /// Values in calendar order
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|e| e.value)
    }

    /// Look up the mean for a month
    pub fn get(&self, month: Month) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.month == month)
            .map(|e| e.value)
    }
}

/// Average `metric` per month over the rows matching `selection`
pub fn aggregate(dataset: &Dataset, selection: Selection, metric: Metric) -> MonthlyAggregate {
    // BTreeMap keyed by Month iterates in calendar order
    let mut groups: BTreeMap<Month, (f64, usize)> = BTreeMap::new();

    for record in dataset.select(selection.region, selection.year) {
        if let Some(value) = metric.value(record) {
            let group = groups.entry(record.month()).or_insert((0.0, 0));
            group.0 += value;
            group.1 += 1;
        }
    }

    let entries = groups
        .into_iter()
        .map(|(month, (sum, samples))| MonthlyValue {
            month,
            value: sum / samples as f64,
            samples,
        })
        .collect();

    MonthlyAggregate {
        metric,
        selection,
        entries,
    }
}
