//! The loaded, read-only dataset

use super::types::{Region, WildfireRecord};

/// Immutable, ordered collection of wildfire records
///
/// Built once at startup and shared behind an `Arc`; there are no methods
/// that mutate it after construction.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<WildfireRecord>,
    /// Distinct years, ascending
    years: Vec<i32>,
}

impl Dataset {
    /// Build a dataset from records in source order
    pub fn new(records: Vec<WildfireRecord>) -> Self {
        let mut years: Vec<i32> = records.iter().map(|r| r.year()).collect();
        years.sort_unstable();
        years.dedup();

        Self { records, years }
    }

    /// All records in source order
    pub fn records(&self) -> &[WildfireRecord] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years present, ascending
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Check whether any record falls in `year`
    pub fn has_year(&self, year: i32) -> bool {
        self.years.binary_search(&year).is_ok()
    }

    /// Records for one region and year, in source order
    pub fn select(&self, region: Region, year: i32) -> impl Iterator<Item = &WildfireRecord> {
        self.records
            .iter()
            .filter(move |r| r.region == region && r.year() == year)
    }
}
