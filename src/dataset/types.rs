//! Core data types for the wildfire dataset
//!
//! This module defines the fundamental types used throughout the dashboard:
//! - `WildfireRecord`: One observation row with its derived calendar fields
//! - `Region`: The seven Australian state/territory codes
//! - `Month`: Calendar months, ordered January to December
//! - `Metric`: Numeric fields that can be aggregated

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single wildfire observation
///
/// `month` and `year` are derived from `date` when the record is built
/// and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WildfireRecord {
    /// Observation date
    pub date: NaiveDate,
    /// State or territory
    pub region: Region,
    /// Estimated area affected by fire, if recorded
    pub estimated_fire_area: Option<f64>,
    /// Pixels classified as presumed vegetation fire, if recorded
    pub count: Option<f64>,
    /// Mean estimated fire brightness, if recorded
    pub mean_brightness: Option<f64>,
    /// Mean estimated fire radiative power, if recorded
    pub mean_radiative_power: Option<f64>,
    /// Mean detection confidence, if recorded
    pub mean_confidence: Option<f64>,
    month: Month,
    year: i32,
}

impl WildfireRecord {
    /// Create a record, deriving month and year from the date
    ///
    /// Blank measurements are passed as `None` and left out of monthly means.
    pub fn new(
        date: NaiveDate,
        region: Region,
        estimated_fire_area: impl Into<Option<f64>>,
        count: impl Into<Option<f64>>,
    ) -> Self {
        Self {
            date,
            region,
            estimated_fire_area: estimated_fire_area.into(),
            count: count.into(),
            mean_brightness: None,
            mean_radiative_power: None,
            mean_confidence: None,
            month: Month::from_date(date),
            year: date.year(),
        }
    }

    /// Builder method: set the optional measurement columns
    pub fn with_extras(
        mut self,
        mean_brightness: Option<f64>,
        mean_radiative_power: Option<f64>,
        mean_confidence: Option<f64>,
    ) -> Self {
        self.mean_brightness = mean_brightness;
        self.mean_radiative_power = mean_radiative_power;
        self.mean_confidence = mean_confidence;
        self
    }

    /// Calendar month of the observation
    pub fn month(&self) -> Month {
        self.month
    }

    /// Calendar year of the observation
    pub fn year(&self) -> i32 {
        self.year
    }
}

/// Australian state or territory code used by the dataset
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    #[serde(rename = "NSW")]
    NewSouthWales,
    #[serde(rename = "NT")]
    NorthernTerritory,
    #[serde(rename = "QL")]
    Queensland,
    #[serde(rename = "SA")]
    SouthAustralia,
    #[serde(rename = "TA")]
    Tasmania,
    #[serde(rename = "VI")]
    Victoria,
    #[serde(rename = "WA")]
    WesternAustralia,
}

impl Region {
    /// All regions in selector order
    pub fn all() -> &'static [Region] {
        &[
            Region::NewSouthWales,
            Region::NorthernTerritory,
            Region::Queensland,
            Region::SouthAustralia,
            Region::Tasmania,
            Region::Victoria,
            Region::WesternAustralia,
        ]
    }

    /// Short code as it appears in the source data
    pub fn code(&self) -> &'static str {
        match self {
            Region::NewSouthWales => "NSW",
            Region::NorthernTerritory => "NT",
            Region::Queensland => "QL",
            Region::SouthAustralia => "SA",
            Region::Tasmania => "TA",
            Region::Victoria => "VI",
            Region::WesternAustralia => "WA",
        }
    }

    /// Human-readable name for selectors
    pub fn label(&self) -> &'static str {
        match self {
            Region::NewSouthWales => "New South Wales",
            Region::NorthernTerritory => "Northern Territory",
            Region::Queensland => "Queensland",
            Region::SouthAustralia => "South Australia",
            Region::Tasmania => "Tasmania",
            Region::Victoria => "Victoria",
            Region::WesternAustralia => "Western Australia",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Region::all()
            .iter()
            .copied()
            .find(|r| r.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| format!("unknown region code: {}", code))
    }
}

/// Calendar month
///
/// The derived ordering is calendar order, which is what every monthly
/// aggregate is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All months, January first
    pub fn all() -> &'static [Month] {
        &[
            Month::January,
            Month::February,
            Month::March,
            Month::April,
            Month::May,
            Month::June,
            Month::July,
            Month::August,
            Month::September,
            Month::October,
            Month::November,
            Month::December,
        ]
    }

    /// Month of a calendar date
    pub fn from_date(date: NaiveDate) -> Self {
        // month0() is always in 0..12
        Month::all()[date.month0() as usize]
    }

    /// Full English name
    pub fn name(&self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Month {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Numeric column that can be averaged per month
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Estimated fire area
    EstimatedFireArea,
    /// Pixel count for presumed vegetation fires
    Count,
    /// Mean estimated fire brightness
    MeanBrightness,
    /// Mean estimated fire radiative power
    MeanRadiativePower,
    /// Mean detection confidence
    MeanConfidence,
}

impl Metric {
    /// Get all metrics for iteration
    pub fn all() -> &'static [Metric] {
        &[
            Metric::EstimatedFireArea,
            Metric::Count,
            Metric::MeanBrightness,
            Metric::MeanRadiativePower,
            Metric::MeanConfidence,
        ]
    }

    /// Column header in the source CSV
    pub fn column(&self) -> &'static str {
        match self {
            Metric::EstimatedFireArea => "Estimated_fire_area",
            Metric::Count => "Count",
            Metric::MeanBrightness => "Mean_estimated_fire_brightness",
            Metric::MeanRadiativePower => "Mean_estimated_fire_radiative_power",
            Metric::MeanConfidence => "Mean_confidence",
        }
    }

    /// Identifier used in query strings and CLI flags
    pub fn key(&self) -> &'static str {
        match self {
            Metric::EstimatedFireArea => "estimated_fire_area",
            Metric::Count => "count",
            Metric::MeanBrightness => "mean_brightness",
            Metric::MeanRadiativePower => "mean_radiative_power",
            Metric::MeanConfidence => "mean_confidence",
        }
    }

    /// Read this metric from a record
    pub fn value(&self, record: &WildfireRecord) -> Option<f64> {
        match self {
            Metric::EstimatedFireArea => record.estimated_fire_area,
            Metric::Count => record.count,
            Metric::MeanBrightness => record.mean_brightness,
            Metric::MeanRadiativePower => record.mean_radiative_power,
            Metric::MeanConfidence => record.mean_confidence,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Metric::all()
            .iter()
            .copied()
            .find(|m| m.key().eq_ignore_ascii_case(key) || m.column().eq_ignore_ascii_case(key))
            .ok_or_else(|| format!("unknown metric: {}", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_derives_calendar_fields() {
        let date = NaiveDate::from_ymd_opt(2005, 3, 14).unwrap();
        let record = WildfireRecord::new(date, Region::NewSouthWales, 12.5, 3.0);

        assert_eq!(record.month(), Month::March);
        assert_eq!(record.year(), 2005);
    }

    #[test]
    fn test_region_parse() {
        assert_eq!("NSW".parse::<Region>().unwrap(), Region::NewSouthWales);
        assert_eq!(" wa ".parse::<Region>().unwrap(), Region::WesternAustralia);
        assert!("ACT".parse::<Region>().is_err());
    }

    #[test]
    fn test_region_serde_uses_codes() {
        let json = serde_json::to_string(&Region::Queensland).unwrap();
        assert_eq!(json, "\"QL\"");

        let region: Region = serde_json::from_str("\"TA\"").unwrap();
        assert_eq!(region, Region::Tasmania);
    }

    #[test]
    fn test_month_order_is_calendar_order() {
        let mut months = vec![Month::December, Month::April, Month::August, Month::February];
        months.sort();
        assert_eq!(
            months,
            vec![Month::February, Month::April, Month::August, Month::December]
        );
    }

    #[test]
    fn test_metric_parse_accepts_key_and_column() {
        assert_eq!("count".parse::<Metric>().unwrap(), Metric::Count);
        assert_eq!(
            "Estimated_fire_area".parse::<Metric>().unwrap(),
            Metric::EstimatedFireArea
        );
        assert!("brightness".parse::<Metric>().is_err());
    }

    #[test]
    fn test_optional_metric_value() {
        let date = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap();
        let record = WildfireRecord::new(date, Region::Victoria, 1.0, 2.0)
            .with_extras(Some(310.5), None, Some(80.0));

        assert_eq!(Metric::MeanBrightness.value(&record), Some(310.5));
        assert_eq!(Metric::MeanRadiativePower.value(&record), None);
        assert_eq!(Metric::Count.value(&record), Some(2.0));
    }

    #[test]
    fn test_blank_count_has_no_value() {
        let date = NaiveDate::from_ymd_opt(2010, 1, 2).unwrap();
        let blank: Option<f64> = None;
        let record = WildfireRecord::new(date, Region::Victoria, 4.0, blank);

        assert_eq!(Metric::EstimatedFireArea.value(&record), Some(4.0));
        assert_eq!(Metric::Count.value(&record), None);
    }
}
