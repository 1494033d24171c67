//! Dataset Loader
//!
//! Reads the wildfire CSV from a local file or a remote URL and decodes it
//! into `WildfireRecord`s. Blank numeric cells are kept as missing values;
//! any other malformed row aborts the load.

use super::error::{DatasetError, DatasetResult};
use super::table::Dataset;
use super::types::{Region, WildfireRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::fmt;
use std::io::Read;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Upstream copy of the historical wildfire dataset
pub const DEFAULT_SOURCE_URL: &str = "https://cf-courses-data.s3.us.cloud-object-storage.appdomain.cloud/IBMDeveloperSkillsNetwork-DV0101EN-SkillsNetwork/Data%20Files/Historical_Wildfires.csv";

/// Columns every input file must carry
const REQUIRED_COLUMNS: [&str; 4] = ["Region", "Date", "Estimated_fire_area", "Count"];

/// Formats tried, in order, for date-only values
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Formats tried, in order, for date-time values
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Where the dataset comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// Local CSV file
    File(PathBuf),
    /// Remote CSV over HTTP(S)
    Url(String),
}

impl DatasetSource {
    /// Interpret a string as a URL if it has an http(s) scheme, otherwise as a path
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            DatasetSource::Url(s.to_string())
        } else {
            DatasetSource::File(PathBuf::from(s))
        }
    }
}

impl Default for DatasetSource {
    fn default() -> Self {
        DatasetSource::Url(DEFAULT_SOURCE_URL.to_string())
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::File(path) => write!(f, "{}", path.display()),
            DatasetSource::Url(url) => f.write_str(url),
        }
    }
}

/// Loads the dataset once at startup
pub struct DatasetLoader {
    /// Timeout for remote fetches
    timeout: Duration,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new(Duration::from_secs(60))
    }
}

impl DatasetLoader {
    /// Create a loader with the given fetch timeout
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Read and decode the dataset from `source`
    pub async fn load(&self, source: &DatasetSource) -> DatasetResult<Dataset> {
        let started = Instant::now();

        let body = match source {
            DatasetSource::File(path) => tokio::fs::read(path).await?,
            DatasetSource::Url(url) => self.fetch(url).await?,
        };

        let dataset = parse_csv(body.as_slice())?;

        tracing::info!(
            source = %source,
            records = dataset.len(),
            first_year = ?dataset.years().first(),
            last_year = ?dataset.years().last(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Dataset loaded"
        );

        Ok(dataset)
    }

    async fn fetch(&self, url: &str) -> DatasetResult<Vec<u8>> {
        tracing::debug!(url = %url, "Fetching dataset");

        let client = reqwest::Client::builder().timeout(self.timeout).build()?;
        let response = client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DatasetError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// One CSV row as it appears on disk
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Region")]
    region: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Estimated_fire_area", default)]
    estimated_fire_area: Option<f64>,
    #[serde(rename = "Count", default)]
    count: Option<f64>,
    #[serde(rename = "Mean_estimated_fire_brightness", default)]
    mean_brightness: Option<f64>,
    #[serde(rename = "Mean_estimated_fire_radiative_power", default)]
    mean_radiative_power: Option<f64>,
    #[serde(rename = "Mean_confidence", default)]
    mean_confidence: Option<f64>,
}

/// Decode a CSV document into a dataset
pub fn parse_csv<R: Read>(input: R) -> DatasetResult<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| DatasetError::Csv {
            line: 1,
            message: e.to_string(),
        })?
        .clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DatasetError::MissingColumn(column.to_string()));
        }
    }

    let mut records = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| DatasetError::Csv {
            line: e.position().map(|p| p.line()).unwrap_or(0),
            message: e.to_string(),
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let row: RawRow = record
            .deserialize(Some(&headers))
            .map_err(|e| DatasetError::Csv {
                line,
                message: e.to_string(),
            })?;

        records.push(decode_row(row, line)?);
    }

    Ok(Dataset::new(records))
}

fn decode_row(row: RawRow, line: u64) -> DatasetResult<WildfireRecord> {
    let date = parse_date(&row.date).ok_or_else(|| DatasetError::InvalidDate {
        line,
        value: row.date.clone(),
    })?;

    let region: Region = row.region.parse().map_err(|_| DatasetError::UnknownRegion {
        line,
        value: row.region.clone(),
    })?;

    Ok(
        WildfireRecord::new(date, region, row.estimated_fire_area, row.count).with_extras(
            row.mean_brightness,
            row.mean_radiative_power,
            row.mean_confidence,
        ),
    )
}

/// Parse a calendar date in any of the accepted formats
///
/// Slash-separated dates are read month first.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Month;
    use std::io::Write;

    const SAMPLE: &str = "Region,Date,Estimated_fire_area,Mean_estimated_fire_brightness,Mean_estimated_fire_radiative_power,Mean_confidence,Std_confidence,Var_confidence,Count,Replaced
NSW,1/4/2005,8.68,312.27,42.4,78.3,2.29,5.25,11,R
NSW,1/5/2005,16.61,322.48,62.36,85.5,8.19,67.07,12,R
VI,2/14/2006,2.0,,,,,,3,R
";

    #[test]
    fn test_parse_sample() {
        let dataset = parse_csv(SAMPLE.as_bytes()).unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.years(), &[2005, 2006]);

        let first = &dataset.records()[0];
        assert_eq!(first.region, Region::NewSouthWales);
        assert_eq!(first.month(), Month::January);
        assert_eq!(first.year(), 2005);
        assert_eq!(first.count, Some(11.0));
        assert_eq!(first.mean_brightness, Some(312.27));

        let last = &dataset.records()[2];
        assert_eq!(last.month(), Month::February);
        assert_eq!(last.mean_confidence, None);
    }

    #[test]
    fn test_optional_columns_may_be_absent() {
        let csv_data = "Region,Date,Estimated_fire_area,Count
WA,2019-12-01,100.5,40";

        let dataset = parse_csv(csv_data.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].mean_radiative_power, None);
        assert_eq!(dataset.records()[0].month(), Month::December);
    }

    #[test]
    fn test_missing_required_column() {
        let csv_data = "Region,Date,Count
NSW,2005-01-01,4";

        let err = parse_csv(csv_data.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn(ref c) if c == "Estimated_fire_area"));
    }

    #[test]
    fn test_invalid_date_is_fatal() {
        let csv_data = "Region,Date,Estimated_fire_area,Count
NSW,2005-01-01,1.0,4
NSW,not-a-date,1.0,4";

        let err = parse_csv(csv_data.as_bytes()).unwrap_err();
        match err {
            DatasetError::InvalidDate { line, value } => {
                assert_eq!(line, 3);
                assert_eq!(value, "not-a-date");
            }
            other => panic!("Expected InvalidDate, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_region_is_fatal() {
        let csv_data = "Region,Date,Estimated_fire_area,Count
ACT,2005-01-01,1.0,4";

        let err = parse_csv(csv_data.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::UnknownRegion { line: 2, .. }));
    }

    #[test]
    fn test_malformed_number_is_fatal() {
        let csv_data = "Region,Date,Estimated_fire_area,Count
NSW,2005-01-01,lots,4";

        let err = parse_csv(csv_data.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Csv { line: 2, .. }));
    }

    #[test]
    fn test_blank_measurement_is_missing_value() {
        let csv_data = "Region,Date,Estimated_fire_area,Count
NSW,1/4/2005,8.0,11
NSW,1/5/2005,16.0,
NSW,1/6/2005,,7";

        let dataset = parse_csv(csv_data.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 3);

        let records = dataset.records();
        assert_eq!(records[1].estimated_fire_area, Some(16.0));
        assert_eq!(records[1].count, None);
        assert_eq!(records[2].estimated_fire_area, None);
        assert_eq!(records[2].count, Some(7.0));
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2005, 1, 4).unwrap();
        assert_eq!(parse_date("2005-01-04"), Some(expected));
        assert_eq!(parse_date("1/4/2005"), Some(expected));
        assert_eq!(parse_date("2005/01/04"), Some(expected));
        assert_eq!(parse_date("2005-01-04 10:30:00"), Some(expected));
        assert_eq!(parse_date("2005-01-04T10:30:00Z"), Some(expected));
        assert_eq!(parse_date("January 4th"), None);
    }

    #[test]
    fn test_source_parse() {
        assert!(matches!(
            DatasetSource::parse("https://example.com/data.csv"),
            DatasetSource::Url(_)
        ));
        assert_eq!(
            DatasetSource::parse("./data/wildfires.csv"),
            DatasetSource::File(PathBuf::from("./data/wildfires.csv"))
        );
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let source = DatasetSource::File(file.path().to_path_buf());
        let dataset = DatasetLoader::default().load(&source).await.unwrap();

        assert_eq!(dataset.len(), 3);
    }

    /// Serve SAMPLE at /wildfires.csv with the given status, returning its URL
    async fn serve_sample(status: axum::http::StatusCode) -> String {
        let app = axum::Router::new().route(
            "/wildfires.csv",
            axum::routing::get(move || async move { (status, SAMPLE) }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}/wildfires.csv", addr)
    }

    #[tokio::test]
    async fn test_load_from_url() {
        let url = serve_sample(axum::http::StatusCode::OK).await;

        let source = DatasetSource::parse(&url);
        let dataset = DatasetLoader::default().load(&source).await.unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.years(), &[2005, 2006]);
    }

    #[tokio::test]
    async fn test_load_url_error_status() {
        let url = serve_sample(axum::http::StatusCode::NOT_FOUND).await;

        let err = DatasetLoader::new(Duration::from_secs(5))
            .load(&DatasetSource::Url(url.clone()))
            .await
            .unwrap_err();

        match err {
            DatasetError::Status { url: failed, status } => {
                assert_eq!(failed, url);
                assert_eq!(status, 404);
            }
            other => panic!("Expected Status, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = DatasetSource::File(dir.path().join("missing.csv"));

        let err = DatasetLoader::default().load(&source).await.unwrap_err();
        assert!(matches!(err, DatasetError::Io(_)));
    }
}
