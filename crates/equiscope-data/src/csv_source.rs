//! CSV-backed price and metadata source.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use equiscope_core::{parse_date, PricePanel, Ticker, TickerMetadata};

use crate::error::{from_csv, DataError, DataResult};
use crate::source::PanelSource;

/// Date column in the price file.
pub const DATE_COLUMN: &str = "Date";
/// Ticker column in both files.
pub const TICKER_COLUMN: &str = "Ticker";
/// Close price column in the price file.
pub const PRICE_COLUMN: &str = "Price Close";

// =============================================================================
// RECORDS
// =============================================================================

/// One long-format price row.
#[derive(Debug, Deserialize)]
struct PriceRecord {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Ticker")]
    ticker: String,
    #[serde(rename = "Price Close", deserialize_with = "csv::invalid_option")]
    price: Option<f64>,
}

// =============================================================================
// CSV PANEL SOURCE
// =============================================================================

/// Reads prices in long format (`Date`, `Ticker`, `Price Close`) and optional
/// metadata (`Ticker` plus any attribute columns).
///
/// Price rows are pivoted to a panel, duplicate `(date, ticker)` rows are
/// averaged and gaps are forward-filled. Empty or non-numeric price cells are
/// missing values. Rows with an unparseable date or blank ticker are skipped
/// with a warning.
#[derive(Debug, Clone)]
pub struct CsvPanelSource {
    prices_path: PathBuf,
    metadata_path: Option<PathBuf>,
}

impl CsvPanelSource {
    /// Creates a source for the given price file.
    pub fn new(prices_path: impl AsRef<Path>) -> Self {
        Self {
            prices_path: prices_path.as_ref().to_path_buf(),
            metadata_path: None,
        }
    }

    /// Adds a metadata file.
    #[must_use]
    pub fn with_metadata(mut self, metadata_path: impl AsRef<Path>) -> Self {
        self.metadata_path = Some(metadata_path.as_ref().to_path_buf());
        self
    }

    /// Price file path.
    pub fn prices_path(&self) -> &Path {
        &self.prices_path
    }

    /// Metadata file path, if configured.
    pub fn metadata_path(&self) -> Option<&Path> {
        self.metadata_path.as_deref()
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

fn open(path: &Path) -> DataResult<csv::Reader<std::fs::File>> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| from_csv(&display(path), &e))
}

fn require_columns(path: &Path, headers: &csv::StringRecord, columns: &[&str]) -> DataResult<()> {
    for column in columns {
        if !headers.iter().any(|h| h == *column) {
            return Err(DataError::missing_column(display(path), *column));
        }
    }
    Ok(())
}

impl PanelSource for CsvPanelSource {
    fn load_prices(&self) -> DataResult<PricePanel> {
        let path = self.prices_path.as_path();
        let mut reader = open(path)?;
        let headers = reader
            .headers()
            .map_err(|e| from_csv(&display(path), &e))?
            .clone();
        require_columns(path, &headers, &[DATE_COLUMN, TICKER_COLUMN, PRICE_COLUMN])?;

        let mut observations = Vec::new();
        let mut skipped = 0usize;

        for (line, result) in reader.deserialize::<PriceRecord>().enumerate() {
            let record = result.map_err(|e| from_csv(&display(path), &e))?;

            let Ok(date) = parse_date(&record.date) else {
                warn!(line = line + 2, date = %record.date, "skipping row with unparseable date");
                skipped += 1;
                continue;
            };
            let ticker = Ticker::new(&record.ticker);
            if ticker.is_empty() {
                warn!(line = line + 2, "skipping row with blank ticker");
                skipped += 1;
                continue;
            }

            observations.push((date, ticker, record.price.unwrap_or(f64::NAN)));
        }

        if observations.is_empty() {
            return Err(DataError::Empty(display(path)));
        }
        debug!(rows = observations.len(), skipped, "read price rows");

        Ok(PricePanel::from_observations(observations)?.forward_filled())
    }

    fn load_metadata(&self) -> DataResult<TickerMetadata> {
        let Some(path) = self.metadata_path.as_deref() else {
            return Ok(TickerMetadata::new());
        };

        let mut reader = open(path)?;
        let headers = reader
            .headers()
            .map_err(|e| from_csv(&display(path), &e))?
            .clone();
        let ticker_idx = headers
            .iter()
            .position(|h| h == TICKER_COLUMN)
            .ok_or_else(|| DataError::missing_column(display(path), TICKER_COLUMN))?;

        let mut metadata = TickerMetadata::new();
        for result in reader.records() {
            let record = result.map_err(|e| from_csv(&display(path), &e))?;
            let ticker = Ticker::new(record.get(ticker_idx).unwrap_or_default());
            if ticker.is_empty() {
                continue;
            }
            for (idx, (name, value)) in headers.iter().zip(record.iter()).enumerate() {
                if idx != ticker_idx {
                    metadata.insert(ticker.clone(), name, value);
                }
            }
        }

        debug!(tickers = metadata.len(), "read ticker metadata");
        Ok(metadata)
    }

    fn describe(&self) -> String {
        match &self.metadata_path {
            Some(meta) => format!("{} (+ {})", self.prices_path.display(), meta.display()),
            None => self.prices_path.display().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_load_prices_pivots_and_fills() {
        let file = write_csv(
            "Date,Ticker,Price Close\n\
             2024-01-02,SPY,470.0\n\
             2024-01-02,AAPL.OQ,185.0\n\
             2024-01-03,SPY,468.0\n\
             2024-01-04 00:00:00,SPY,467.0\n\
             2024-01-04,AAPL.OQ,181.0\n",
        );
        let panel = CsvPanelSource::new(file.path()).load_prices().unwrap();
        assert_eq!(panel.tickers(), &[Ticker::from("AAPL.OQ"), Ticker::from("SPY")]);
        assert_eq!(panel.dates(), &[d(2), d(3), d(4)]);
        assert_eq!(panel.price(d(3), "AAPL.OQ"), Some(185.0));
    }

    #[test]
    fn test_duplicates_averaged_and_blanks_missing() {
        let file = write_csv(
            "Date,Ticker,Price Close\n\
             2024-01-02,SPY,100\n\
             2024-01-02,SPY,102\n\
             2024-01-03,SPY,\n\
             2024-01-04,SPY,n/a\n\
             not-a-date,SPY,1\n",
        );
        let panel = CsvPanelSource::new(file.path()).load_prices().unwrap();
        assert_eq!(panel.n_dates(), 3);
        assert_eq!(panel.price(d(2), "SPY"), Some(101.0));
        assert_eq!(panel.price(d(4), "SPY"), Some(101.0));
    }

    #[test]
    fn test_missing_column() {
        let file = write_csv("Date,Ticker,Close\n2024-01-02,SPY,1\n");
        let err = CsvPanelSource::new(file.path()).load_prices().unwrap_err();
        assert!(matches!(err, DataError::MissingColumn { ref column, .. } if column == "Price Close"));
    }

    #[test]
    fn test_missing_file_and_empty() {
        let err = CsvPanelSource::new("/nonexistent/prices.csv")
            .load_prices()
            .unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));

        let file = write_csv("Date,Ticker,Price Close\n");
        assert!(matches!(
            CsvPanelSource::new(file.path()).load_prices(),
            Err(DataError::Empty(_))
        ));
    }

    #[test]
    fn test_load_metadata() {
        let prices = write_csv("Date,Ticker,Price Close\n2024-01-02,SPY,1\n");
        let meta = write_csv(
            "Ticker,Name,Sector\n\
             AAPL.OQ,Apple Inc,Technology\n\
             XOM.N,Exxon Mobil,\n",
        );
        let source = CsvPanelSource::new(prices.path()).with_metadata(meta.path());
        let metadata = source.load_metadata().unwrap();
        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata.attribute("AAPL.OQ", "Sector"), Some("Technology"));
        assert_eq!(metadata.attribute("XOM.N", "Sector"), None);
        assert_eq!(metadata.attribute("XOM.N", "Name"), Some("Exxon Mobil"));
    }

    #[test]
    fn test_no_metadata_path() {
        let source = CsvPanelSource::new("prices.csv");
        assert!(source.load_metadata().unwrap().is_empty());
        assert_eq!(source.describe(), "prices.csv");
    }
}
