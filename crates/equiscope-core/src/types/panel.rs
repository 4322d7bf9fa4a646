//! Wide price panel: dates × tickers.

use crate::error::{CoreError, CoreResult};
use crate::types::{DateRange, Ticker, TimeSeries};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Immutable table of daily close prices, one column per ticker.
///
/// Dates are strictly increasing and unique. Missing prices are `NaN`. Panels
/// produced by the data loader are forward-filled, so a `NaN` only remains
/// before a ticker's first observation.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePanel {
    dates: Vec<NaiveDate>,
    tickers: Vec<Ticker>,
    index: HashMap<Ticker, usize>,
    // column-major: columns[ticker][row]
    columns: Vec<Vec<f64>>,
}

impl PricePanel {
    /// Creates a panel from column-major data.
    ///
    /// Validates date ordering, column count and column lengths. No filling is applied.
    pub fn new(
        dates: Vec<NaiveDate>,
        tickers: Vec<Ticker>,
        columns: Vec<Vec<f64>>,
    ) -> CoreResult<Self> {
        if let Some(w) = dates.windows(2).find(|w| w[0] >= w[1]) {
            return Err(CoreError::UnorderedDates {
                previous: w[0],
                next: w[1],
            });
        }
        if tickers.len() != columns.len() {
            return Err(CoreError::LengthMismatch {
                dates: tickers.len(),
                values: columns.len(),
            });
        }
        if let Some(col) = columns.iter().find(|c| c.len() != dates.len()) {
            return Err(CoreError::LengthMismatch {
                dates: dates.len(),
                values: col.len(),
            });
        }

        let mut index = HashMap::with_capacity(tickers.len());
        for (i, t) in tickers.iter().enumerate() {
            if index.insert(t.clone(), i).is_some() {
                return Err(CoreError::DuplicateTicker {
                    ticker: t.to_string(),
                });
            }
        }

        Ok(Self {
            dates,
            tickers,
            index,
            columns,
        })
    }

    /// Pivots long-format `(date, ticker, price)` observations into a panel.
    ///
    /// Dates and tickers come out sorted. Repeated `(date, ticker)` pairs are
    /// averaged. Non-finite and non-positive prices are treated as missing. No filling is applied;
    /// call [`forward_filled`](Self::forward_filled) afterwards.
    pub fn from_observations(
        observations: impl IntoIterator<Item = (NaiveDate, Ticker, f64)>,
    ) -> CoreResult<Self> {
        let mut cells: BTreeMap<(NaiveDate, Ticker), (f64, u32)> = BTreeMap::new();
        let mut dates = BTreeSet::new();
        let mut tickers = BTreeSet::new();

        for (date, ticker, price) in observations {
            dates.insert(date);
            tickers.insert(ticker.clone());
            if !(price.is_finite() && price > 0.0) {
                continue;
            }
            let cell = cells.entry((date, ticker)).or_insert((0.0, 0));
            cell.0 += price;
            cell.1 += 1;
        }

        let dates: Vec<NaiveDate> = dates.into_iter().collect();
        let tickers: Vec<Ticker> = tickers.into_iter().collect();
        let row_of: HashMap<NaiveDate, usize> =
            dates.iter().enumerate().map(|(i, d)| (*d, i)).collect();
        let col_of: HashMap<&Ticker, usize> =
            tickers.iter().enumerate().map(|(i, t)| (t, i)).collect();

        let mut columns = vec![vec![f64::NAN; dates.len()]; tickers.len()];
        for ((date, ticker), (sum, count)) in &cells {
            columns[col_of[ticker]][row_of[date]] = sum / f64::from(*count);
        }

        tracing::debug!(
            dates = dates.len(),
            tickers = tickers.len(),
            cells = cells.len(),
            "pivoted price observations"
        );

        Self::new(dates, tickers, columns)
    }

    /// Returns a copy with gaps forward-filled per ticker.
    ///
    /// Leading `NaN`s stay `NaN` until the ticker's first observation.
    #[must_use]
    pub fn forward_filled(mut self) -> Self {
        for column in &mut self.columns {
            let mut last = f64::NAN;
            for v in column.iter_mut() {
                if v.is_nan() {
                    *v = last;
                } else {
                    last = *v;
                }
            }
        }
        self
    }

    /// Panel dates.
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Panel tickers in column order.
    #[must_use]
    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    /// Number of dates.
    #[must_use]
    pub fn n_dates(&self) -> usize {
        self.dates.len()
    }

    /// Number of tickers.
    #[must_use]
    pub fn n_tickers(&self) -> usize {
        self.tickers.len()
    }

    /// Returns true if the panel has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Returns true if `ticker` is a panel column.
    #[must_use]
    pub fn contains(&self, ticker: &str) -> bool {
        self.index.contains_key(ticker)
    }

    /// First and last panel dates.
    #[must_use]
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((*self.dates.first()?, *self.dates.last()?))
    }

    /// Raw column for `ticker`, aligned with [`dates`](Self::dates).
    #[must_use]
    pub fn column(&self, ticker: &str) -> Option<&[f64]> {
        self.index.get(ticker).map(|&i| self.columns[i].as_slice())
    }

    /// Price of `ticker` on `date` (`NaN` if missing).
    #[must_use]
    pub fn price(&self, date: NaiveDate, ticker: &str) -> Option<f64> {
        let row = self.dates.binary_search(&date).ok()?;
        self.column(ticker).map(|c| c[row])
    }

    /// Price history of one ticker with missing and non-positive values dropped.
    pub fn series(&self, ticker: &str) -> CoreResult<TimeSeries> {
        let column = self
            .column(ticker)
            .ok_or_else(|| CoreError::unknown_ticker(ticker))?;
        let pairs = self
            .dates
            .iter()
            .zip(column)
            .filter(|(_, p)| **p > 0.0)
            .map(|(d, p)| (*d, *p));
        TimeSeries::from_pairs(ticker, pairs)
    }

    /// Rows within `range` where every ticker in `tickers` has a positive price.
    ///
    /// A single missing ticker drops the whole row. Unknown tickers are an error.
    pub fn aligned(&self, tickers: &[Ticker], range: &DateRange) -> CoreResult<AlignedPrices> {
        let cols = tickers
            .iter()
            .map(|t| {
                self.column(t.as_str())
                    .ok_or_else(|| CoreError::unknown_ticker(t.as_str()))
            })
            .collect::<CoreResult<Vec<_>>>()?;

        let lo = self.dates.partition_point(|d| *d < range.start());
        let hi = self.dates.partition_point(|d| *d <= range.end());

        let rows: Vec<usize> = (lo..hi)
            .filter(|&r| cols.iter().all(|c| c[r] > 0.0))
            .collect();

        Ok(AlignedPrices {
            dates: rows.iter().map(|&r| self.dates[r]).collect(),
            tickers: tickers.to_vec(),
            columns: cols
                .iter()
                .map(|c| rows.iter().map(|&r| c[r]).collect())
                .collect(),
        })
    }
}

/// A gap-free slice of the panel for a ticker selection.
///
/// Every row has a price for every selected ticker.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPrices {
    dates: Vec<NaiveDate>,
    tickers: Vec<Ticker>,
    columns: Vec<Vec<f64>>,
}

impl AlignedPrices {
    /// Row dates.
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Selected tickers, in selection order.
    #[must_use]
    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    /// Price column for the `i`-th selected ticker.
    #[must_use]
    pub fn column(&self, i: usize) -> &[f64] {
        &self.columns[i]
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if no row survived alignment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Columns divided by their first-row price, so each starts at exactly 1.0.
    #[must_use]
    pub fn normalized(&self) -> Vec<Vec<f64>> {
        self.columns
            .iter()
            .map(|c| match c.first() {
                Some(&base) => c.iter().map(|p| p / base).collect(),
                None => Vec::new(),
            })
            .collect()
    }
}
