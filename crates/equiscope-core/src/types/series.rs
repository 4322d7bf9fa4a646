//! Dated numeric series.

use crate::error::{CoreError, CoreResult};
use crate::types::DateRange;
use chrono::NaiveDate;
use equiscope_math::returns::pct_change;
use serde::Serialize;

/// A named sequence of `(date, value)` observations with strictly increasing dates.
///
/// Used for single-ticker price histories, NAV paths, rolling statistics and
/// return series alike. Values may be `NaN` where a statistic is undefined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    name: String,
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Creates a series, validating length and strict date ordering.
    pub fn new(
        name: impl Into<String>,
        dates: Vec<NaiveDate>,
        values: Vec<f64>,
    ) -> CoreResult<Self> {
        if dates.len() != values.len() {
            return Err(CoreError::LengthMismatch {
                dates: dates.len(),
                values: values.len(),
            });
        }
        if let Some(w) = dates.windows(2).find(|w| w[0] >= w[1]) {
            return Err(CoreError::UnorderedDates {
                previous: w[0],
                next: w[1],
            });
        }
        Ok(Self {
            name: name.into(),
            dates,
            values,
        })
    }

    /// Builds a series from `(date, value)` pairs.
    pub fn from_pairs(
        name: impl Into<String>,
        pairs: impl IntoIterator<Item = (NaiveDate, f64)>,
    ) -> CoreResult<Self> {
        let (dates, values): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        Self::new(name, dates, values)
    }

    /// Creates an empty series.
    #[must_use]
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dates: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Series label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a copy with a different label.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Observation dates.
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Observation values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// First observation.
    #[must_use]
    pub fn first(&self) -> Option<(NaiveDate, f64)> {
        Some((*self.dates.first()?, *self.values.first()?))
    }

    /// Last observation.
    #[must_use]
    pub fn last(&self) -> Option<(NaiveDate, f64)> {
        Some((*self.dates.last()?, *self.values.last()?))
    }

    /// Value observed on `date`, if present.
    #[must_use]
    pub fn value_at(&self, date: NaiveDate) -> Option<f64> {
        self.dates
            .binary_search(&date)
            .ok()
            .map(|i| self.values[i])
    }

    /// Iterates over `(date, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// Observations within `range` (inclusive).
    #[must_use]
    pub fn restrict(&self, range: &DateRange) -> Self {
        self.filter_dates(|d| range.contains(d))
    }

    /// Observations on or after `start`.
    #[must_use]
    pub fn since(&self, start: NaiveDate) -> Self {
        self.filter_dates(|d| d >= start)
    }

    /// Drops `NaN` observations.
    #[must_use]
    pub fn drop_nan(&self) -> Self {
        let (dates, values) = self.iter().filter(|(_, v)| !v.is_nan()).unzip();
        Self {
            name: self.name.clone(),
            dates,
            values,
        }
    }

    /// Divides every value by the first one, so the result starts at exactly 1.0.
    ///
    /// Returns an empty series when `self` is empty.
    #[must_use]
    pub fn rebased(&self) -> Self {
        let Some((_, base)) = self.first() else {
            return self.clone();
        };
        Self {
            name: self.name.clone(),
            dates: self.dates.clone(),
            values: self.values.iter().map(|v| v / base).collect(),
        }
    }

    /// Period-over-period percentage change with the first observation dropped.
    #[must_use]
    pub fn pct_change(&self) -> Self {
        let changes = pct_change(&self.values);
        Self {
            name: self.name.clone(),
            dates: self.dates.iter().skip(1).copied().collect(),
            values: changes.into_iter().skip(1).collect(),
        }
    }

    /// Inner join on dates: `(date, self_value, other_value)` for dates present in both.
    #[must_use]
    pub fn inner_join(&self, other: &TimeSeries) -> Vec<(NaiveDate, f64, f64)> {
        let mut out = Vec::with_capacity(self.len().min(other.len()));
        let (mut i, mut j) = (0, 0);
        while i < self.len() && j < other.len() {
            match self.dates[i].cmp(&other.dates[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    out.push((self.dates[i], self.values[i], other.values[j]));
                    i += 1;
                    j += 1;
                }
            }
        }
        out
    }

    fn filter_dates(&self, keep: impl Fn(NaiveDate) -> bool) -> Self {
        let (dates, values) = self.iter().filter(|(d, _)| keep(*d)).unzip();
        Self {
            name: self.name.clone(),
            dates,
            values,
        }
    }
}
