//! Ticker → attribute lookup.

use crate::types::Ticker;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Conventional attribute holding a company's display name.
pub const ATTR_NAME: &str = "Name";
/// Conventional attribute holding a company's sector.
pub const ATTR_SECTOR: &str = "Sector";
/// Conventional attribute holding a company's industry.
pub const ATTR_INDUSTRY: &str = "Industry";
/// Conventional attribute holding the listing exchange.
pub const ATTR_EXCHANGE: &str = "Exchange";

/// Attribute values for one ticker, keyed by attribute name.
pub type Attributes = BTreeMap<String, String>;

/// Descriptive attributes per ticker (company name, sector, exchange, ...).
///
/// The set of attributes is open; whatever columns the metadata source carries
/// become attribute names. Empty values are not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TickerMetadata {
    entries: BTreeMap<Ticker, Attributes>,
}

impl TickerMetadata {
    /// Creates an empty lookup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces one attribute of `ticker`. Blank values are ignored.
    pub fn insert(
        &mut self,
        ticker: impl Into<Ticker>,
        attribute: impl Into<String>,
        value: impl AsRef<str>,
    ) {
        let value = value.as_ref().trim();
        let entry = self.entries.entry(ticker.into()).or_default();
        if !value.is_empty() {
            entry.insert(attribute.into(), value.to_string());
        }
    }

    /// All attributes of `ticker`.
    #[must_use]
    pub fn get(&self, ticker: &str) -> Option<&Attributes> {
        self.entries.get(ticker)
    }

    /// A single attribute of `ticker`.
    #[must_use]
    pub fn attribute(&self, ticker: &str, attribute: &str) -> Option<&str> {
        self.get(ticker)?.get(attribute).map(String::as_str)
    }

    /// Tickers with a metadata entry, sorted.
    pub fn tickers(&self) -> impl Iterator<Item = &Ticker> {
        self.entries.keys()
    }

    /// Every attribute name used by at least one ticker, sorted.
    #[must_use]
    pub fn attribute_names(&self) -> Vec<&str> {
        self.entries
            .values()
            .flat_map(|a| a.keys().map(String::as_str))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of tickers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no ticker has metadata.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Ticker, Attributes)> for TickerMetadata {
    fn from_iter<I: IntoIterator<Item = (Ticker, Attributes)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
