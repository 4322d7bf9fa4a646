//! # Equiscope Data
//!
//! Price panel and ticker metadata loading for Equiscope.
//!
//! This crate provides:
//! - [`PanelSource`]: the loading abstraction
//! - [`CsvPanelSource`]: long-format price CSV plus optional metadata CSV
//! - [`InMemorySource`]: programmatic panels for tests and embedding
//! - [`PanelCache`]: load-once, share-forever holder handing out `Arc`s
//!
//! No analytics live here; the panel is handed to `equiscope-portfolio` as is.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod cache;
mod csv_source;
mod error;
mod source;

pub use cache::{CacheState, PanelCache};
pub use csv_source::{CsvPanelSource, DATE_COLUMN, PRICE_COLUMN, TICKER_COLUMN};
pub use error::{DataError, DataResult};
pub use source::{InMemorySource, PanelSource};

use std::path::Path;

/// Creates a cache over CSV files.
pub fn open_csv(prices: impl AsRef<Path>, metadata: Option<&Path>) -> PanelCache {
    let source = CsvPanelSource::new(prices);
    let source = match metadata {
        Some(path) => source.with_metadata(path),
        None => source,
    };
    PanelCache::new(source)
}
