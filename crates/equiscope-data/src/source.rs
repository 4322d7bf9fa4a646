//! Panel source abstraction.

use equiscope_core::{PricePanel, TickerMetadata};

use crate::error::DataResult;

/// Something that can produce the price panel and ticker metadata.
///
/// Implementations are called at most once per [`PanelCache`](crate::PanelCache)
/// lifetime on success, so they may be slow (file or network reads).
pub trait PanelSource: Send + Sync {
    /// Loads the forward-filled price panel.
    fn load_prices(&self) -> DataResult<PricePanel>;

    /// Loads ticker metadata. Sources without metadata return an empty lookup.
    fn load_metadata(&self) -> DataResult<TickerMetadata>;

    /// Human-readable origin, used in log lines.
    fn describe(&self) -> String;
}

/// A source backed by data already in memory.
///
/// Used in tests and by callers that build panels programmatically.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    prices: PricePanel,
    metadata: TickerMetadata,
}

impl InMemorySource {
    /// Creates a source serving `prices` with no metadata.
    #[must_use]
    pub fn new(prices: PricePanel) -> Self {
        Self {
            prices,
            metadata: TickerMetadata::new(),
        }
    }

    /// Attaches ticker metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: TickerMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

impl PanelSource for InMemorySource {
    fn load_prices(&self) -> DataResult<PricePanel> {
        Ok(self.prices.clone())
    }

    fn load_metadata(&self) -> DataResult<TickerMetadata> {
        Ok(self.metadata.clone())
    }

    fn describe(&self) -> String {
        format!(
            "in-memory panel ({} dates x {} tickers)",
            self.prices.n_dates(),
            self.prices.n_tickers()
        )
    }
}
