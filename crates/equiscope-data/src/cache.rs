//! Load-once panel cache.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing::{info, warn};

use equiscope_core::{PricePanel, TickerMetadata};

use crate::error::DataResult;
use crate::source::PanelSource;

/// Lifecycle of a [`PanelCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Nothing loaded yet, or the last load failed.
    Uninitialized,
    /// A load is in progress.
    Loading,
    /// Panel and metadata are available.
    Ready,
}

impl fmt::Display for CacheState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Uninitialized => "uninitialized",
            Self::Loading => "loading",
            Self::Ready => "ready",
        };
        f.write_str(s)
    }
}

#[derive(Debug)]
struct Loaded {
    prices: Arc<PricePanel>,
    metadata: Arc<TickerMetadata>,
}

/// Holds the price panel and metadata for the process lifetime.
///
/// The first call to [`prices`](Self::prices) or [`metadata`](Self::metadata)
/// loads both from the source. Concurrent first callers block on a single
/// initialization; exactly one of them runs the load. A failed load leaves the
/// cache `Uninitialized` so a later call can retry. Once ready, the data is
/// never reloaded or mutated.
pub struct PanelCache {
    source: Arc<dyn PanelSource>,
    state: Mutex<CacheState>,
    data: OnceCell<Loaded>,
}

impl PanelCache {
    /// Creates an empty cache over `source`.
    pub fn new(source: impl PanelSource + 'static) -> Self {
        Self::from_arc(Arc::new(source))
    }

    /// Creates an empty cache over a shared source.
    pub fn from_arc(source: Arc<dyn PanelSource>) -> Self {
        Self {
            source,
            state: Mutex::new(CacheState::Uninitialized),
            data: OnceCell::new(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> CacheState {
        *self.state.lock()
    }

    /// Returns true once data is loaded.
    pub fn is_ready(&self) -> bool {
        self.data.get().is_some()
    }

    /// Description of the underlying source.
    pub fn describe(&self) -> String {
        self.source.describe()
    }

    /// Shared price panel, loading it on first use.
    pub fn prices(&self) -> DataResult<Arc<PricePanel>> {
        Ok(Arc::clone(&self.load()?.prices))
    }

    /// Shared ticker metadata, loading it on first use.
    pub fn metadata(&self) -> DataResult<Arc<TickerMetadata>> {
        Ok(Arc::clone(&self.load()?.metadata))
    }

    fn load(&self) -> DataResult<&Loaded> {
        self.data.get_or_try_init(|| {
            *self.state.lock() = CacheState::Loading;
            let started = Instant::now();

            let result = self
                .source
                .load_prices()
                .and_then(|prices| Ok((prices, self.source.load_metadata()?)));

            match result {
                Ok((prices, metadata)) => {
                    info!(
                        source = %self.source.describe(),
                        dates = prices.n_dates(),
                        tickers = prices.n_tickers(),
                        metadata = metadata.len(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "price panel loaded"
                    );
                    *self.state.lock() = CacheState::Ready;
                    Ok(Loaded {
                        prices: Arc::new(prices),
                        metadata: Arc::new(metadata),
                    })
                }
                Err(err) => {
                    warn!(source = %self.source.describe(), error = %err, "price panel load failed");
                    *self.state.lock() = CacheState::Uninitialized;
                    Err(err)
                }
            }
        })
    }
}

impl fmt::Debug for PanelCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelCache")
            .field("source", &self.source.describe())
            .field("state", &self.state())
            .finish()
    }
}
