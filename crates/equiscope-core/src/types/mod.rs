//! Domain types for equity price analytics.
//!
//! - [`Ticker`]: instrument identifier
//! - [`DateRange`]: inclusive evaluation window
//! - [`TimeSeries`]: dated numeric series (prices, NAV, statistics)
//! - [`PricePanel`]: dates × tickers close price table
//! - [`AlignedPrices`]: gap-free panel slice for a ticker selection
//! - [`TickerMetadata`]: descriptive attributes per ticker

mod metadata;
mod panel;
mod range;
mod series;
mod ticker;

pub use metadata::{
    Attributes, TickerMetadata, ATTR_EXCHANGE, ATTR_INDUSTRY, ATTR_NAME, ATTR_SECTOR,
};
pub use panel::{AlignedPrices, PricePanel};
pub use range::{parse_date, DateRange};
pub use series::TimeSeries;
pub use ticker::Ticker;
