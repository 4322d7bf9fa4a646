//! Configuration for analytics computation.
//!
//! All three configs deserialize from partial input: missing fields take
//! their defaults, so a config file only needs the values it changes.

use crate::{PortfolioError, PortfolioResult};
use equiscope_core::Ticker;
use serde::{Deserialize, Serialize};

/// Trading days per year used for annualizing daily statistics.
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// Calendar days per year used for holding-period conversion.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Default benchmark ticker.
pub const DEFAULT_BENCHMARK: &str = "SPY";

fn annualization(trading_days: u32) -> f64 {
    f64::from(trading_days).sqrt()
}

fn require(cond: bool, name: &str, reason: &str) -> PortfolioResult<()> {
    if cond {
        Ok(())
    } else {
        Err(PortfolioError::invalid_parameter(name, reason))
    }
}

// =============================================================================
// ANALYTICS CONFIG
// =============================================================================

/// Configuration for NAV and metrics computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Trading days per year (volatility annualization factor is its square root).
    pub trading_days_per_year: u32,

    /// Calendar days per year (holding period in years).
    pub days_per_year: f64,

    /// Annual risk-free rate as a decimal (0.02 = 2%), subtracted from CAGR in the Sharpe ratio.
    pub risk_free_rate: f64,

    /// Ticker the portfolio is compared against.
    pub benchmark: Ticker,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            trading_days_per_year: TRADING_DAYS_PER_YEAR,
            days_per_year: DAYS_PER_YEAR,
            risk_free_rate: 0.0,
            benchmark: Ticker::from(DEFAULT_BENCHMARK),
        }
    }
}

impl AnalyticsConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the risk-free rate.
    #[must_use]
    pub fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    /// Sets the benchmark ticker.
    #[must_use]
    pub fn with_benchmark(mut self, benchmark: impl Into<Ticker>) -> Self {
        self.benchmark = benchmark.into();
        self
    }

    /// Sets trading days per year.
    #[must_use]
    pub fn with_trading_days(mut self, days: u32) -> Self {
        self.trading_days_per_year = days;
        self
    }

    /// Sets calendar days per year.
    #[must_use]
    pub fn with_days_per_year(mut self, days: f64) -> Self {
        self.days_per_year = days;
        self
    }

    /// Square root of trading days per year.
    #[must_use]
    pub fn annualization_factor(&self) -> f64 {
        annualization(self.trading_days_per_year)
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> PortfolioResult<()> {
        require(
            self.trading_days_per_year > 0,
            "trading_days_per_year",
            "must be positive",
        )?;
        require(
            self.days_per_year.is_finite() && self.days_per_year > 0.0,
            "days_per_year",
            "must be positive",
        )?;
        require(
            self.risk_free_rate.is_finite(),
            "risk_free_rate",
            "must be finite",
        )?;
        require(!self.benchmark.is_empty(), "benchmark", "must not be empty")
    }
}

// =============================================================================
// STRESS PARAMS
// =============================================================================

/// Parameters of the market stress indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StressParams {
    /// Returns in the rolling volatility window.
    pub volatility_window: usize,

    /// Short moving-average window (prices).
    pub momentum_short: usize,

    /// Long moving-average window (prices).
    pub momentum_long: usize,

    /// Observations the volatility percentile is ranked against.
    pub percentile_window: usize,

    /// Weight of the volatility percentile in the score.
    pub percentile_weight: f64,

    /// Weight of the momentum term in the score.
    pub momentum_weight: f64,

    /// Trading days per year for annualizing volatility.
    pub trading_days_per_year: u32,
}

impl Default for StressParams {
    fn default() -> Self {
        Self {
            volatility_window: 30,
            momentum_short: 10,
            momentum_long: 50,
            percentile_window: 252,
            percentile_weight: 0.6,
            momentum_weight: 0.4,
            trading_days_per_year: TRADING_DAYS_PER_YEAR,
        }
    }
}

impl StressParams {
    /// Creates params with default windows.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the volatility window.
    #[must_use]
    pub fn with_volatility_window(mut self, window: usize) -> Self {
        self.volatility_window = window;
        self
    }

    /// Sets both momentum windows.
    #[must_use]
    pub fn with_momentum(mut self, short: usize, long: usize) -> Self {
        self.momentum_short = short;
        self.momentum_long = long;
        self
    }

    /// Sets the percentile ranking window.
    #[must_use]
    pub fn with_percentile_window(mut self, window: usize) -> Self {
        self.percentile_window = window;
        self
    }

    /// Square root of trading days per year.
    #[must_use]
    pub fn annualization_factor(&self) -> f64 {
        annualization(self.trading_days_per_year)
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> PortfolioResult<()> {
        require(
            self.volatility_window >= 2,
            "volatility_window",
            "must be at least 2",
        )?;
        require(
            self.momentum_short >= 1,
            "momentum_short",
            "must be at least 1",
        )?;
        require(
            self.momentum_long > self.momentum_short,
            "momentum_long",
            "must be greater than momentum_short",
        )?;
        require(
            self.percentile_window >= 1,
            "percentile_window",
            "must be at least 1",
        )?;
        require(
            self.percentile_weight.is_finite() && self.percentile_weight >= 0.0,
            "percentile_weight",
            "must be a non-negative number",
        )?;
        require(
            self.momentum_weight.is_finite() && self.momentum_weight >= 0.0,
            "momentum_weight",
            "must be a non-negative number",
        )?;
        require(
            self.trading_days_per_year > 0,
            "trading_days_per_year",
            "must be positive",
        )
    }
}

// =============================================================================
// VOL TARGET PARAMS
// =============================================================================

/// Parameters of the volatility-targeting overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolTargetParams {
    /// Target annualized volatility as a decimal (0.10 = 10%).
    pub target_volatility: f64,

    /// Returns in the rolling volatility window.
    pub lookback: usize,

    /// Upper bound on the scaling factor.
    pub max_leverage: f64,

    /// Lower bound on the scaling factor.
    pub min_leverage: f64,

    /// Trading days per year for annualizing volatility.
    pub trading_days_per_year: u32,
}

impl Default for VolTargetParams {
    fn default() -> Self {
        Self {
            target_volatility: 0.10,
            lookback: 20,
            max_leverage: 2.0,
            min_leverage: 0.1,
            trading_days_per_year: TRADING_DAYS_PER_YEAR,
        }
    }
}

impl VolTargetParams {
    /// Creates params with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target volatility.
    #[must_use]
    pub fn with_target(mut self, target: f64) -> Self {
        self.target_volatility = target;
        self
    }

    /// Sets the lookback window.
    #[must_use]
    pub fn with_lookback(mut self, lookback: usize) -> Self {
        self.lookback = lookback;
        self
    }

    /// Sets the maximum leverage.
    #[must_use]
    pub fn with_max_leverage(mut self, max_leverage: f64) -> Self {
        self.max_leverage = max_leverage;
        self
    }

    /// Square root of trading days per year.
    #[must_use]
    pub fn annualization_factor(&self) -> f64 {
        annualization(self.trading_days_per_year)
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> PortfolioResult<()> {
        require(
            self.target_volatility.is_finite() && self.target_volatility > 0.0,
            "target_volatility",
            "must be positive",
        )?;
        require(self.lookback >= 2, "lookback", "must be at least 2")?;
        require(
            self.min_leverage.is_finite() && self.min_leverage > 0.0,
            "min_leverage",
            "must be positive",
        )?;
        require(
            self.max_leverage.is_finite() && self.max_leverage >= self.min_leverage,
            "max_leverage",
            "must be at least min_leverage",
        )?;
        require(
            self.trading_days_per_year > 0,
            "trading_days_per_year",
            "must be positive",
        )
    }
}
