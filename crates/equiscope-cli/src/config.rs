//! `equiscope.toml` application configuration.
//!
//! Every section is optional; missing keys fall back to library defaults.
//!
//! ```toml
//! [data]
//! prices = "data/sp500.csv"
//! metadata = "data/metadata.csv"
//!
//! [analytics]
//! benchmark = "SPY"
//! risk_free_rate = 0.0
//!
//! [stress]
//! volatility_window = 30
//!
//! [vol_target]
//! target_volatility = 0.10
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use equiscope_portfolio::{AnalyticsConfig, StressParams, VolTargetParams};

use crate::error::{CliError, CliResult};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "equiscope.toml";

/// Price file used when neither flag, env var nor config names one.
pub const DEFAULT_PRICES_FILE: &str = "data/sp500.csv";

/// Data file locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Long-format price CSV.
    pub prices: PathBuf,
    /// Optional ticker metadata CSV.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PathBuf>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            prices: PathBuf::from(DEFAULT_PRICES_FILE),
            metadata: None,
        }
    }
}

/// Full application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Data file locations.
    pub data: DataConfig,
    /// NAV and metrics settings.
    pub analytics: AnalyticsConfig,
    /// Stress indicator parameters.
    pub stress: StressParams,
    /// Volatility targeting parameters.
    pub vol_target: VolTargetParams,
}

impl AppConfig {
    /// Reads and validates a TOML config file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml(&text)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parses and validates TOML text.
    pub fn from_toml(text: &str) -> CliResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| CliError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Resolves the effective configuration.
    ///
    /// An explicit path must exist. Without one, `./equiscope.toml` is used
    /// when present, otherwise defaults. Data paths given on the command line
    /// or through the environment override the file.
    pub fn resolve(
        explicit: Option<&Path>,
        prices: Option<PathBuf>,
        metadata: Option<PathBuf>,
    ) -> CliResult<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        if let Some(path) = prices {
            config.data.prices = path;
        }
        if metadata.is_some() {
            config.data.metadata = metadata;
        }
        Ok(config)
    }

    /// Serializes to TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))
    }

    /// Checks every parameter section.
    pub fn validate(&self) -> CliResult<()> {
        self.analytics
            .validate()
            .and_then(|()| self.stress.validate())
            .and_then(|()| self.vol_target.validate())
            .map_err(|e| CliError::Config(e.to_string()))
    }
}
