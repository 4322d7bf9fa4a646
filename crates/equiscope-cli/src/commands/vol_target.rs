//! Vol-target command implementation.
//!
//! Scales exposure to the buy-and-hold portfolio so its trailing volatility
//! tracks a target.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use equiscope_portfolio::{
    compute_metrics, compute_nav, compute_vol_targeted_nav, MetricsRecord, VolTargetParams,
    VolTargetedNav,
};

use crate::cli::OutputFormat;
use crate::commands::{
    comparison_rows, metrics_grid, parse_allocation, require_tickers, RangeArgs, Session,
};
use crate::output::{
    format_number, format_percent, print_grid, print_json, print_output, print_warning, KeyValue,
};

/// Arguments for the vol-target command.
#[derive(Args, Debug)]
pub struct VolTargetArgs {
    /// Weights as TICKER=WEIGHT in percent, e.g. AAPL.OQ=40 MSFT.OQ=30 (rest is cash)
    #[arg(required = true, num_args = 1..)]
    pub weights: Vec<String>,

    #[command(flatten)]
    pub range: RangeArgs,

    /// Target annualized volatility as a fraction (e.g. 0.10)
    #[arg(short, long)]
    pub target: Option<f64>,

    /// Lookback window in trading days
    #[arg(short, long)]
    pub lookback: Option<usize>,

    /// Leverage cap
    #[arg(long)]
    pub max_leverage: Option<f64>,

    /// Show base and overlay NAV side by side
    #[arg(long)]
    pub nav: bool,
}

impl VolTargetArgs {
    /// Configured parameters with command-line overrides applied.
    pub fn params(&self, configured: &VolTargetParams) -> VolTargetParams {
        let mut params = configured.clone();
        if let Some(target) = self.target {
            params = params.with_target(target);
        }
        if let Some(lookback) = self.lookback {
            params = params.with_lookback(lookback);
        }
        if let Some(max_leverage) = self.max_leverage {
            params = params.with_max_leverage(max_leverage);
        }
        params
    }
}

#[derive(Debug, Serialize)]
struct VolTargetDocument<'a> {
    params: &'a VolTargetParams,
    buy_and_hold: &'a MetricsRecord,
    vol_target: Option<&'a MetricsRecord>,
    #[serde(flatten)]
    series: &'a VolTargetedNav,
}

/// Execute the vol-target command.
pub fn execute(args: VolTargetArgs, session: &Session) -> Result<()> {
    let allocation = parse_allocation(&args.weights)?;
    let params = args.params(&session.config.vol_target);
    params.validate()?;

    let cache = session.open_data();
    let panel = session.load_prices(&cache)?;
    require_tickers(&panel, &allocation)?;
    let range = args.range.resolve(&panel)?;

    let analytics = &session.config.analytics;
    let base = compute_nav(&panel, &allocation, &range, None)?;
    let overlay = compute_vol_targeted_nav(&base.nav, &params)?;
    let base_metrics = compute_metrics(&base.nav, analytics)?;
    let overlay_metrics = if overlay.nav.is_empty() {
        if !session.quiet {
            print_warning(&format!(
                "{} rows are not enough for a {}-day lookback",
                base.nav.len(),
                params.lookback
            ));
        }
        None
    } else {
        Some(compute_metrics(&overlay.nav, analytics)?)
    };

    match session.format {
        OutputFormat::Minimal => {
            let cumulative = overlay_metrics.as_ref().map_or(f64::NAN, |m| m.cumulative_return);
            println!("{}", format_percent(cumulative));
        }
        OutputFormat::Json => print_json(&VolTargetDocument {
            params: &params,
            buy_and_hold: &base_metrics,
            vol_target: overlay_metrics.as_ref(),
            series: &overlay,
        })?,
        OutputFormat::Csv if args.nav => {
            print_output(&comparison_rows(&base.nav, &overlay.nav), session.format)?;
        }
        format => {
            session.header(&format!(
                "Volatility Target {} ({}-day lookback, max {}x) {}",
                format_percent(params.target_volatility),
                params.lookback,
                params.max_leverage,
                range
            ));
            let (headers, rows) = metrics_grid(&[
                ("Buy & Hold", Some(&base_metrics)),
                ("Vol Target", overlay_metrics.as_ref()),
            ]);
            print_grid(&headers, &rows, format)?;

            if format == OutputFormat::Table {
                let latest = vec![
                    KeyValue::from_percent(
                        "Latest Rolling Volatility",
                        overlay.rolling_volatility.last().map_or(f64::NAN, |(_, v)| v),
                    ),
                    KeyValue::new(
                        "Latest Scaling",
                        format_number(overlay.scaling.last().map_or(f64::NAN, |(_, v)| v), 3),
                    ),
                ];
                print_output(&latest, format)?;
            }

            if args.nav && format == OutputFormat::Table {
                session.header("NAV (Base = Buy & Hold, Overlay = Vol Target)");
                print_output(&comparison_rows(&base.nav, &overlay.nav), format)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply_on_top_of_config() {
        let args = VolTargetArgs {
            weights: vec!["A=50".into()],
            range: RangeArgs::default(),
            target: Some(0.15),
            lookback: None,
            max_leverage: Some(1.5),
            nav: false,
        };
        let configured = VolTargetParams::default().with_lookback(60);
        let params = args.params(&configured);
        assert_eq!(params.target_volatility, 0.15);
        assert_eq!(params.lookback, 60);
        assert_eq!(params.max_leverage, 1.5);
        assert_eq!(params.min_leverage, configured.min_leverage);
    }
}
