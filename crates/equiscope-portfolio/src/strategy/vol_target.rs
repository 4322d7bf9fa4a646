//! Volatility-targeting overlay.
//!
//! Scales exposure to a base NAV so that its realized volatility tracks a
//! target. The scaling factor observed at the close of day `t − 1` is applied
//! to the return of day `t`.

use crate::types::VolTargetParams;
use crate::{PortfolioError, PortfolioResult};
use equiscope_core::TimeSeries;
use equiscope_math::returns::pct_change;
use equiscope_math::rolling::{first_defined, rolling_std};
use equiscope_math::stats::clip;
use serde::Serialize;
use tracing::debug;

/// Name given to volatility-targeted NAV series.
pub const VOL_TARGET_SERIES: &str = "Vol Target";

/// Output of the volatility-targeting overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolTargetedNav {
    /// Strategy NAV, 1.0 on the first date with a defined scaling factor.
    /// Empty when the base NAV is shorter than the lookback.
    pub nav: TimeSeries,

    /// Annualized rolling volatility of the base NAV, on the base dates (`NaN` during warm-up).
    pub rolling_volatility: TimeSeries,

    /// Scaling factor on the base dates (`NaN` during warm-up).
    pub scaling: TimeSeries,
}

/// Applies volatility targeting to `base_nav`.
///
/// - `rₜ` = daily change of the base NAV
/// - `σₜ` = sample std of the last `lookback` returns × √252
/// - `sₜ` = clip(target / σₜ, min_leverage, max_leverage), `max_leverage` when σₜ = 0
/// - strategy return at `t` = `sₜ₋₁ × rₜ`
///
/// # Errors
///
/// - [`PortfolioError::InvalidParameter`] if `params` fail validation
/// - [`PortfolioError::EmptySeries`] if `base_nav` is empty
pub fn compute_vol_targeted_nav(
    base_nav: &TimeSeries,
    params: &VolTargetParams,
) -> PortfolioResult<VolTargetedNav> {
    params.validate()?;
    if base_nav.is_empty() {
        return Err(PortfolioError::empty_series(base_nav.name()));
    }

    let dates = base_nav.dates();
    let returns = pct_change(base_nav.values());

    let volatility: Vec<f64> = rolling_std(&returns, params.lookback)?
        .into_iter()
        .map(|s| s * params.annualization_factor())
        .collect();

    let scaling: Vec<f64> = volatility
        .iter()
        .map(|&sigma| {
            if sigma == 0.0 {
                params.max_leverage
            } else {
                clip(
                    params.target_volatility / sigma,
                    params.min_leverage,
                    params.max_leverage,
                )
            }
        })
        .collect();

    let nav = match first_defined(&scaling) {
        Some(start) => {
            let mut level = 1.0;
            let mut values = Vec::with_capacity(dates.len() - start);
            values.push(level);
            for t in start + 1..dates.len() {
                level *= 1.0 + scaling[t - 1] * returns[t];
                values.push(level);
            }
            TimeSeries::new(VOL_TARGET_SERIES, dates[start..].to_vec(), values)?
        }
        None => TimeSeries::empty(VOL_TARGET_SERIES),
    };

    debug!(
        base_rows = base_nav.len(),
        rows = nav.len(),
        lookback = params.lookback,
        "computed volatility-targeted NAV"
    );

    Ok(VolTargetedNav {
        nav,
        rolling_volatility: TimeSeries::new("Rolling Volatility", dates.to_vec(), volatility)?,
        scaling: TimeSeries::new("Scaling Factor", dates.to_vec(), scaling)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, NaiveDate};

    fn series(values: &[f64]) -> TimeSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        TimeSeries::from_pairs(
            "base",
            values
                .iter()
                .enumerate()
                .map(|(i, v)| (start + Duration::days(i as i64), *v)),
        )
        .unwrap()
    }

    fn zigzag(n: usize, amplitude: f64) -> Vec<f64> {
        let mut level = 1.0;
        (0..n)
            .map(|i| {
                if i > 0 {
                    level *= if i % 2 == 0 { 1.0 + amplitude } else { 1.0 - amplitude };
                }
                level
            })
            .collect()
    }

    #[test]
    fn test_warmup_and_alignment() {
        let base = series(&zigzag(10, 0.01));
        let params = VolTargetParams::new().with_lookback(3);
        let out = compute_vol_targeted_nav(&base, &params).unwrap();

        assert_eq!(out.rolling_volatility.len(), 10);
        assert_eq!(out.scaling.len(), 10);
        // returns[0] is undefined, so the first full window ends at index 3
        assert!(out.scaling.values()[2].is_nan());
        assert!(!out.scaling.values()[3].is_nan());
        assert_eq!(out.nav.first(), Some((base.dates()[3], 1.0)));
        assert_eq!(out.nav.len(), 7);
    }

    #[test]
    fn test_lagged_scaling() {
        let base = series(&zigzag(10, 0.02));
        let params = VolTargetParams::new().with_lookback(3);
        let out = compute_vol_targeted_nav(&base, &params).unwrap();

        let r = pct_change(base.values());
        let s = out.scaling.values();
        let v = out.nav.values();
        assert_relative_eq!(v[1], 1.0 + s[3] * r[4], epsilon = 1e-12);
        assert_relative_eq!(v[2], v[1] * (1.0 + s[4] * r[5]), epsilon = 1e-12);
    }

    #[test]
    fn test_scaling_bounds() {
        // tiny moves -> huge target/sigma -> clipped at max leverage
        let calm = compute_vol_targeted_nav(&series(&zigzag(40, 0.0001)), &VolTargetParams::default())
            .unwrap();
        for s in calm.scaling.values().iter().filter(|s| !s.is_nan()) {
            assert_eq!(*s, 2.0);
        }

        // wild moves -> clipped at the floor
        let wild = compute_vol_targeted_nav(&series(&zigzag(40, 0.3)), &VolTargetParams::default())
            .unwrap();
        for s in wild.scaling.values().iter().filter(|s| !s.is_nan()) {
            assert_eq!(*s, 0.1);
        }
    }

    #[test]
    fn test_flat_base_uses_max_leverage() {
        let out = compute_vol_targeted_nav(&series(&[1.0; 30]), &VolTargetParams::default()).unwrap();
        let defined: Vec<_> = out.scaling.values().iter().filter(|s| !s.is_nan()).collect();
        assert!(!defined.is_empty());
        assert!(defined.iter().all(|&&s| s == 2.0));
        assert!(out.nav.values().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_short_base_gives_empty_nav() {
        let out = compute_vol_targeted_nav(&series(&[1.0, 1.01, 1.02]), &VolTargetParams::default())
            .unwrap();
        assert!(out.nav.is_empty());
        assert!(out.scaling.values().iter().all(|s| s.is_nan()));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            compute_vol_targeted_nav(&TimeSeries::empty("x"), &VolTargetParams::default()),
            Err(PortfolioError::EmptySeries { .. })
        ));
        assert!(matches!(
            compute_vol_targeted_nav(&series(&[1.0, 2.0]), &VolTargetParams::new().with_lookback(0)),
            Err(PortfolioError::InvalidParameter { .. })
        ));
    }
}
