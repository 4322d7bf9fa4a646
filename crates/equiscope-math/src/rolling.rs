//! Trailing-window statistics.
//!
//! Every function returns a vector aligned with its input. Position `i` holds
//! the statistic over `values[i + 1 - window ..= i]`; it is `NaN` while fewer
//! than `window` observations are available or when any observation in the
//! window is `NaN`. This matches a rolling window whose minimum period equals
//! its length.

use crate::error::{MathError, MathResult};
use crate::stats::{mean, percentile_rank, sample_std};

/// Applies `f` to every full trailing window of `values`.
///
/// Windows containing `NaN` produce `NaN` without calling `f`.
pub fn rolling_apply<F>(values: &[f64], window: usize, f: F) -> MathResult<Vec<f64>>
where
    F: Fn(&[f64]) -> f64,
{
    if window == 0 {
        return Err(MathError::InvalidWindow { window, minimum: 1 });
    }

    let mut out = vec![f64::NAN; values.len()];
    if values.len() < window {
        return Ok(out);
    }

    for end in window..=values.len() {
        let slice = &values[end - window..end];
        if slice.iter().any(|v| v.is_nan()) {
            continue;
        }
        out[end - 1] = f(slice);
    }

    Ok(out)
}

/// Rolling arithmetic mean.
pub fn rolling_mean(values: &[f64], window: usize) -> MathResult<Vec<f64>> {
    rolling_apply(values, window, mean)
}

/// Rolling sample standard deviation (n − 1 denominator).
///
/// A window of one observation is accepted and yields `NaN` throughout.
pub fn rolling_std(values: &[f64], window: usize) -> MathResult<Vec<f64>> {
    rolling_apply(values, window, sample_std)
}

/// Rolling percentile rank (0–100) of each value within its trailing window.
///
/// The ranked value is the last one in the window; ties share the average rank.
pub fn rolling_percentile_rank(values: &[f64], window: usize) -> MathResult<Vec<f64>> {
    rolling_apply(values, window, |w| percentile_rank(w, w[w.len() - 1]))
}

/// Index of the first defined (non-`NaN`) value, if any.
#[must_use]
pub fn first_defined(values: &[f64]) -> Option<usize> {
    values.iter().position(|v| !v.is_nan())
}
