//! Descriptive statistics over `f64` slices.
//!
//! All functions follow the same convention: an empty input or too few
//! observations yields `NaN` rather than an error, and a `NaN` anywhere in the
//! input propagates to the result.

/// Arithmetic mean. `NaN` for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance (n − 1 denominator). `NaN` with fewer than two values.
#[must_use]
pub fn sample_variance(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = values
        .iter()
        .map(|v| {
            let diff = v - m;
            diff * diff
        })
        .sum();
    ss / (n - 1) as f64
}

/// Sample standard deviation (n − 1 denominator). `NaN` with fewer than two values.
#[must_use]
pub fn sample_std(values: &[f64]) -> f64 {
    let var = sample_variance(values);
    // Rounding can leave a tiny negative residue for constant inputs.
    if var < 0.0 {
        0.0
    } else {
        var.sqrt()
    }
}

/// Percentile rank (0–100) of `value` within `window`.
///
/// Ties receive the average rank, so a value equal to every observation
/// ranks at the midpoint. The result is `rank / n × 100` where rank is 1-based.
/// `NaN` if the window is empty or contains `NaN`, or `value` is `NaN`.
#[must_use]
pub fn percentile_rank(window: &[f64], value: f64) -> f64 {
    if window.is_empty() || value.is_nan() || window.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }

    let below = window.iter().filter(|&&v| v < value).count() as f64;
    let equal = window.iter().filter(|&&v| v == value).count() as f64;

    // Average of the 1-based ranks occupied by the tied block.
    let rank = if equal > 0.0 {
        below + (equal + 1.0) / 2.0
    } else {
        below + 1.0
    };

    rank / window.len() as f64 * 100.0
}

/// Clamps `value` into `[lo, hi]`, keeping `NaN` as `NaN`.
///
/// Positive infinity maps to `hi` and negative infinity to `lo`.
#[must_use]
pub fn clip(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        f64::NAN
    } else {
        value.max(lo).min(hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_and_std() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&v), 5.0);
        // population std is 2.0; sample std = sqrt(32/7)
        assert_relative_eq!(sample_std(&v), (32.0_f64 / 7.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_undefined_cases() {
        assert!(mean(&[]).is_nan());
        assert!(sample_std(&[1.0]).is_nan());
        assert!(sample_std(&[1.0, f64::NAN]).is_nan());
    }

    #[test]
    fn test_constant_std_is_zero() {
        assert_eq!(sample_std(&[3.0; 10]), 0.0);
    }

    #[test]
    fn test_percentile_rank() {
        let w = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(percentile_rank(&w, 4.0), 100.0);
        assert_relative_eq!(percentile_rank(&w, 1.0), 25.0);
        // all ties: average rank (1+2+3)/3 = 2 of 3
        assert_relative_eq!(percentile_rank(&[5.0, 5.0, 5.0], 5.0), 200.0 / 3.0, epsilon = 1e-12);
        assert!(percentile_rank(&[1.0, f64::NAN], 1.0).is_nan());
    }

    #[test]
    fn test_clip() {
        assert_eq!(clip(5.0, 0.1, 2.0), 2.0);
        assert_eq!(clip(0.01, 0.1, 2.0), 0.1);
        assert_eq!(clip(f64::INFINITY, 0.1, 2.0), 2.0);
        assert!(clip(f64::NAN, 0.1, 2.0).is_nan());
    }
}
