//! Period returns, compounding and drawdowns.

/// Period-over-period percentage change, aligned with the input.
///
/// The output has the same length as `values`; position 0 is `NaN` because it
/// has no predecessor. A `NaN` on either side of a step yields `NaN` for that step.
#[must_use]
pub fn pct_change(values: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    if values.is_empty() {
        return out;
    }
    out.push(f64::NAN);
    out.extend(values.windows(2).map(|w| w[1] / w[0] - 1.0));
    out
}

/// Compounds a return path into a value path starting at `base`.
///
/// `returns[0]` is applied to move from `base` to the second value, so the
/// output has `returns.len() + 1` entries.
#[must_use]
pub fn compound(base: f64, returns: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(returns.len() + 1);
    let mut level = base;
    out.push(level);
    for r in returns {
        level *= 1.0 + r;
        out.push(level);
    }
    out
}

/// Running maximum of a value path. `NaN` entries do not raise the peak.
#[must_use]
pub fn running_max(values: &[f64]) -> Vec<f64> {
    let mut peak = f64::NEG_INFINITY;
    values
        .iter()
        .map(|&v| {
            if v > peak {
                peak = v;
            }
            peak
        })
        .collect()
}

/// Drawdown from the running peak, `value / peak − 1`. Always `<= 0` for positive paths.
#[must_use]
pub fn drawdowns(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .zip(running_max(values))
        .map(|(&v, peak)| v / peak - 1.0)
        .collect()
}

/// Deepest drawdown of the path. `0.0` for a non-decreasing path, `NaN` if empty.
#[must_use]
pub fn max_drawdown(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    drawdowns(values)
        .into_iter()
        .filter(|d| !d.is_nan())
        .fold(0.0, f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pct_change() {
        let r = pct_change(&[100.0, 110.0, 99.0]);
        assert_eq!(r.len(), 3);
        assert!(r[0].is_nan());
        assert_relative_eq!(r[1], 0.1, epsilon = 1e-12);
        assert_relative_eq!(r[2], -0.1, epsilon = 1e-12);
        assert!(pct_change(&[]).is_empty());
    }

    #[test]
    fn test_compound() {
        let path = compound(1.0, &[0.1, -0.1]);
        assert_eq!(path.len(), 3);
        assert_relative_eq!(path[2], 0.99, epsilon = 1e-12);
    }

    #[test]
    fn test_drawdowns() {
        let nav = [1.0, 1.2, 0.9, 1.3, 1.04];
        let dd = drawdowns(&nav);
        assert_eq!(dd[0], 0.0);
        assert_relative_eq!(dd[2], -0.25, epsilon = 1e-12);
        assert_relative_eq!(max_drawdown(&nav), -0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_max_drawdown_monotonic() {
        assert_eq!(max_drawdown(&[1.0, 1.0, 1.1, 1.2]), 0.0);
        assert!(max_drawdown(&[]).is_nan());
    }
}
