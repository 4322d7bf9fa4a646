//! Integration tests for equiscope-portfolio.
//!
//! These tests run the full pipeline (panel → NAV → metrics, overlays, stress)
//! on small hand-checkable panels.

use approx::assert_relative_eq;
use chrono::{Duration, NaiveDate};
use equiscope_core::types::ATTR_SECTOR;
use equiscope_portfolio::prelude::*;

// =============================================================================
// TEST FIXTURES
// =============================================================================

fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap() + Duration::days(offset)
}

/// Builds a forward-filled panel from per-ticker price columns on consecutive days.
fn build_panel(columns: &[(&str, &[f64])]) -> PricePanel {
    let mut obs = Vec::new();
    for (ticker, prices) in columns {
        for (i, p) in prices.iter().enumerate() {
            obs.push((day(i as i64), Ticker::from(*ticker), *p));
        }
    }
    PricePanel::from_observations(obs).unwrap().forward_filled()
}

fn wide_range() -> DateRange {
    DateRange::new(day(-1), day(2000)).unwrap()
}

/// Two-asset panel used by the reference scenario, plus a benchmark.
fn scenario_panel() -> PricePanel {
    build_panel(&[
        ("A", &[100.0, 110.0, 121.0, 110.0, 100.0][..]),
        ("B", &[50.0, 55.0, 50.0, 45.0, 50.0][..]),
        ("SPY", &[400.0, 404.0, 400.0, 396.0, 420.0][..]),
    ])
}

/// A long, gently trending and oscillating price path.
fn long_path(n: usize, drift: f64, amplitude: f64) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            100.0 * (1.0 + drift * t) + amplitude * (t / 9.0).sin()
        })
        .collect()
}

// =============================================================================
// NAV SCENARIOS
// =============================================================================

#[test]
fn test_sixty_forty_matches_direct_computation() {
    let panel = scenario_panel();
    let alloc = Allocation::new([("A", 60.0), ("B", 40.0)]).unwrap();
    let report = compute_nav(&panel, &alloc, &wide_range(), None).unwrap();

    let a = [100.0, 110.0, 121.0, 110.0, 100.0];
    let b = [50.0, 55.0, 50.0, 45.0, 50.0];
    let nav = report.nav.values();
    assert_eq!(nav.len(), 5);
    assert_eq!(nav[0], 1.0);
    assert_relative_eq!(nav[1], 1.10, epsilon = 1e-12);
    for t in 0..5 {
        let direct = 0.6 * a[t] / a[0] + 0.4 * b[t] / b[0];
        assert_relative_eq!(nav[t], direct, epsilon = 1e-12);
    }
}

#[test]
fn test_overweight_rejected_before_nav() {
    let err = Allocation::new([("A", 70.0), ("B", 50.0)]).unwrap_err();
    assert!(matches!(err, PortfolioError::WeightsExceedTotal { .. }));
    assert!(err.is_validation());
}

#[test]
fn test_invalid_range_rejected() {
    assert!(DateRange::new(day(5), day(1)).is_err());
    assert!(DateRange::new(day(1), day(1)).is_err());
}

#[test]
fn test_rows_with_missing_prices_dropped() {
    // C starts trading on day 2
    let mut obs = Vec::new();
    for (i, p) in [100.0, 101.0, 102.0, 103.0].iter().enumerate() {
        obs.push((day(i as i64), Ticker::from("A"), *p));
    }
    obs.push((day(2), Ticker::from("C"), 10.0));
    obs.push((day(3), Ticker::from("C"), 11.0));
    let panel = PricePanel::from_observations(obs).unwrap().forward_filled();

    let alloc = Allocation::new([("A", 50.0), ("C", 50.0)]).unwrap();
    let report = compute_nav(&panel, &alloc, &wide_range(), None).unwrap();
    assert_eq!(report.nav.dates(), &[day(2), day(3)]);
    assert_eq!(report.nav.values()[0], 1.0);
    assert_relative_eq!(
        report.nav.values()[1],
        0.5 * 103.0 / 102.0 + 0.5 * 1.1,
        epsilon = 1e-12
    );
}

#[test]
fn test_benchmark_metrics_are_its_own() {
    let panel = scenario_panel();
    let alloc = Allocation::new([("A", 60.0), ("B", 40.0)]).unwrap();
    let config = AnalyticsConfig::default();
    let report = compute_nav(&panel, &alloc, &wide_range(), Some(&config.benchmark)).unwrap();

    let comparison = MetricsComparison::from_report(&report, &config).unwrap();
    let bench = comparison.benchmark.as_ref().unwrap();
    assert_eq!(comparison.benchmark_name.as_deref(), Some("SPY"));
    assert_relative_eq!(bench.cumulative_return, 420.0 / 400.0 - 1.0, epsilon = 1e-12);
    assert_relative_eq!(comparison.portfolio.cumulative_return, 0.0, epsilon = 1e-12);
    assert_ne!(bench.max_drawdown, comparison.portfolio.max_drawdown);

    let rows = comparison.rows();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0].metric, "Cumulative Return");
    assert_relative_eq!(rows[0].benchmark, 0.05, epsilon = 1e-12);
}

// =============================================================================
// METRICS SCENARIOS
// =============================================================================

#[test]
fn test_flat_prices_give_zero_vol_and_nan_sharpe() {
    let flat = [50.0; 30];
    let panel = build_panel(&[("FLAT", &flat[..])]);
    let alloc = Allocation::new([("FLAT", 100.0)]).unwrap();
    let report = compute_nav(&panel, &alloc, &wide_range(), None).unwrap();
    let m = compute_metrics(&report.nav, &AnalyticsConfig::default()).unwrap();

    assert_eq!(m.annualized_volatility, 0.0);
    assert!(m.sharpe_ratio.is_nan());
    assert_eq!(m.max_drawdown, 0.0);
    assert_eq!(m.cumulative_return, 0.0);
    assert_eq!(m.holding.days, 29);
}

#[test]
fn test_metrics_serialize_nan_as_null() {
    let panel = build_panel(&[("FLAT", &[10.0; 5][..])]);
    let alloc = Allocation::new([("FLAT", 100.0)]).unwrap();
    let report = compute_nav(&panel, &alloc, &wide_range(), None).unwrap();
    let m = compute_metrics(&report.nav, &AnalyticsConfig::default()).unwrap();
    let json = serde_json::to_value(&m).unwrap();
    assert!(json["sharpe_ratio"].is_null());
    assert_eq!(json["max_drawdown"], 0.0);
}

// =============================================================================
// STRATEGY OVERLAYS
// =============================================================================

#[test]
fn test_rebalanced_and_vol_target_pipeline() {
    let a = long_path(300, 0.001, 6.0);
    let b = long_path(300, 0.0005, 3.0);
    let panel = build_panel(&[("A", a.as_slice()), ("B", b.as_slice())]);
    let alloc = Allocation::new([("A", 50.0), ("B", 30.0)]).unwrap();
    let range = DateRange::new(day(0), day(299)).unwrap();

    let rebalanced = compute_rebalanced_nav(&panel, &alloc, &range).unwrap();
    assert_eq!(rebalanced.nav.values()[0], 1.0);
    assert_eq!(rebalanced.nav.len(), 300);
    // 2024-02-01 through 2024-10-01 fall inside the range
    assert_eq!(rebalanced.rebalance_dates.len(), 9);
    assert!(rebalanced
        .rebalance_dates
        .iter()
        .all(|d| rebalanced.nav.value_at(*d).is_some()));

    let base = compute_nav(&panel, &alloc, &range, None).unwrap();
    let params = VolTargetParams::default();
    let vt = compute_vol_targeted_nav(&base.nav, &params).unwrap();
    assert_eq!(vt.nav.values()[0], 1.0);
    assert_eq!(vt.scaling.len(), base.nav.len());
    assert_eq!(vt.nav.len(), base.nav.len() - params.lookback);
    for s in vt.scaling.values().iter().filter(|s| !s.is_nan()) {
        assert!((params.min_leverage..=params.max_leverage).contains(s));
    }
}

// =============================================================================
// STRESS INDICATOR
// =============================================================================

#[test]
fn test_stress_short_range_undefined() {
    let prices = long_path(20, 0.001, 4.0);
    let panel = build_panel(&[("SPY", prices.as_slice())]);
    let reference = panel.series("SPY").unwrap();
    let stress = compute_stress(&reference, &StressParams::default()).unwrap();

    assert_eq!(stress.len(), 20);
    assert!(stress.snapshots.iter().all(|s| s.volatility.is_nan()));
    assert!(stress.snapshots.iter().all(|s| s.score.is_nan()));
}

#[test]
fn test_stress_full_history() {
    let prices = long_path(400, 0.0008, 8.0);
    let panel = build_panel(&[("SPY", prices.as_slice())]);
    let reference = panel.series("SPY").unwrap();
    let stress = compute_stress(&reference, &StressParams::default()).unwrap();

    // volatility from index 30, percentile needs 252 of them
    let first = stress.snapshots.iter().position(|s| s.is_defined()).unwrap();
    assert_eq!(first, 30 + 251);
    let latest = stress.latest().unwrap();
    assert!((0.0..=100.0).contains(&latest.score));
    assert!(latest.level().is_some());
}

// =============================================================================
// BUCKETING
// =============================================================================

#[test]
fn test_sector_allocation_sums_to_hundred() {
    let mut metadata = TickerMetadata::new();
    metadata.insert("A", ATTR_SECTOR, "Technology");
    metadata.insert("B", ATTR_SECTOR, "Utilities");

    let alloc = Allocation::new([("A", 45.0), ("B", 35.0), ("C", 5.0)]).unwrap();
    let dist = bucket_by_attribute(&alloc, &metadata, ATTR_SECTOR);
    assert_relative_eq!(dist.total_weight(), 100.0, epsilon = 1e-9);
    assert_eq!(dist.buckets[0].label, "Technology");
    assert_relative_eq!(dist.unclassified_weight(), 5.0);
}
