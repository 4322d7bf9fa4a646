//! Market stress indicator.
//!
//! A composite 0–100 score derived from a single reference price series.

mod indicator;

pub use indicator::{
    compute_stress, StressLevel, StressSeries, StressSnapshot, HIGH_STRESS_THRESHOLD,
    LOW_STRESS_THRESHOLD,
};
