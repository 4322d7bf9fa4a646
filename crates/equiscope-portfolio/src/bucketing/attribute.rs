//! Allocation breakdown by a metadata attribute (sector, industry, exchange, ...).

use crate::types::{Allocation, CASH_LABEL};
use equiscope_core::{Ticker, TickerMetadata};
use serde::Serialize;
use std::collections::BTreeMap;

/// Bucket label for tickers without the attribute.
pub const UNCLASSIFIED_LABEL: &str = "Unclassified";

/// Aggregated weight of one attribute value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeBucket {
    /// Attribute value, [`UNCLASSIFIED_LABEL`] or [`CASH_LABEL`].
    pub label: String,
    /// Total weight in percent.
    pub weight_pct: f64,
    /// Tickers in the bucket, in allocation order.
    pub tickers: Vec<Ticker>,
}

/// Allocation grouped by one metadata attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeDistribution {
    /// Attribute the allocation was grouped by.
    pub attribute: String,
    /// Classified buckets sorted by weight (descending, then label), followed by
    /// `Unclassified` and `Cash` when present.
    pub buckets: Vec<AttributeBucket>,
}

impl AttributeDistribution {
    /// Bucket with the given label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&AttributeBucket> {
        self.buckets.iter().find(|b| b.label == label)
    }

    /// Sum of all bucket weights (100 for a valid allocation).
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.buckets.iter().map(|b| b.weight_pct).sum()
    }

    /// Weight of tickers that lack the attribute.
    #[must_use]
    pub fn unclassified_weight(&self) -> f64 {
        self.get(UNCLASSIFIED_LABEL).map_or(0.0, |b| b.weight_pct)
    }
}

/// Groups the allocation's weights by `attribute`.
///
/// Tickers without the attribute land in `Unclassified`; uninvested weight is
/// its own `Cash` bucket, so buckets always sum to 100.
#[must_use]
pub fn bucket_by_attribute(
    allocation: &Allocation,
    metadata: &TickerMetadata,
    attribute: &str,
) -> AttributeDistribution {
    let mut classified: BTreeMap<String, AttributeBucket> = BTreeMap::new();
    let mut unclassified = AttributeBucket {
        label: UNCLASSIFIED_LABEL.to_string(),
        weight_pct: 0.0,
        tickers: Vec::new(),
    };

    for position in allocation.positions() {
        let bucket = match metadata.attribute(position.ticker.as_str(), attribute) {
            Some(value) => classified
                .entry(value.to_string())
                .or_insert_with(|| AttributeBucket {
                    label: value.to_string(),
                    weight_pct: 0.0,
                    tickers: Vec::new(),
                }),
            None => &mut unclassified,
        };
        bucket.weight_pct += position.weight_pct;
        bucket.tickers.push(position.ticker.clone());
    }

    let mut buckets: Vec<AttributeBucket> = classified.into_values().collect();
    buckets.sort_by(|a, b| {
        b.weight_pct
            .partial_cmp(&a.weight_pct)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.label.cmp(&b.label))
    });

    if !unclassified.tickers.is_empty() {
        buckets.push(unclassified);
    }

    let cash = allocation.cash_weight();
    if cash > 0.0 {
        buckets.push(AttributeBucket {
            label: CASH_LABEL.to_string(),
            weight_pct: cash,
            tickers: Vec::new(),
        });
    }

    AttributeDistribution {
        attribute: attribute.to_string(),
        buckets,
    }
}
