//! Portfolio bucketing and classification.
//!
//! Groups allocation weights by any attribute carried in the ticker metadata.

mod attribute;

pub use attribute::{
    bucket_by_attribute, AttributeBucket, AttributeDistribution, UNCLASSIFIED_LABEL,
};
