//! Data validation errors raised while ingesting box sequences.

use thiserror::Error;

/// A box or identifier rejected at ingestion.
///
/// These never escape a layout pass: offending boxes are dropped before
/// ranking and reported through [`crate::ingest::IngestReport`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("box {index}: magnitude {value} is not finite")]
    NonFiniteValue { index: usize, value: f64 },
    #[error("box {index}: high/low bound is not finite")]
    NonFiniteBound { index: usize },
    #[error("box {index}: high {high} is below low {low}")]
    InvertedBounds { index: usize, high: f64, low: f64 },
    #[error("instrument identifier is empty")]
    EmptyInstrument,
    #[error("timestamp {0:?} is not RFC 3339")]
    BadTimestamp(String),
}
