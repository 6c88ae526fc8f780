//! Ingestion: validates raw box payloads before they reach the layout.
//!
//! Boxes with non-finite numbers or inverted bounds are dropped and reported;
//! the rest keep their arrival order. Payload text can come from any
//! [`SnapshotSource`]; [`FsSource`] reads from the local filesystem.

use crate::error::DataError;
use crate::model::{BoxSequence, InstrumentId, PriceBox, SequenceDoc};
use anyhow::{Context, Result, anyhow};
use camino::Utf8Path;
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::warn;

/// Trait for abstracting where snapshot payloads are read from.
pub trait SnapshotSource {
    fn read_to_string(&mut self, path: &Utf8Path) -> Result<String>;
}

/// Reads payloads directly from the local filesystem.
pub struct FsSource;

impl SnapshotSource for FsSource {
    fn read_to_string(&mut self, path: &Utf8Path) -> Result<String> {
        std::fs::read_to_string(path.as_std_path())
            .with_context(|| format!("Failed to read {}", path))
    }
}

/// Boxes dropped while ingesting one sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    pub accepted: usize,
    pub rejected: Vec<DataError>,
}

impl IngestReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

pub fn validate_box(index: usize, b: &PriceBox) -> Result<(), DataError> {
    if !b.value.is_finite() {
        return Err(DataError::NonFiniteValue {
            index,
            value: b.value,
        });
    }
    if !b.high.is_finite() || !b.low.is_finite() {
        return Err(DataError::NonFiniteBound { index });
    }
    if b.high < b.low {
        return Err(DataError::InvertedBounds {
            index,
            high: b.high,
            low: b.low,
        });
    }
    Ok(())
}

/// Build a [`BoxSequence`] from raw boxes, dropping the invalid ones.
pub fn ingest(timestamp: &str, raw: Vec<PriceBox>) -> (BoxSequence, IngestReport) {
    let mut report = IngestReport::default();
    let mut boxes = Vec::with_capacity(raw.len());
    for (index, b) in raw.into_iter().enumerate() {
        match validate_box(index, &b) {
            Ok(()) => boxes.push(b),
            Err(err) => {
                warn!(%timestamp, "[resobox] dropping box: {}", err);
                report.rejected.push(err);
            }
        }
    }
    report.accepted = boxes.len();
    let seq = BoxSequence::new(timestamp, boxes);
    if let Err(err) = seq.parsed_timestamp() {
        warn!("[resobox] {}", err);
    }
    (seq, report)
}

/// Per-instrument reports for a whole document, in the document's order.
pub type DocReport = IndexMap<InstrumentId, IngestReport>;

/// Run every sequence of `doc` through [`ingest`].
pub fn validate_doc(doc: SequenceDoc) -> (SequenceDoc, DocReport) {
    let mut out = SequenceDoc::default();
    let mut reports = DocReport::new();
    for (id, seq) in doc.sequences {
        let (seq, report) = ingest(&seq.timestamp, seq.boxes);
        out.sequences.insert(id.clone(), seq);
        reports.insert(id, report);
    }
    (out, reports)
}

/// Wire form of one slice. Numbers may be `null`, which reads as NaN and is
/// then rejected like any other non-finite value.
#[derive(Debug, Deserialize)]
struct RawSlice {
    timestamp: String,
    #[serde(default)]
    boxes: Vec<RawBox>,
}

#[derive(Debug, Deserialize)]
struct RawBox {
    high: Option<f64>,
    low: Option<f64>,
    value: Option<f64>,
}

impl RawSlice {
    fn into_sequence(self) -> (BoxSequence, IngestReport) {
        let boxes = self
            .boxes
            .into_iter()
            .map(|b| {
                PriceBox::new(
                    b.high.unwrap_or(f64::NAN),
                    b.low.unwrap_or(f64::NAN),
                    b.value.unwrap_or(f64::NAN),
                )
            })
            .collect();
        ingest(&self.timestamp, boxes)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload {
    Single(RawSlice),
    ByInstrument(IndexMap<String, Option<RawSlice>>),
}

/// Parse a payload into a [`SequenceDoc`].
///
/// Accepts either one `{ "timestamp", "boxes" }` slice, which is filed under
/// `default_instrument`, or an object mapping instrument names to slices
/// (`null` entries are skipped). Each accepted sequence has a report of the
/// boxes dropped from it.
pub fn parse_payload(
    text: &str,
    default_instrument: Option<&InstrumentId>,
) -> Result<(SequenceDoc, DocReport)> {
    let payload: Payload = serde_json::from_str(text).context("Failed to parse box payload")?;
    let mut doc = SequenceDoc::default();
    let mut reports = DocReport::new();
    match payload {
        Payload::Single(slice) => {
            let id = default_instrument
                .cloned()
                .ok_or_else(|| anyhow!("single-slice payload needs an instrument name"))?;
            let (seq, report) = slice.into_sequence();
            doc.sequences.insert(id.clone(), seq);
            reports.insert(id, report);
        }
        Payload::ByInstrument(map) => {
            for (name, slice) in map {
                let id = match InstrumentId::new(&name) {
                    Ok(id) => id,
                    Err(err) => {
                        warn!("[resobox] skipping entry {:?}: {}", name, err);
                        continue;
                    }
                };
                if let Some(slice) = slice {
                    let (seq, report) = slice.into_sequence();
                    doc.sequences.insert(id.clone(), seq);
                    reports.insert(id, report);
                }
            }
        }
    }
    Ok((doc, reports))
}

/// Load a snapshot from `path` via `source`.
pub fn load_snapshot<S: SnapshotSource>(
    source: &mut S,
    path: &Utf8Path,
    default_instrument: Option<&InstrumentId>,
) -> Result<(SequenceDoc, DocReport)> {
    let text = source.read_to_string(path)?;
    parse_payload(&text, default_instrument).with_context(|| format!("In {}", path))
}
