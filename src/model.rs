use crate::error::DataError;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

// ────────────────────────────────────────────────────────────────────────────
// SequenceDoc – binary snapshot wrapper
// ────────────────────────────────────────────────────────────────────────────

const MAGIC: &[u8; 7] = b"RESOBOX";
const VERSION: u32 = 1;

/// A snapshot of the latest box sequence per instrument, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SequenceDoc {
    pub sequences: IndexMap<InstrumentId, BoxSequence>,
}

impl SequenceDoc {
    /// Save the document to a binary file with magic bytes and versioning.
    pub fn save_to_binary<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        std::io::Write::write_all(&mut writer, MAGIC)?;
        std::io::Write::write_all(&mut writer, &VERSION.to_le_bytes())?;
        bincode::serde::encode_into_std_write(self, &mut writer, bincode::config::standard())?;
        Ok(())
    }

    /// Load a document from a binary file, checking magic bytes and version.
    ///
    /// Every sequence is re-validated on the way in; invalid boxes are dropped
    /// and logged.
    pub fn load_from_binary<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)?;
        let mut reader = std::io::BufReader::new(file);
        let mut magic = [0u8; 7];
        std::io::Read::read_exact(&mut reader, &mut magic)?;
        if &magic != MAGIC {
            anyhow::bail!("Invalid magic bytes: expected 'RESOBOX'");
        }
        let mut version_bytes = [0u8; 4];
        std::io::Read::read_exact(&mut reader, &mut version_bytes)?;
        let version = u32::from_le_bytes(version_bytes);
        if version != VERSION {
            anyhow::bail!("Unsupported version: {}", version);
        }
        let doc: SequenceDoc =
            bincode::serde::decode_from_std_read(&mut reader, bincode::config::standard())?;
        let (doc, _) = crate::ingest::validate_doc(doc);
        Ok(doc)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Boxes
// ────────────────────────────────────────────────────────────────────────────

/// One signed magnitude sample with its price bounds.
///
/// The sign of `value` drives layout polarity; `value.abs()` drives ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBox {
    pub high: f64,
    pub low: f64,
    pub value: f64,
}

impl PriceBox {
    pub fn new(high: f64, low: f64, value: f64) -> Self {
        Self { high, low, value }
    }

    pub fn magnitude(&self) -> f64 {
        self.value.abs()
    }

    pub fn is_positive(&self) -> bool {
        self.value > 0.0
    }

    pub fn is_negative(&self) -> bool {
        self.value < 0.0
    }

    pub fn polarity(&self) -> Polarity {
        if self.is_positive() {
            Polarity::Positive
        } else {
            Polarity::Negative
        }
    }
}

/// Colour polarity of a box. Zero magnitudes paint as negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Polarity {
    Positive,
    Negative,
}

/// Boxes for one instrument at one timestamp, in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxSequence {
    pub timestamp: String,
    pub boxes: Vec<PriceBox>,
}

impl BoxSequence {
    pub fn new(timestamp: impl Into<String>, boxes: Vec<PriceBox>) -> Self {
        Self {
            timestamp: timestamp.into(),
            boxes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Parse `timestamp` as RFC 3339 (fractional seconds optional).
    pub fn parsed_timestamp(&self) -> Result<DateTime<Utc>, DataError> {
        parse_timestamp(&self.timestamp)
    }
}

pub(crate) fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, DataError> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| DataError::BadTimestamp(s.to_string()))
}

// ────────────────────────────────────────────────────────────────────────────
// Instrument identifiers
// ────────────────────────────────────────────────────────────────────────────

/// Normalized instrument key: trimmed and uppercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InstrumentId(String);

impl InstrumentId {
    pub fn new(raw: &str) -> Result<Self, DataError> {
        let norm = raw.trim().to_uppercase();
        if norm.is_empty() {
            return Err(DataError::EmptyInstrument);
        }
        Ok(Self(norm))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Yen-quoted instruments use a coarser price unit.
    pub fn is_yen_quoted(&self) -> bool {
        self.0.contains("JPY")
    }
}

impl TryFrom<String> for InstrumentId {
    type Error = DataError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        InstrumentId::new(&value)
    }
}

impl From<InstrumentId> for String {
    fn from(id: InstrumentId) -> Self {
        id.0
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Signals
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalType {
    #[serde(rename = "LONG")]
    Long,
    #[serde(rename = "SHORT")]
    Short,
    #[serde(other)]
    Unknown,
}

/// A time-bounded highlight request for boxes matching a discretized pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub signal_id: String,
    pub pair: String,
    pub signal_type: SignalType,
    #[serde(default)]
    pub pattern_sequence: Vec<i64>,
    pub timestamp: String,
}

impl Signal {
    /// True while `0 <= now - timestamp < ttl`. Unparseable timestamps are
    /// never recent.
    pub fn is_recent_at(&self, now: DateTime<Utc>, ttl: chrono::Duration) -> bool {
        match parse_timestamp(&self.timestamp) {
            Ok(at) => {
                let age = now.signed_duration_since(at);
                age >= chrono::Duration::zero() && age < ttl
            }
            Err(_) => false,
        }
    }

    /// The instrument this signal targets, if its `pair` is usable.
    pub fn instrument(&self) -> Option<InstrumentId> {
        InstrumentId::new(&self.pair).ok()
    }
}
