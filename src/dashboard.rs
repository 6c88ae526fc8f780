//! Per-instrument state for a set of watched instruments.
//!
//! The polling layer pushes whole sequences and signals in; frames are
//! recomputed from scratch on demand. Instruments keep the order they were
//! registered in.

use crate::config::EngineConfig;
use crate::frame::{Frame, FrameRequest, compose_frame};
use crate::ingest::{DocReport, IngestReport, ingest};
use crate::layout::Projection;
use crate::model::{BoxSequence, InstrumentId, SequenceDoc, Signal};
use crate::viewport::ViewportWindow;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentState {
    pub sequence: Option<BoxSequence>,
    pub window: ViewportWindow,
    pub signal: Option<Signal>,
}

impl InstrumentState {
    fn new(config: &EngineConfig) -> Self {
        Self {
            sequence: None,
            window: ViewportWindow::for_total(0, config.default_visible_count),
            signal: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    config: EngineConfig,
    instruments: IndexMap<InstrumentId, InstrumentState>,
}

impl Dashboard {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            instruments: IndexMap::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the watched set. Known instruments keep their state; names
    /// that do not normalize are skipped.
    pub fn set_instruments<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut next = IndexMap::new();
        for name in names {
            let id = match InstrumentId::new(name.as_ref()) {
                Ok(id) => id,
                Err(err) => {
                    warn!("[resobox] ignoring instrument {:?}: {}", name.as_ref(), err);
                    continue;
                }
            };
            if next.contains_key(&id) {
                continue;
            }
            let state = self
                .instruments
                .shift_remove(&id)
                .unwrap_or_else(|| InstrumentState::new(&self.config));
            next.insert(id, state);
        }
        self.instruments = next;
        info!(count = self.instruments.len(), "watched instruments updated");
    }

    pub fn instruments(&self) -> impl Iterator<Item = &InstrumentId> {
        self.instruments.keys()
    }

    pub fn state(&self, id: &InstrumentId) -> Option<&InstrumentState> {
        self.instruments.get(id)
    }

    /// Validate and store a new sequence, registering the instrument if
    /// needed, and re-clamp its window to the new length.
    pub fn push_sequence(&mut self, id: InstrumentId, sequence: BoxSequence) -> IngestReport {
        let (sequence, report) = ingest(&sequence.timestamp, sequence.boxes);
        let config = &self.config;
        let state = self
            .instruments
            .entry(id)
            .or_insert_with(|| InstrumentState::new(config));
        let was_empty = state.window.total == 0;
        let total = sequence.boxes.len();
        state.window = if was_empty {
            ViewportWindow::for_total(total, config.default_visible_count)
        } else {
            state.window.reclamp(total)
        };
        state.sequence = Some(sequence);
        report
    }

    /// Push every sequence of a snapshot document.
    pub fn push_doc(&mut self, doc: SequenceDoc) -> DocReport {
        doc.sequences
            .into_iter()
            .map(|(id, seq)| {
                let report = self.push_sequence(id.clone(), seq);
                (id, report)
            })
            .collect()
    }

    /// Attach a signal to the instrument named by its `pair`. Returns false
    /// when that instrument is not watched.
    pub fn push_signal(&mut self, signal: Signal) -> bool {
        let Some(id) = signal.instrument() else {
            warn!("[resobox] signal {} has no usable pair", signal.signal_id);
            return false;
        };
        match self.instruments.get_mut(&id) {
            Some(state) => {
                state.signal = Some(signal);
                true
            }
            None => false,
        }
    }

    /// Apply `f` to the instrument's window. Returns the new window.
    pub fn update_window<F>(&mut self, id: &InstrumentId, f: F) -> Option<ViewportWindow>
    where
        F: FnOnce(&ViewportWindow) -> ViewportWindow,
    {
        let state = self.instruments.get_mut(id)?;
        state.window = f(&state.window);
        Some(state.window)
    }

    pub fn frame(&self, id: &InstrumentId, projection: Projection, now: DateTime<Utc>) -> Option<Frame> {
        let state = self.instruments.get(id)?;
        let sequence = state.sequence.as_ref()?;
        Some(compose_frame(FrameRequest {
            instrument: id,
            sequence,
            window: state.window,
            projection,
            signal: state.signal.as_ref(),
            now,
            config: &self.config,
        }))
    }

    /// Frames for every instrument that has data, in watch order.
    pub fn frames(&self, projection: Projection, now: DateTime<Utc>) -> Vec<Frame> {
        self.instruments
            .par_iter()
            .filter_map(|(id, state)| {
                let sequence = state.sequence.as_ref()?;
                Some(compose_frame(FrameRequest {
                    instrument: id,
                    sequence,
                    window: state.window,
                    projection,
                    signal: state.signal.as_ref(),
                    now,
                    config: &self.config,
                }))
            })
            .collect()
    }
}
