//! Frame composition: rank, window, lay out, then annotate each node with
//! label visibility and signal state so a renderer can paint it directly.

use crate::config::EngineConfig;
use crate::labels::{LabelVisibility, format_price, label_visibility};
use crate::layout::{LayoutNode, Projection, build_layout};
use crate::model::{BoxSequence, InstrumentId, Signal};
use crate::ranking::rank;
use crate::signal::SignalMatcher;
use crate::viewport::ViewportWindow;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedNode {
    #[serde(flatten)]
    pub node: LayoutNode,
    pub labels: LabelVisibility,
    pub signal_match: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub instrument: InstrumentId,
    pub timestamp: String,
    pub projection: Projection,
    /// Window actually applied, after re-clamping to `total`.
    pub window: ViewportWindow,
    /// Number of ranked boxes before windowing.
    pub total: usize,
    pub nodes: Vec<AnnotatedNode>,
}

impl Frame {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Inputs for one frame. Everything is borrowed and read-only.
#[derive(Debug, Clone, Copy)]
pub struct FrameRequest<'a> {
    pub instrument: &'a InstrumentId,
    pub sequence: &'a BoxSequence,
    pub window: ViewportWindow,
    pub projection: Projection,
    pub signal: Option<&'a Signal>,
    pub now: DateTime<Utc>,
    pub config: &'a EngineConfig,
}

pub fn compose_frame(req: FrameRequest<'_>) -> Frame {
    let ranked = rank(req.sequence);
    let window = req.window.reclamp(ranked.len());
    let visible = ranked.slice(&window);
    let nodes = build_layout(&visible, req.projection, &req.config.layout_params());

    let matcher = SignalMatcher::new(req.signal, req.instrument, req.now, req.config.signal_ttl());
    let policy = req.config.label_policy();
    let nodes: Vec<AnnotatedNode> = nodes
        .into_iter()
        .map(|node| {
            let signal_match = matcher.matches(&node.price_box);
            let labels = label_visibility(&node, &visible, signal_match, &policy);
            let high_label = labels
                .show_high
                .then(|| format_price(req.instrument, node.price_box.high));
            let low_label = labels
                .show_low
                .then(|| format_price(req.instrument, node.price_box.low));
            AnnotatedNode {
                node,
                labels,
                signal_match,
                high_label,
                low_label,
            }
        })
        .collect();

    debug!(
        instrument = %req.instrument,
        total = ranked.len(),
        start = window.start,
        count = window.count,
        nodes = nodes.len(),
        "frame composed"
    );

    Frame {
        instrument: req.instrument.clone(),
        timestamp: req.sequence.timestamp.clone(),
        projection: req.projection,
        window,
        total: ranked.len(),
        nodes,
    }
}
