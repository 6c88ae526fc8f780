//! Magnitude ordering: the recursion order of the layout.

use crate::model::{BoxSequence, PriceBox};
use crate::viewport::ViewportWindow;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Boxes sorted by descending `|value|`. Index 0 is the root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedSequence {
    pub timestamp: String,
    pub boxes: Vec<PriceBox>,
    /// Arrival index of each ranked box in the source sequence.
    pub source_indices: Vec<usize>,
}

impl RankedSequence {
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PriceBox> {
        self.boxes.get(index)
    }

    /// The ranked box immediately before `index`, if any.
    pub fn predecessor(&self, index: usize) -> Option<&PriceBox> {
        index.checked_sub(1).and_then(|i| self.boxes.get(i))
    }

    /// The sub-range selected by `window`, re-indexed from 0.
    ///
    /// The window is re-clamped against this sequence first, so a stale
    /// window never panics.
    pub fn slice(&self, window: &ViewportWindow) -> RankedSequence {
        let w = window.reclamp(self.len());
        let range = w.range();
        RankedSequence {
            timestamp: self.timestamp.clone(),
            boxes: self.boxes[range.clone()].to_vec(),
            source_indices: self.source_indices[range].to_vec(),
        }
    }
}

/// Stable sort by descending magnitude; ties keep arrival order.
pub fn rank(sequence: &BoxSequence) -> RankedSequence {
    let mut order: Vec<usize> = (0..sequence.boxes.len()).collect();
    // `sort_by` is stable, so equal magnitudes stay in arrival order.
    order.sort_by(|&a, &b| {
        let ma = sequence.boxes[a].magnitude();
        let mb = sequence.boxes[b].magnitude();
        mb.partial_cmp(&ma).unwrap_or(Ordering::Equal)
    });
    RankedSequence {
        timestamp: sequence.timestamp.clone(),
        boxes: order.iter().map(|&i| sequence.boxes[i]).collect(),
        source_indices: order,
    }
}
