//! Label visibility for the high/low price labels of each box.
//!
//! A box shows its high label at the top edge and its low label at the bottom
//! edge. Labels are thinned out so neighbouring boxes do not repeat the same
//! side:
//! - two consecutive positive boxes: the later one hides its high label
//! - two consecutive negative boxes: the later one hides its low label
//! - a sign flip keeps only the label on the side of its own sign
//! - above `limit_threshold` boxes, only the root and flips keep labels
//!
//! A signal match overrides all of the above and shows both labels.

use crate::layout::LayoutNode;
use crate::model::InstrumentId;
use crate::ranking::RankedSequence;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LABEL_LIMIT_THRESHOLD: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelPolicy {
    /// Sequences longer than this only label the root and sign flips.
    pub limit_threshold: usize,
}

impl Default for LabelPolicy {
    fn default() -> Self {
        Self {
            limit_threshold: DEFAULT_LABEL_LIMIT_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelVisibility {
    pub show_high: bool,
    pub show_low: bool,
}

pub fn label_visibility(
    node: &LayoutNode,
    ranked: &RankedSequence,
    signal_match: bool,
    policy: &LabelPolicy,
) -> LabelVisibility {
    if signal_match {
        return LabelVisibility {
            show_high: true,
            show_low: true,
        };
    }
    let value = node.price_box.value;
    let prev = ranked.predecessor(node.index).map(|b| b.value).unwrap_or(0.0);
    let flip = node.is_first_different;
    let should_limit = ranked.len() > policy.limit_threshold;

    let consecutive_positive = prev > 0.0 && value > 0.0 && !flip;
    let consecutive_negative = prev < 0.0 && value < 0.0 && !flip;
    let density_ok = !should_limit || flip || node.index == 0;

    LabelVisibility {
        show_high: (!flip || value > 0.0) && density_ok && !consecutive_positive,
        show_low: (!flip || value < 0.0) && density_ok && !consecutive_negative,
    }
}

/// Price text for a label: 2 decimals for yen pairs, 5 for the major
/// currencies, 8 for everything else.
pub fn format_price(instrument: &InstrumentId, price: f64) -> String {
    let s = instrument.as_str();
    if instrument.is_yen_quoted() {
        format!("{:.2}", price)
    } else if s.contains("USD") || s.contains("EUR") || s.contains("GBP") {
        format!("{:.5}", price)
    } else {
        format!("{:.8}", price)
    }
}
