//! Line-chart projection: the high and low bounds of a sequence as two
//! polylines in arrival order.

use crate::geometry::Vec2;
use crate::model::BoxSequence;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LineSeries {
    pub high: Vec<Vec2>,
    pub low: Vec<Vec2>,
}

/// Map the bounds into a `width` x `height` frame with `y` growing downward.
///
/// Both polylines share one vertical scale spanning the lowest low to the
/// highest high. A flat range puts every point on the vertical midline.
pub fn line_series(sequence: &BoxSequence, width: f64, height: f64) -> LineSeries {
    let boxes = &sequence.boxes;
    if boxes.is_empty() {
        return LineSeries::default();
    }
    let max = boxes
        .iter()
        .map(|b| b.high.max(b.low))
        .fold(f64::NEG_INFINITY, f64::max);
    let min = boxes
        .iter()
        .map(|b| b.high.min(b.low))
        .fold(f64::INFINITY, f64::min);
    let range = max - min;

    let x_at = |i: usize| {
        if boxes.len() > 1 {
            i as f64 / (boxes.len() - 1) as f64 * width
        } else {
            0.0
        }
    };
    let y_at = |v: f64| {
        if range > 0.0 {
            height - (v - min) / range * height
        } else {
            height * 0.5
        }
    };

    LineSeries {
        high: boxes
            .iter()
            .enumerate()
            .map(|(i, b)| Vec2::new(x_at(i), y_at(b.high)))
            .collect(),
        low: boxes
            .iter()
            .enumerate()
            .map(|(i, b)| Vec2::new(x_at(i), y_at(b.low)))
            .collect(),
    }
}
