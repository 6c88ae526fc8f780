//! Viewport window over a ranked sequence, plus the drag gesture that moves
//! and resizes it.
//!
//! # Usage
//!
//! ```rust
//! use resobox::viewport::{DragMode, ViewportSlider, ViewportWindow};
//!
//! // 20 boxes on a 200px track: 10px per box.
//! let mut slider = ViewportSlider::new(ViewportWindow::new(5, 10, 20));
//! slider.press(200.0, 100.0, 16.0);
//! assert_eq!(slider.mode(), Some(DragMode::Body));
//! slider.drag(130.0);
//! assert_eq!(slider.window().start, 8);
//! slider.release();
//! ```

use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::debug;

/// Smallest number of boxes a window may show.
pub const MIN_VISIBLE_COUNT: usize = 2;

/// Labels under the slider track, coarsest first.
pub const TIME_SCALE_LABELS: [&str; 13] = [
    "1M", "1W", "3D", "1D", "12H", "4H", "1H", "30m", "15m", "5m", "1m", "30s", "1s",
];

/// Visible range `[start, start + count)` over `total` ranked boxes.
///
/// Invariants (restored on every mutation): `start + count <= total` and
/// `count >= MIN_VISIBLE_COUNT` whenever `total` allows it. A total below the
/// minimum yields `[0, total)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportWindow {
    pub start: usize,
    pub count: usize,
    pub total: usize,
}

impl ViewportWindow {
    pub fn new(start: usize, count: usize, total: usize) -> Self {
        Self::clamped(start as i64, count as i64, total)
    }

    /// Window opened at the first box showing up to `default_count` boxes.
    pub fn for_total(total: usize, default_count: usize) -> Self {
        Self::new(0, default_count, total)
    }

    fn clamped(start: i64, count: i64, total: usize) -> Self {
        let min = MIN_VISIBLE_COUNT as i64;
        let t = total as i64;
        if t < min {
            return Self {
                start: 0,
                count: total,
                total,
            };
        }
        let count = count.clamp(min, t);
        let start = start.clamp(0, t - count);
        Self {
            start: start as usize,
            count: count as usize,
            total,
        }
    }

    pub fn end(&self) -> usize {
        self.start + self.count
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Shift the whole window, keeping its size.
    pub fn move_by(&self, delta: i64) -> Self {
        Self::clamped(
            (self.start as i64).saturating_add(delta),
            self.count as i64,
            self.total,
        )
    }

    /// Move the left edge; the right edge stays put.
    pub fn resize_start(&self, delta: i64) -> Self {
        let end = self.end() as i64;
        let max_start = (end - MIN_VISIBLE_COUNT as i64).max(0);
        let start = (self.start as i64).saturating_add(delta).clamp(0, max_start);
        Self::clamped(start, end - start, self.total)
    }

    /// Move the right edge; the left edge stays put.
    pub fn resize_end(&self, delta: i64) -> Self {
        let max_count = self.total as i64 - self.start as i64;
        let count = (self.count as i64)
            .saturating_add(delta)
            .max(MIN_VISIBLE_COUNT as i64)
            .min(max_count);
        Self::clamped(self.start as i64, count, self.total)
    }

    /// Re-apply the invariants against a new `total`, keeping the window as
    /// close to its old place as possible.
    pub fn reclamp(&self, total: usize) -> Self {
        let w = Self::clamped(self.start as i64, self.count as i64, total);
        if w != (Self { total, ..*self }) {
            debug!(
                old_start = self.start,
                old_count = self.count,
                start = w.start,
                count = w.count,
                total,
                "viewport re-clamped"
            );
        }
        w
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Drag gesture
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DragMode {
    Body,
    StartEdge,
    EndEdge,
}

/// One continuous drag on the slider track. The mode is chosen when the
/// gesture begins and never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGesture {
    pub mode: DragMode,
    origin_x: f64,
    unit_width: f64,
    initial: ViewportWindow,
}

impl DragGesture {
    /// Start a drag at `touch_x` on a track `track_width` wide. Returns
    /// `None` when there is nothing to drag (empty sequence or zero width).
    pub fn begin(
        window: ViewportWindow,
        track_width: f64,
        touch_x: f64,
        edge_hit_zone: f64,
    ) -> Option<Self> {
        if window.total == 0 || !(track_width > 0.0) {
            return None;
        }
        let unit_width = track_width / window.total as f64;
        let selection_start = window.start as f64 * unit_width;
        let selection_width = window.count as f64 * unit_width;
        let local_x = touch_x - selection_start;
        let mode = if local_x < edge_hit_zone {
            DragMode::StartEdge
        } else if local_x > selection_width - edge_hit_zone {
            DragMode::EndEdge
        } else {
            DragMode::Body
        };
        Some(Self {
            mode,
            origin_x: touch_x,
            unit_width,
            initial: window,
        })
    }

    /// Window for the pointer now at `current_x`, relative to the window
    /// captured when the gesture began.
    pub fn update(&self, current_x: f64) -> ViewportWindow {
        let delta = ((current_x - self.origin_x) / self.unit_width).round() as i64;
        match self.mode {
            DragMode::Body => self.initial.move_by(delta),
            DragMode::StartEdge => self.initial.resize_start(delta),
            DragMode::EndEdge => self.initial.resize_end(delta),
        }
    }
}

/// Slider state: the current window and the gesture in progress, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSlider {
    window: ViewportWindow,
    gesture: Option<DragGesture>,
}

impl ViewportSlider {
    pub fn new(window: ViewportWindow) -> Self {
        Self {
            window,
            gesture: None,
        }
    }

    pub fn window(&self) -> ViewportWindow {
        self.window
    }

    pub fn mode(&self) -> Option<DragMode> {
        self.gesture.map(|g| g.mode)
    }

    /// Begin a gesture unless one is already running.
    pub fn press(&mut self, track_width: f64, x: f64, edge_hit_zone: f64) {
        if self.gesture.is_none() {
            self.gesture = DragGesture::begin(self.window, track_width, x, edge_hit_zone);
        }
    }

    pub fn drag(&mut self, x: f64) -> ViewportWindow {
        if let Some(g) = self.gesture {
            self.window = g.update(x);
        }
        self.window
    }

    pub fn release(&mut self) {
        self.gesture = None;
    }

    /// Follow a new sequence length; an in-flight gesture is dropped.
    pub fn set_total(&mut self, total: usize) {
        if total != self.window.total {
            self.gesture = None;
        }
        self.window = self.window.reclamp(total);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Time scale
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeTick {
    pub label: &'static str,
    /// Fraction of the track width, `0.0..=1.0`.
    pub position: f64,
    pub in_range: bool,
}

/// Evenly spaced time-scale ticks, flagged when they fall inside `window`.
pub fn time_scale_ticks(window: &ViewportWindow) -> Vec<TimeTick> {
    let last = (TIME_SCALE_LABELS.len() - 1) as f64;
    TIME_SCALE_LABELS
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let position = i as f64 / last;
            let value = (position * window.total as f64) as usize;
            TimeTick {
                label,
                position,
                in_range: value >= window.start && value <= window.end(),
            }
        })
        .collect()
}
