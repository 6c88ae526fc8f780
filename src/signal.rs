//! Signal matching: highlights boxes whose discretized value appears in an
//! active signal's pattern with the signal's direction.

use crate::model::{InstrumentId, PriceBox, Signal, SignalType};
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

pub const DEFAULT_SIGNAL_TTL_SECS: i64 = 3600;

/// Smallest price step of an instrument.
pub fn price_unit(instrument: &InstrumentId) -> f64 {
    if instrument.is_yen_quoted() {
        0.01
    } else {
        0.00001
    }
}

/// Number of price units in `value`, rounded half away from zero.
pub fn discretize(value: f64, unit: f64) -> i64 {
    (value / unit).round() as i64
}

/// A signal bound to one instrument and one evaluation instant.
///
/// Recency and instrument checks happen once in [`SignalMatcher::new`];
/// [`SignalMatcher::matches`] is then a pure per-box test.
#[derive(Debug, Clone)]
pub struct SignalMatcher<'a> {
    signal: Option<&'a Signal>,
    unit: f64,
}

impl<'a> SignalMatcher<'a> {
    pub fn new(
        signal: Option<&'a Signal>,
        instrument: &InstrumentId,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        let signal = signal.filter(|s| {
            if s.pattern_sequence.is_empty() {
                return false;
            }
            if s.instrument().as_ref() != Some(instrument) {
                debug!(signal = %s.signal_id, pair = %s.pair, %instrument, "signal targets another instrument");
                return false;
            }
            if !s.is_recent_at(now, ttl) {
                debug!(signal = %s.signal_id, timestamp = %s.timestamp, "signal expired");
                return false;
            }
            true
        });
        Self {
            signal,
            unit: price_unit(instrument),
        }
    }

    pub fn is_active(&self) -> bool {
        self.signal.is_some()
    }

    pub fn matches(&self, price_box: &PriceBox) -> bool {
        let Some(signal) = self.signal else {
            return false;
        };
        let units = discretize(price_box.value, self.unit);
        if !signal.pattern_sequence.contains(&units) {
            return false;
        }
        match signal.signal_type {
            SignalType::Long => units > 0,
            SignalType::Short => units < 0,
            SignalType::Unknown => false,
        }
    }
}

/// One-shot form of [`SignalMatcher`] with the default one hour lifetime.
pub fn matches(
    price_box: &PriceBox,
    signal: Option<&Signal>,
    instrument: &InstrumentId,
    now: DateTime<Utc>,
) -> bool {
    SignalMatcher::new(
        signal,
        instrument,
        now,
        Duration::seconds(DEFAULT_SIGNAL_TTL_SECS),
    )
    .matches(price_box)
}
