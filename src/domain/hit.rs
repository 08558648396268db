//! The correlated output row: one confirmed Target 4 hit tied to its signal.

use chrono::{DateTime, Utc};

use crate::domain::metrics;

/// A hit message successfully joined to the signal it replies to, with the
/// derived performance figures frozen in.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelatedHit {
    pub pair: Option<String>,
    pub entry_price: f64,
    pub target4_final: f64,
    pub gain_percent: f64,
    pub duration_minutes: f64,
    pub signal_message_id: i64,
    pub hit_message_id: i64,
    pub signal_timestamp: DateTime<Utc>,
    pub hit_timestamp: DateTime<Utc>,
}

impl CorrelatedHit {
    /// Joins a parsed signal with its hit confirmation, computing gain and
    /// time-to-hit. `target4_final` should already reflect any price the hit
    /// message itself restated.
    #[allow(clippy::too_many_arguments)]
    pub fn derive(
        pair: Option<String>,
        entry_price: f64,
        target4_final: f64,
        signal_message_id: i64,
        hit_message_id: i64,
        signal_timestamp: DateTime<Utc>,
        hit_timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            pair,
            entry_price,
            target4_final,
            gain_percent: metrics::gain_percent(entry_price, target4_final),
            duration_minutes: metrics::duration_minutes(signal_timestamp, hit_timestamp),
            signal_message_id,
            hit_message_id,
            signal_timestamp,
            hit_timestamp,
        }
    }

    /// Pair symbol for presentation; rows whose signal text never named a
    /// recognizable pair render as `"Unknown"`.
    pub fn pair_label(&self) -> &str {
        self.pair.as_deref().unwrap_or("Unknown")
    }
}
