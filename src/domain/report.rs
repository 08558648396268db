//! Ordering, ranked views, summary aggregates, and row projections over
//! correlated hits.

use std::cmp::Ordering;
use std::fmt;

use chrono::FixedOffset;

use crate::domain::hit::CorrelatedHit;
use crate::domain::metrics;

/// Length of the ranked side panels (top gainers, fastest hits).
pub const RANKED_LEN: usize = 5;

/// Column set shared by the display table and every export format. Exporters
/// must emit exactly these columns in this order.
pub const EXPORT_COLUMNS: [&str; 7] = [
    "Pair",
    "Entry",
    "Target 4",
    "Gain %",
    "Duration",
    "Signal Time",
    "Hit Time",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    HitTime,
    Gain,
    Duration,
}

impl SortKey {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "hit_time" => Some(Self::HitTime),
            "gain" => Some(Self::Gain),
            "duration" => Some(Self::Duration),
            _ => None,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::HitTime => "hit_time",
            Self::Gain => "gain",
            Self::Duration => "duration",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ascending" => Some(Self::Ascending),
            "descending" => Some(Self::Descending),
            _ => None,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        };
        write!(f, "{label}")
    }
}

/// Stable in-place sort. Descending order reverses the comparator rather
/// than the sorted vector, so tied rows keep their insertion order in both
/// directions.
pub fn sort_hits(hits: &mut [CorrelatedHit], key: SortKey, direction: SortDirection) {
    hits.sort_by(|a, b| {
        let ord = match key {
            SortKey::HitTime => a.hit_timestamp.cmp(&b.hit_timestamp),
            SortKey::Gain => a.gain_percent.total_cmp(&b.gain_percent),
            SortKey::Duration => a.duration_minutes.total_cmp(&b.duration_minutes),
        };
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

fn ranked_by<'a, F>(hits: &'a [CorrelatedHit], cmp: F) -> Vec<&'a CorrelatedHit>
where
    F: Fn(&CorrelatedHit, &CorrelatedHit) -> Ordering,
{
    let mut ranked: Vec<&CorrelatedHit> = hits.iter().collect();
    ranked.sort_by(|a, b| cmp(a, b));
    ranked.truncate(RANKED_LEN);
    ranked
}

/// Up to [`RANKED_LEN`] rows by gain, best first; ties keep insertion order.
pub fn top_gainers(hits: &[CorrelatedHit]) -> Vec<&CorrelatedHit> {
    ranked_by(hits, |a, b| a.gain_percent.total_cmp(&b.gain_percent).reverse())
}

/// Up to [`RANKED_LEN`] rows by time-to-hit, quickest first.
pub fn fastest_hits(hits: &[CorrelatedHit]) -> Vec<&CorrelatedHit> {
    ranked_by(hits, |a, b| a.duration_minutes.total_cmp(&b.duration_minutes))
}

/// Headline aggregates over a non-empty result set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub total_hits: usize,
    /// Mean gain over the top-gainer panel, not the whole set.
    pub top_avg_gain: f64,
    pub avg_duration_minutes: f64,
}

impl Summary {
    /// `None` for an empty set; means over zero rows are undefined and the
    /// caller reports the no-data state instead.
    pub fn compute(hits: &[CorrelatedHit]) -> Option<Self> {
        if hits.is_empty() {
            return None;
        }
        let top = top_gainers(hits);
        let top_avg_gain =
            top.iter().map(|hit| hit.gain_percent).sum::<f64>() / top.len() as f64;
        let avg_duration_minutes =
            hits.iter().map(|hit| hit.duration_minutes).sum::<f64>() / hits.len() as f64;
        Some(Self {
            total_hits: hits.len(),
            top_avg_gain,
            avg_duration_minutes,
        })
    }
}

/// Human-facing projection: rounded gain, `"Hh Mm"` duration, short local
/// timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub pair: String,
    pub entry: f64,
    pub target4: f64,
    pub gain: String,
    pub duration: String,
    pub signal_time: String,
    pub hit_time: String,
}

/// Export projection: raw numeric gain and duration-minutes, full local
/// timestamps. Row order must match the slice handed in.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub pair: String,
    pub entry: f64,
    pub target4: f64,
    pub gain_percent: f64,
    pub duration_minutes: f64,
    pub signal_time: String,
    pub hit_time: String,
}

pub fn display_rows(hits: &[CorrelatedHit], offset: FixedOffset) -> Vec<DisplayRow> {
    hits.iter()
        .map(|hit| DisplayRow {
            pair: hit.pair_label().to_string(),
            entry: hit.entry_price,
            target4: hit.target4_final,
            gain: format!("{:.2}%", hit.gain_percent),
            duration: metrics::format_duration(hit.duration_minutes),
            signal_time: local_stamp(hit.signal_timestamp, offset, "%m-%d %H:%M"),
            hit_time: local_stamp(hit.hit_timestamp, offset, "%m-%d %H:%M"),
        })
        .collect()
}

pub fn export_rows(hits: &[CorrelatedHit], offset: FixedOffset) -> Vec<ExportRow> {
    hits.iter()
        .map(|hit| ExportRow {
            pair: hit.pair_label().to_string(),
            entry: hit.entry_price,
            target4: hit.target4_final,
            gain_percent: hit.gain_percent,
            duration_minutes: hit.duration_minutes,
            signal_time: local_stamp(hit.signal_timestamp, offset, "%Y-%m-%d %H:%M:%S"),
            hit_time: local_stamp(hit.hit_timestamp, offset, "%Y-%m-%d %H:%M:%S"),
        })
        .collect()
}

fn local_stamp(
    timestamp: chrono::DateTime<chrono::Utc>,
    offset: FixedOffset,
    pattern: &str,
) -> String {
    timestamp.with_timezone(&offset).format(pattern).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;

    fn hit_with(id: i64, gain: f64, minutes: i64) -> CorrelatedHit {
        let signal_ts = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        CorrelatedHit::derive(
            Some(format!("PAIR{id}USDT")),
            100.0,
            100.0 + gain,
            id,
            id + 1000,
            signal_ts,
            signal_ts + Duration::minutes(minutes),
        )
    }

    fn ids(hits: &[CorrelatedHit]) -> Vec<i64> {
        hits.iter().map(|hit| hit.signal_message_id).collect()
    }

    #[test]
    fn parse_sort_inputs() {
        assert_eq!(SortKey::parse("hit_time"), Some(SortKey::HitTime));
        assert_eq!(SortKey::parse("gain"), Some(SortKey::Gain));
        assert_eq!(SortKey::parse("duration"), Some(SortKey::Duration));
        assert_eq!(SortKey::parse("Gain"), None);

        assert_eq!(
            SortDirection::parse("ascending"),
            Some(SortDirection::Ascending)
        );
        assert_eq!(
            SortDirection::parse("descending"),
            Some(SortDirection::Descending)
        );
        assert_eq!(SortDirection::parse("desc"), None);
    }

    #[test]
    fn defaults_are_hit_time_descending() {
        assert_eq!(SortKey::default(), SortKey::HitTime);
        assert_eq!(SortDirection::default(), SortDirection::Descending);
    }

    #[test]
    fn sort_by_each_key() {
        let mut hits = vec![hit_with(1, 40.0, 300), hit_with(2, 10.0, 50), hit_with(3, 25.0, 120)];

        sort_hits(&mut hits, SortKey::Gain, SortDirection::Descending);
        assert_eq!(ids(&hits), vec![1, 3, 2]);

        sort_hits(&mut hits, SortKey::Duration, SortDirection::Ascending);
        assert_eq!(ids(&hits), vec![2, 3, 1]);

        sort_hits(&mut hits, SortKey::HitTime, SortDirection::Descending);
        assert_eq!(ids(&hits), vec![1, 3, 2]);
    }

    #[test]
    fn tied_rows_keep_insertion_order_both_directions() {
        let mut hits = vec![hit_with(1, 20.0, 10), hit_with(2, 20.0, 20), hit_with(3, 20.0, 30)];
        sort_hits(&mut hits, SortKey::Gain, SortDirection::Descending);
        assert_eq!(ids(&hits), vec![1, 2, 3]);
        sort_hits(&mut hits, SortKey::Gain, SortDirection::Ascending);
        assert_eq!(ids(&hits), vec![1, 2, 3]);
    }

    #[test]
    fn ranked_views_truncate_and_order() {
        let hits: Vec<CorrelatedHit> = (0..7)
            .map(|i| hit_with(i, f64::from(i as i32) * 5.0, 700 - i * 60))
            .collect();

        let top = top_gainers(&hits);
        assert_eq!(top.len(), RANKED_LEN);
        assert_eq!(top[0].signal_message_id, 6);
        assert_eq!(top[4].signal_message_id, 2);

        let fastest = fastest_hits(&hits);
        assert_eq!(fastest.len(), RANKED_LEN);
        assert_eq!(fastest[0].signal_message_id, 6);
    }

    #[test]
    fn ranked_views_short_input() {
        let hits = vec![hit_with(1, 5.0, 10), hit_with(2, 15.0, 20)];
        assert_eq!(top_gainers(&hits).len(), 2);
        assert_eq!(fastest_hits(&hits).len(), 2);
    }

    #[test]
    fn summary_means_over_top_panel_and_whole_set() {
        let hits: Vec<CorrelatedHit> = (1..=6)
            .map(|i| hit_with(i, f64::from(i as i32) * 10.0, i * 60))
            .collect();
        let summary = Summary::compute(&hits).unwrap();

        assert_eq!(summary.total_hits, 6);
        // Top five gains are 60, 50, 40, 30, 20.
        assert_relative_eq!(summary.top_avg_gain, 40.0);
        // All six durations: 60..360 minutes.
        assert_relative_eq!(summary.avg_duration_minutes, 210.0);
    }

    #[test]
    fn summary_small_set_averages_what_exists() {
        let hits = vec![hit_with(1, 10.0, 30), hit_with(2, 30.0, 90)];
        let summary = Summary::compute(&hits).unwrap();
        assert_eq!(summary.total_hits, 2);
        assert_relative_eq!(summary.top_avg_gain, 20.0);
        assert_relative_eq!(summary.avg_duration_minutes, 60.0);
    }

    #[test]
    fn summary_empty_is_none() {
        assert_eq!(Summary::compute(&[]), None);
    }

    #[test]
    fn display_projection_formats() {
        let hits = vec![hit_with(1, 40.0, 95)];
        let offset = FixedOffset::east_opt(7 * 3600).unwrap();
        let rows = display_rows(&hits, offset);

        assert_eq!(rows[0].pair, "PAIR1USDT");
        assert_relative_eq!(rows[0].entry, 100.0);
        assert_relative_eq!(rows[0].target4, 140.0);
        assert_eq!(rows[0].gain, "40.00%");
        assert_eq!(rows[0].duration, "1h 35m");
        // 10:00 UTC is 17:00 at +07:00.
        assert_eq!(rows[0].signal_time, "05-01 17:00");
        assert_eq!(rows[0].hit_time, "05-01 18:35");
    }

    #[test]
    fn display_unknown_pair() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let hits = vec![CorrelatedHit::derive(None, 2.0, 3.0, 1, 2, ts, ts)];
        let rows = display_rows(&hits, FixedOffset::east_opt(0).unwrap());
        assert_eq!(rows[0].pair, "Unknown");
    }

    #[test]
    fn export_projection_keeps_raw_numbers() {
        let hits = vec![hit_with(1, 40.0, 95)];
        let offset = FixedOffset::east_opt(0).unwrap();
        let rows = export_rows(&hits, offset);

        assert_relative_eq!(rows[0].gain_percent, 40.0);
        assert_relative_eq!(rows[0].duration_minutes, 95.0);
        assert_eq!(rows[0].signal_time, "2024-05-01 10:00:00");
        assert_eq!(rows[0].hit_time, "2024-05-01 11:35:00");
    }

    proptest! {
        #[test]
        fn gain_descending_is_non_increasing(gains in proptest::collection::vec(-9_000i32..100_000, 0..40)) {
            let mut hits: Vec<CorrelatedHit> = gains
                .iter()
                .enumerate()
                .map(|(i, &g)| hit_with(i as i64, f64::from(g) / 100.0, 60))
                .collect();
            sort_hits(&mut hits, SortKey::Gain, SortDirection::Descending);
            for pair in hits.windows(2) {
                prop_assert!(pair[0].gain_percent >= pair[1].gain_percent);
            }
        }

        #[test]
        fn top_panel_len_is_min_five(count in 0usize..12) {
            let hits: Vec<CorrelatedHit> =
                (0..count).map(|i| hit_with(i as i64, i as f64, 60)).collect();
            prop_assert_eq!(top_gainers(&hits).len(), count.min(RANKED_LEN));
        }
    }
}
