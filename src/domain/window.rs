//! Date window filtering for newest-first traversal.
//!
//! A window is an inclusive local-calendar date range interpreted in the
//! channel's configured UTC offset, converted once to absolute bounds. The
//! per-message verdict distinguishes "too new" (skip, keep scanning) from
//! "too old" (stop): in a newest-first stream a too-new message may still be
//! followed by in-window ones, while the first too-old message proves
//! everything after it is also out of range — provided the source delivers
//! non-increasing timestamps, which [`crate::ports::message_source`] states
//! as a precondition.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Last representable microsecond of a day; the inclusive end bound of a
/// window is this instant on the end date.
const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999) {
    Some(t) => t,
    None => panic!("static end-of-day time is valid"),
};

/// Absolute traversal bounds derived from a local date range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateWindow {
    start_utc: DateTime<Utc>,
    end_utc: DateTime<Utc>,
}

/// Per-message verdict against a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCheck {
    /// After the end bound: skip this message, continue the traversal.
    TooNew,
    /// Inside the bounds (both inclusive).
    InWindow,
    /// Before the start bound: stop the traversal entirely.
    TooOld,
}

impl DateWindow {
    /// Builds the window from inclusive local dates and the source offset:
    /// local midnight of `start_date` through local end-of-day of
    /// `end_date`, both converted to UTC.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, offset: FixedOffset) -> Self {
        let start_local = NaiveDateTime::new(start_date, NaiveTime::MIN);
        let end_local = NaiveDateTime::new(end_date, END_OF_DAY);
        Self {
            start_utc: Utc.from_utc_datetime(&(start_local - offset)),
            end_utc: Utc.from_utc_datetime(&(end_local - offset)),
        }
    }

    pub fn check(&self, timestamp: DateTime<Utc>) -> WindowCheck {
        if timestamp > self.end_utc {
            WindowCheck::TooNew
        } else if timestamp < self.start_utc {
            WindowCheck::TooOld
        } else {
            WindowCheck::InWindow
        }
    }

    pub fn start_utc(&self) -> DateTime<Utc> {
        self.start_utc
    }

    pub fn end_utc(&self) -> DateTime<Utc> {
        self.end_utc
    }
}

/// Parses a `±HH:MM` UTC offset (an unsigned value reads as east/positive).
pub fn parse_utc_offset(value: &str) -> Option<FixedOffset> {
    let trimmed = value.trim();
    let (sign, rest) = match trimmed.chars().next()? {
        '+' => (1, &trimmed[1..]),
        '-' => (-1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let (hours, minutes) = rest.split_once(':')?;
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
