#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use hitscan::domain::error::HitscanError;
use hitscan::domain::message::ChannelMessage;
use hitscan::domain::window::DateWindow;
use hitscan::ports::message_source::{MessageIter, MessageSource};

pub const SIGNAL_BODY: &str =
    "BTCUSDT\nEntry: 100\nTarget 1: 110\nTarget 2: 120\nTarget 3: 130\nTarget 4: 140";
pub const HIT_BODY: &str = "Target 4 ✅ hit";

/// In-memory message source. History is held newest first, the way the
/// port contract requires sources to replay it, and the mock records how
/// much of it a scan actually consumed.
pub struct MockMessageSource {
    history: Vec<ChannelMessage>,
    by_id: HashMap<i64, ChannelMessage>,
    fail_connect: bool,
    fail_lookup: bool,
    pub connects: usize,
    pub disconnects: usize,
    served: Cell<usize>,
    lookups: RefCell<Vec<i64>>,
}

impl MockMessageSource {
    /// `history` must already be newest first.
    pub fn new(history: Vec<ChannelMessage>) -> Self {
        let by_id = history
            .iter()
            .map(|message| (message.id, message.clone()))
            .collect();
        Self {
            history,
            by_id,
            fail_connect: false,
            fail_lookup: false,
            connects: 0,
            disconnects: 0,
            served: Cell::new(0),
            lookups: RefCell::new(Vec::new()),
        }
    }

    pub fn failing_connect(mut self) -> Self {
        self.fail_connect = true;
        self
    }

    pub fn failing_lookup(mut self) -> Self {
        self.fail_lookup = true;
        self
    }

    /// Messages pulled off the newest-first iterator so far.
    pub fn served_count(&self) -> usize {
        self.served.get()
    }

    /// Every id passed to `fetch_by_id`, in call order.
    pub fn lookup_log(&self) -> Vec<i64> {
        self.lookups.borrow().clone()
    }
}

impl MessageSource for MockMessageSource {
    fn connect(&mut self) -> Result<(), HitscanError> {
        if self.fail_connect {
            return Err(HitscanError::Source {
                reason: "mock connect refused".to_string(),
            });
        }
        self.connects += 1;
        Ok(())
    }

    fn disconnect(&mut self) -> Result<(), HitscanError> {
        self.disconnects += 1;
        Ok(())
    }

    fn newest_first(&self) -> MessageIter<'_> {
        Box::new(self.history.iter().map(|message| {
            self.served.set(self.served.get() + 1);
            Ok(message.clone())
        }))
    }

    fn fetch_by_id(&self, id: i64) -> Result<Option<ChannelMessage>, HitscanError> {
        self.lookups.borrow_mut().push(id);
        if self.fail_lookup {
            return Err(HitscanError::Source {
                reason: "mock lookup refused".to_string(),
            });
        }
        Ok(self.by_id.get(&id).cloned())
    }
}

pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

pub fn message(id: i64, timestamp: DateTime<Utc>, text: &str) -> ChannelMessage {
    ChannelMessage {
        id,
        timestamp,
        text: Some(text.to_string()),
        reply_to: None,
    }
}

pub fn reply(id: i64, timestamp: DateTime<Utc>, reply_to: i64, text: &str) -> ChannelMessage {
    ChannelMessage {
        id,
        timestamp,
        text: Some(text.to_string()),
        reply_to: Some(reply_to),
    }
}

/// UTC window over days of May 2024, both bounds inclusive.
pub fn may_window(start_day: u32, end_day: u32) -> DateWindow {
    DateWindow::new(
        NaiveDate::from_ymd_opt(2024, 5, start_day).unwrap(),
        NaiveDate::from_ymd_opt(2024, 5, end_day).unwrap(),
        FixedOffset::east_opt(0).unwrap(),
    )
}
