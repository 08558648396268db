//! Channel message snapshot.

use chrono::{DateTime, Utc};

/// One message as delivered by a message source. Read-only: the core never
/// creates or mutates messages, it only classifies them.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelMessage {
    /// Message id, unique within its channel.
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub text: Option<String>,
    /// Id of the message this one replies to, when it is a reply.
    pub reply_to: Option<i64>,
}

impl ChannelMessage {
    /// Message text, with a missing body read as empty.
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// Reduces a channel id to its canonical positive form.
///
/// Client APIs mark channel ids by prefixing `-100` to the raw id
/// (`-1001234567890` for raw `1234567890`); history exports store the raw
/// form. Both must address the same channel.
pub fn canonical_channel_id(id: i64) -> i64 {
    if id <= -1_000_000_000_000 {
        -id - 1_000_000_000_000
    } else {
        id.abs()
    }
}
