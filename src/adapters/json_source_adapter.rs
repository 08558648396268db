//! Message source adapter over a channel-history JSON export file.
//!
//! The export carries the channel id and an array of messages in whatever
//! order the exporter wrote them; `connect` loads the file, checks the
//! channel, and indexes the history so replay is newest-first and reply
//! lookups are point reads. Rich-text bodies arrive as arrays mixing bare
//! strings and entity objects and are flattened to plain text.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::error::HitscanError;
use crate::domain::message::{canonical_channel_id, ChannelMessage};
use crate::ports::message_source::{MessageIter, MessageSource};

#[derive(Debug, Deserialize)]
struct RawExport {
    id: i64,
    messages: Vec<RawMessage>,
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    id: i64,
    #[serde(rename = "type")]
    kind: String,
    date_unixtime: RawUnixTime,
    #[serde(default)]
    reply_to_message_id: Option<i64>,
    #[serde(default)]
    text: Option<RawText>,
}

/// Exports write the epoch seconds as a decimal string; accept a bare
/// integer too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawUnixTime {
    Seconds(i64),
    Text(String),
}

impl RawUnixTime {
    fn seconds(&self) -> Option<i64> {
        match self {
            Self::Seconds(s) => Some(*s),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawText {
    Plain(String),
    Rich(Vec<RawTextPiece>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTextPiece {
    Literal(String),
    Entity { text: String },
}

impl RawText {
    fn flatten(self) -> String {
        match self {
            Self::Plain(text) => text,
            Self::Rich(pieces) => pieces
                .into_iter()
                .map(|piece| match piece {
                    RawTextPiece::Literal(text) => text,
                    RawTextPiece::Entity { text } => text,
                })
                .collect(),
        }
    }
}

pub struct JsonExportSource {
    path: PathBuf,
    channel_id: i64,
    connected: bool,
    /// Newest first after `connect`.
    messages: Vec<ChannelMessage>,
    by_id: HashMap<i64, usize>,
}

impl JsonExportSource {
    pub fn new(path: PathBuf, channel_id: i64) -> Self {
        Self {
            path,
            channel_id,
            connected: false,
            messages: Vec::new(),
            by_id: HashMap::new(),
        }
    }

    fn convert(&self, raw: RawMessage) -> Result<ChannelMessage, HitscanError> {
        let seconds = raw
            .date_unixtime
            .seconds()
            .ok_or_else(|| HitscanError::Source {
                reason: format!("message {}: invalid date_unixtime", raw.id),
            })?;
        let timestamp =
            DateTime::<Utc>::from_timestamp(seconds, 0).ok_or_else(|| HitscanError::Source {
                reason: format!("message {}: date_unixtime out of range", raw.id),
            })?;
        let text = raw.text.map(RawText::flatten).filter(|t| !t.is_empty());
        Ok(ChannelMessage {
            id: raw.id,
            timestamp,
            text,
            reply_to: raw.reply_to_message_id,
        })
    }

    fn not_connected() -> HitscanError {
        HitscanError::Source {
            reason: "message source used before connect".to_string(),
        }
    }
}

impl MessageSource for JsonExportSource {
    fn connect(&mut self) -> Result<(), HitscanError> {
        let content = fs::read_to_string(&self.path).map_err(|e| HitscanError::Source {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        let export: RawExport =
            serde_json::from_str(&content).map_err(|e| HitscanError::Source {
                reason: format!("malformed export {}: {}", self.path.display(), e),
            })?;

        if canonical_channel_id(export.id) != canonical_channel_id(self.channel_id) {
            return Err(HitscanError::Source {
                reason: format!(
                    "channel id mismatch: config {}, export {}",
                    self.channel_id, export.id
                ),
            });
        }

        let mut messages = Vec::with_capacity(export.messages.len());
        for raw in export.messages {
            // Service entries (joins, pins, edits of channel metadata) are
            // not channel posts.
            if raw.kind != "message" {
                continue;
            }
            messages.push(self.convert(raw)?);
        }
        messages.sort_by(|a, b| (b.timestamp, b.id).cmp(&(a.timestamp, a.id)));

        self.by_id = messages
            .iter()
            .enumerate()
            .map(|(index, message)| (message.id, index))
            .collect();
        self.messages = messages;
        self.connected = true;
        Ok(())
    }

    fn disconnect(&mut self) -> Result<(), HitscanError> {
        self.connected = false;
        Ok(())
    }

    fn newest_first(&self) -> MessageIter<'_> {
        if !self.connected {
            return Box::new(std::iter::once(Err(Self::not_connected())));
        }
        Box::new(self.messages.iter().cloned().map(Ok))
    }

    fn fetch_by_id(&self, id: i64) -> Result<Option<ChannelMessage>, HitscanError> {
        if !self.connected {
            return Err(Self::not_connected());
        }
        Ok(self
            .by_id
            .get(&id)
            .map(|&index| self.messages[index].clone()))
    }
}
