//! Message transport port: session lifecycle, newest-first replay, point
//! lookup.

use crate::domain::error::HitscanError;
use crate::domain::message::ChannelMessage;

/// Streaming replay of channel history, newest message first.
pub type MessageIter<'a> = Box<dyn Iterator<Item = Result<ChannelMessage, HitscanError>> + 'a>;

pub trait MessageSource {
    /// Establishes the session and binds the configured channel. Must
    /// succeed before [`MessageSource::newest_first`] or
    /// [`MessageSource::fetch_by_id`] are used.
    fn connect(&mut self) -> Result<(), HitscanError>;

    fn disconnect(&mut self) -> Result<(), HitscanError>;

    /// Replays history newest first. Timestamps must be non-increasing
    /// across the iteration: the windowed scan stops at the first message
    /// older than its window, so a source violating this would silently
    /// lose in-window messages.
    fn newest_first(&self) -> MessageIter<'_>;

    /// Point lookup by message id. `Ok(None)` when the id does not resolve
    /// (deleted message or a reference outside the channel).
    fn fetch_by_id(&self, id: i64) -> Result<Option<ChannelMessage>, HitscanError>;
}
