//! The windowed correlation scan: traversal, classification, reply
//! resolution, and metric derivation in a single pass.
//!
//! Per-message problems (no hit marker, no reply reference, unresolvable or
//! unparsable root, zero entry) skip that message and nothing else. Source
//! failures abort the whole run with no partial results.

use crate::domain::error::HitscanError;
use crate::domain::hit::CorrelatedHit;
use crate::domain::patterns;
use crate::domain::window::{DateWindow, WindowCheck};
use crate::ports::message_source::MessageSource;

/// Runs one full scan session: connect, traverse the window newest-first,
/// resolve replies to their signal posts, disconnect. Rows accumulate in
/// traversal order, newest hit first.
pub fn fetch_correlated_hits(
    source: &mut dyn MessageSource,
    window: &DateWindow,
) -> Result<Vec<CorrelatedHit>, HitscanError> {
    source.connect()?;
    let outcome = scan_window(&*source, window);
    source.disconnect()?;
    outcome
}

fn scan_window(
    source: &dyn MessageSource,
    window: &DateWindow,
) -> Result<Vec<CorrelatedHit>, HitscanError> {
    let mut hits = Vec::new();

    for message in source.newest_first() {
        let message = message?;

        // Window gate before any classification: newer than the window is
        // a skip, older ends the traversal (timestamps are non-increasing).
        match window.check(message.timestamp) {
            WindowCheck::TooNew => continue,
            WindowCheck::TooOld => break,
            WindowCheck::InWindow => {}
        }

        let notice = match patterns::detect_hit(message.text_or_empty()) {
            Some(notice) => notice,
            None => continue,
        };
        let root_id = match message.reply_to {
            Some(id) => id,
            None => continue,
        };

        // The root is fetched unconditionally; a signal posted before the
        // window still correlates with an in-window hit.
        let root = match source.fetch_by_id(root_id)? {
            Some(root) => root,
            None => continue,
        };
        let signal = match patterns::parse_signal(root.text_or_empty()) {
            Some(signal) => signal,
            None => continue,
        };
        if signal.entry_price == 0.0 {
            continue;
        }

        let target4_final = notice.override_price.unwrap_or(signal.target4_price);
        hits.push(CorrelatedHit::derive(
            signal.pair,
            signal.entry_price,
            target4_final,
            root.id,
            message.id,
            root.timestamp,
            message.timestamp,
        ));
    }

    Ok(hits)
}
