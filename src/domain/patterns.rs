//! Pattern classifiers for the channel's informal message convention.
//!
//! Signal posts and hit notifications are free text following a loose house
//! style, not a grammar. The classifiers are deliberately forgiving: they
//! accept either colon glyph (`:` or `：`), match labels case-insensitively,
//! and let the hit marker appear anywhere after the target mention, across
//! line breaks. False positives from coincidental nearby text are accepted
//! behavior. Both classifiers are pure functions over the message body.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Ticker token, e.g. `BTCUSDT`. Case sensitive by convention.
static PAIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z0-9]+USDT)\b").unwrap());

/// `Entry: <price>` label.
static ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bEntry[:：]\s*([0-9]*\.?[0-9]+)").unwrap());

/// `Target <n>: <price>` label, any tier index.
static TARGET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bTarget\s*(\d+)\s*[:：]\s*([0-9]*\.?[0-9]+)").unwrap()
});

/// `Target 4` mention with an optional price, followed somewhere later by a
/// check mark or the token `hit`. `(?s)` lets the marker sit on another
/// line; the span is non-greedy.
static T4_HIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\bTarget\s*4\s*[:：]?\s*([0-9]*\.?[0-9]+)?\b.*?(✅|hit)").unwrap()
});

/// Structured projection of a signal (root) post.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalPost {
    /// Traded pair when one was mentioned. Absence is the caller's concern,
    /// not a parse failure.
    pub pair: Option<String>,
    pub entry_price: f64,
    pub target4_price: f64,
}

/// Structured projection of a tier-4 hit notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitNotice {
    /// Price quoted next to the `Target 4` mention, when present. Overrides
    /// the root post's tier-4 price in the correlated record.
    pub override_price: Option<f64>,
}

/// Parses a signal post. Requires both an entry price and a tier-4 target;
/// anything else yields `None`.
pub fn parse_signal(text: &str) -> Option<SignalPost> {
    let entry_price = ENTRY_RE
        .captures(text)
        .and_then(|caps| caps[1].parse::<f64>().ok())?;

    let mut targets: HashMap<u32, f64> = HashMap::new();
    for caps in TARGET_RE.captures_iter(text) {
        // A repeated tier index keeps the last occurrence.
        if let (Ok(tier), Ok(price)) = (caps[1].parse::<u32>(), caps[2].parse::<f64>()) {
            targets.insert(tier, price);
        }
    }
    let target4_price = *targets.get(&4)?;

    let pair = PAIR_RE.captures(text).map(|caps| caps[1].to_string());

    Some(SignalPost {
        pair,
        entry_price,
        target4_price,
    })
}

/// Detects a tier-4 hit notification. `None` when the text does not carry
/// both a `Target 4` mention and a trailing hit marker.
pub fn detect_hit(text: &str) -> Option<HitNotice> {
    let caps = T4_HIT_RE.captures(text)?;
    let override_price = caps
        .get(1)
        .and_then(|price| price.as_str().parse::<f64>().ok());
    Some(HitNotice { override_price })
}
