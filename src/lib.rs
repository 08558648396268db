//! hitscan — trading-signal channel tracker.
//!
//! Correlates "Target 4" hit notifications in a message channel with the
//! signal posts they reply to, and reports gain and time-to-hit per signal.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in
//! [`ports`], concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
