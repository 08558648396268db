//! Core domain types and logic.

pub mod message;
pub mod patterns;
pub mod window;
pub mod metrics;
pub mod hit;
pub mod correlate;
pub mod report;
pub mod settings;
pub mod error;
