//! Typed scan settings, parsed and validated from the INI surface before
//! any source activity.

use std::path::PathBuf;

use chrono::{FixedOffset, NaiveDate};

use crate::domain::error::HitscanError;
use crate::domain::report::{SortDirection, SortKey};
use crate::domain::window::{self, DateWindow};
use crate::ports::config_port::ConfigPort;

/// Opaque credential bundle for a session-based message source. The bundled
/// JSON file source never reads it; it is carried through so a live adapter
/// can be swapped in without changing the config surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceCredentials {
    pub api_id: Option<String>,
    pub api_hash: Option<String>,
    pub session: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanSettings {
    pub source_path: PathBuf,
    pub credentials: SourceCredentials,
    pub channel_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub utc_offset: FixedOffset,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
}

impl ScanSettings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, HitscanError> {
        let source_path = PathBuf::from(require_string(config, "source", "path")?);
        let credentials = SourceCredentials {
            api_id: config.get_string("source", "api_id"),
            api_hash: config.get_string("source", "api_hash"),
            session: config.get_string("source", "session"),
        };

        let channel_id = parse_channel_id(config)?;
        let start_date = parse_date(config, "start_date")?;
        let end_date = parse_date(config, "end_date")?;
        if start_date > end_date {
            return Err(HitscanError::ConfigInvalid {
                section: "window".to_string(),
                key: "start_date".to_string(),
                reason: "start_date must not be after end_date".to_string(),
            });
        }
        let utc_offset = parse_offset(config)?;
        let sort_key = parse_sort_key(config)?;
        let sort_direction = parse_sort_direction(config)?;

        Ok(Self {
            source_path,
            credentials,
            channel_id,
            start_date,
            end_date,
            utc_offset,
            sort_key,
            sort_direction,
        })
    }

    /// Applies CLI overrides for the window dates, re-checking the range.
    pub fn override_dates(
        &mut self,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<(), HitscanError> {
        if let Some(raw) = start {
            self.start_date = date_from(raw.trim(), "start_date")?;
        }
        if let Some(raw) = end {
            self.end_date = date_from(raw.trim(), "end_date")?;
        }
        if self.start_date > self.end_date {
            return Err(HitscanError::ConfigInvalid {
                section: "window".to_string(),
                key: "start_date".to_string(),
                reason: "start_date must not be after end_date".to_string(),
            });
        }
        Ok(())
    }

    /// Applies CLI overrides for the sort key and direction.
    pub fn override_sort(
        &mut self,
        sort_by: Option<&str>,
        order: Option<&str>,
    ) -> Result<(), HitscanError> {
        if let Some(raw) = sort_by {
            self.sort_key = sort_key_from(raw.trim())?;
        }
        if let Some(raw) = order {
            self.sort_direction = direction_from(raw.trim())?;
        }
        Ok(())
    }

    pub fn window(&self) -> DateWindow {
        DateWindow::new(self.start_date, self.end_date, self.utc_offset)
    }
}

fn require_string(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<String, HitscanError> {
    match config.get_string(section, key) {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(HitscanError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        }),
    }
}

fn parse_channel_id(config: &dyn ConfigPort) -> Result<i64, HitscanError> {
    let raw = require_string(config, "channel", "id")?;
    raw.trim()
        .parse::<i64>()
        .map_err(|_| HitscanError::ConfigInvalid {
            section: "channel".to_string(),
            key: "id".to_string(),
            reason: "id must be an integer channel identifier".to_string(),
        })
}

fn parse_date(config: &dyn ConfigPort, key: &str) -> Result<NaiveDate, HitscanError> {
    let raw = require_string(config, "window", key)?;
    date_from(raw.trim(), key)
}

fn date_from(raw: &str, key: &str) -> Result<NaiveDate, HitscanError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| HitscanError::ConfigInvalid {
        section: "window".to_string(),
        key: key.to_string(),
        reason: format!("invalid {} format, expected YYYY-MM-DD", key),
    })
}

fn sort_key_from(raw: &str) -> Result<SortKey, HitscanError> {
    SortKey::parse(raw).ok_or_else(|| HitscanError::ConfigInvalid {
        section: "report".to_string(),
        key: "sort_by".to_string(),
        reason: "sort_by must be one of hit_time, gain, duration".to_string(),
    })
}

fn direction_from(raw: &str) -> Result<SortDirection, HitscanError> {
    SortDirection::parse(raw).ok_or_else(|| HitscanError::ConfigInvalid {
        section: "report".to_string(),
        key: "order".to_string(),
        reason: "order must be ascending or descending".to_string(),
    })
}

fn parse_offset(config: &dyn ConfigPort) -> Result<FixedOffset, HitscanError> {
    let raw = config
        .get_string("window", "utc_offset")
        .unwrap_or_else(|| "+00:00".to_string());
    window::parse_utc_offset(&raw).ok_or_else(|| HitscanError::ConfigInvalid {
        section: "window".to_string(),
        key: "utc_offset".to_string(),
        reason: "invalid utc_offset, expected +HH:MM or -HH:MM".to_string(),
    })
}

fn parse_sort_key(config: &dyn ConfigPort) -> Result<SortKey, HitscanError> {
    match config.get_string("report", "sort_by") {
        None => Ok(SortKey::default()),
        Some(raw) => sort_key_from(raw.trim()),
    }
}

fn parse_sort_direction(config: &dyn ConfigPort) -> Result<SortDirection, HitscanError> {
    match config.get_string("report", "order") {
        None => Ok(SortDirection::default()),
        Some(raw) => direction_from(raw.trim()),
    }
}
