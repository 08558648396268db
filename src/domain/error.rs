//! Domain error types.
//!
//! Per-message classification failures and zero-entry signals are not
//! errors: they are absorbed by the scan loop and never surfaced. The
//! variants here are the fatal outcomes that abort a whole run.

/// Top-level error type for hitscan.
#[derive(Debug, thiserror::Error)]
pub enum HitscanError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("message source error: {reason}")]
    Source { reason: String },

    #[error("export error: {reason}")]
    Export { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&HitscanError> for std::process::ExitCode {
    fn from(err: &HitscanError) -> Self {
        let code: u8 = match err {
            HitscanError::Io(_) => 1,
            HitscanError::ConfigParse { .. }
            | HitscanError::ConfigMissing { .. }
            | HitscanError::ConfigInvalid { .. } => 2,
            HitscanError::Source { .. } => 3,
            HitscanError::Export { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
