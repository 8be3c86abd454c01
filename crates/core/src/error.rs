//! Error taxonomy for building and uploading command streams.
//!
//! - `BuildError`: catalog/schema mismatch. Always a bug in data or code.
//! - `QueryError`: transient transport trouble during a query round trip.
//! - `UploadError`: what an upload surfaces to its caller.
//!
//! Legitimate no-ops (empty station, `---` values, fields at default) are never errors.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("unknown device '{device}'")]
    UnknownDevice { device: String },

    #[error("unknown action '{action}' on device '{device}'")]
    UnknownAction { device: String, action: String },

    #[error("no key for character {ch:?} on device '{device}'")]
    UnmappedCharacter { device: String, ch: char },

    #[error("{field} value {value} out of range (expected < {limit})")]
    OutOfRange {
        field: &'static str,
        value: usize,
        limit: usize,
    },

    #[error("{field} value '{value}' is not valid")]
    InvalidValue { field: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("transport refused query '{function}'")]
    SendRefused { function: String },

    #[error("no response to query '{function}' after {waited:?}")]
    Timeout { function: String, waited: Duration },

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("encode query stream: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("preflight failed: {0}")]
    Preflight(#[source] QueryError),

    #[error("configuration integrity: {0}")]
    Integrity(#[from] BuildError),

    #[error("transport refused the upload ({commands} commands)")]
    SendRefused { commands: usize },

    #[error("encode upload stream: {0}")]
    Encode(#[from] serde_json::Error),
}
