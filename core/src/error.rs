use std::io;

use thiserror::Error;

/// Whole-payload failures. Any of these aborts the invocation before a
/// single process is started.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The input does not start with the expected `<scheme>://` prefix.
    #[error("expected a {expected}:// uri, got {uri:?}")]
    SchemeMismatch { expected: String, uri: String },

    /// Base64 decoding failed even after sanitization. Both the raw and the
    /// cleaned payload are kept for diagnosis.
    #[error("base64 decode failed (raw: {raw:?}, cleaned: {cleaned:?})")]
    Decode {
        raw: String,
        cleaned: String,
        #[source]
        source: base64::DecodeError,
    },

    /// The decoded text parses as neither an instruction array nor a single
    /// instruction object.
    #[error("payload is neither an instruction array nor an instruction object: {text:?}")]
    Malformed {
        text: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Per-instruction failures. These are logged and the instruction skipped;
/// the rest of the batch still runs.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("no builder registered for target {0:?}")]
    UnknownTarget(String),

    #[error("no usable executable path configured for target {0:?}")]
    MissingExecutablePath(String),

    #[error("process start failed: {0}")]
    Spawn(#[from] io::Error),
}
