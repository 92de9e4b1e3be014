pub mod builders;
pub mod decode;
pub mod dispatch;
pub mod error;
pub mod instruction;
pub mod sanitize;

// Re-exports
pub use decode::decode_instructions;
pub use dispatch::{DispatchSummary, Dispatcher, OsLauncher, ProcessLauncher};
pub use error::{LaunchError, PayloadError};
pub use instruction::PlaybackInstruction;
pub use sanitize::sanitize_base64;

/// Strip the `<scheme>://` prefix from a raw URI, returning the payload.
pub fn split_scheme<'a>(raw: &'a str, scheme: &str) -> Result<&'a str, PayloadError> {
    let prefix = format!("{scheme}://");
    raw.strip_prefix(&prefix)
        .ok_or_else(|| PayloadError::SchemeMismatch {
            expected: scheme.to_owned(),
            uri: raw.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_scheme_returns_the_payload() {
        assert_eq!(
            split_scheme("jelly-player://abc", "jelly-player").unwrap(),
            "abc"
        );
        assert_eq!(split_scheme("jelly-player://", "jelly-player").unwrap(), "");
    }

    #[test]
    fn split_scheme_rejects_other_prefixes() {
        for raw in ["http://abc", "jelly-player:abc", "jelly-playerx://abc", "abc"] {
            match split_scheme(raw, "jelly-player") {
                Err(PayloadError::SchemeMismatch { expected, uri }) => {
                    assert_eq!(expected, "jelly-player");
                    assert_eq!(uri, raw);
                }
                other => panic!("expected a scheme mismatch for {raw:?}, got {other:?}"),
            }
        }
    }
}
