use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use log::debug;

use crate::error::PayloadError;
use crate::instruction::PlaybackInstruction;
use crate::sanitize::sanitize_base64;

/// Decode a raw payload into an ordered, non-empty instruction list.
///
/// The payload is either a JSON array of instruction objects (batch mode) or
/// a single instruction object (legacy mode); the latter is wrapped into a
/// one-element list. Any failure here is fatal for the whole invocation;
/// nothing launches on a payload that does not fully decode.
pub fn decode_instructions(raw: &str) -> Result<Vec<PlaybackInstruction>, PayloadError> {
    let cleaned = sanitize_base64(raw);
    let bytes = STANDARD
        .decode(cleaned.as_bytes())
        .map_err(|source| PayloadError::Decode {
            raw: raw.to_owned(),
            cleaned: cleaned.clone(),
            source,
        })?;

    // Partial corruption occasionally leaves control bytes around the JSON;
    // strip the ones seen in the wild before parsing.
    let text: String = String::from_utf8_lossy(&bytes)
        .chars()
        .filter(|&c| c != '\0' && c != '\x0c')
        .collect();
    let text = text.trim();
    debug!("decoded payload text: {text}");

    // Batch mode first: a non-empty JSON array, order preserved.
    if let Ok(batch) = serde_json::from_str::<Vec<PlaybackInstruction>>(text) {
        if !batch.is_empty() {
            return Ok(batch);
        }
    }

    // Legacy mode: one bare instruction object.
    match serde_json::from_str::<PlaybackInstruction>(text) {
        Ok(single) => Ok(vec![single]),
        Err(source) => Err(PayloadError::Malformed {
            text: text.to_owned(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use base64::Engine as _;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    use super::*;

    #[test]
    fn single_object_becomes_a_one_element_list() {
        let payload = URL_SAFE_NO_PAD.encode(r#"{"mode":"mpv","url":"http://x/a.mkv"}"#);
        let list = decode_instructions(&payload).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].target, "mpv");
        assert_eq!(list[0].url, "http://x/a.mkv");
    }

    #[test]
    fn batch_preserves_input_order() {
        let payload = URL_SAFE_NO_PAD.encode(
            r#"[{"target":"mpv","url":"a"},{"target":"vlc","url":"b"},{"target":"mpv","url":"c"}]"#,
        );
        let list = decode_instructions(&payload).unwrap();
        let urls: Vec<_> = list.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, ["a", "b", "c"]);
    }

    #[test]
    fn sanitized_standard_alphabet_decodes_like_plain_base64() {
        // "hello world!" encodes without `+` or `/`, so sanitization must be
        // a strict no-op on it.
        let encoded = STANDARD.encode(b"hello world!");
        assert_eq!(encoded, "aGVsbG8gd29ybGQh");
        assert_eq!(sanitize_base64(&encoded), encoded);
        assert_eq!(
            STANDARD.decode(sanitize_base64(&encoded)).unwrap(),
            b"hello world!"
        );
    }

    #[test]
    fn sanitized_url_safe_input_matches_standard_decoding() {
        let bytes = [0xfbu8, 0xef, 0xbe, 0x00, 0x7f];
        let url_safe = URL_SAFE_NO_PAD.encode(bytes);
        assert_eq!(STANDARD.decode(sanitize_base64(&url_safe)).unwrap(), bytes);
    }

    #[test]
    fn surrounding_noise_in_the_decoded_text_is_tolerated() {
        let payload = URL_SAFE_NO_PAD.encode("\u{0}  {\"target\":\"mpv\",\"url\":\"u\"} \u{c}");
        let list = decode_instructions(&payload).unwrap();
        assert_eq!(list[0].url, "u");
    }

    #[test]
    fn undecodable_input_reports_raw_and_cleaned_forms() {
        // A single character pads to "A===", which no base64 variant accepts.
        match decode_instructions("A") {
            Err(PayloadError::Decode { raw, cleaned, .. }) => {
                assert_eq!(raw, "A");
                assert_eq!(cleaned, "A===");
            }
            other => panic!("expected a decode error, got {other:?}"),
        }
    }

    #[test]
    fn non_object_non_array_payload_is_malformed() {
        for text in ["not json at all", "42", "\"quoted\"", "[]"] {
            let payload = URL_SAFE_NO_PAD.encode(text);
            match decode_instructions(&payload) {
                Err(PayloadError::Malformed { text: decoded, .. }) => {
                    assert_eq!(decoded, text);
                }
                other => panic!("expected a malformed payload for {text:?}, got {other:?}"),
            }
        }
    }
}
