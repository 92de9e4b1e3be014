/// Normalize a raw payload into padded standard-alphabet base64.
///
/// Producers emit URL-safe base64 (`-`/`_`), but the string travels through
/// browsers and shell quoting and may pick up quotes, whitespace or stray
/// separators on the way. Per character: alphanumerics are kept, `-` and `+`
/// normalize to `+`, `_` normalizes to `/`, everything else is dropped. A
/// bare `/` is dropped too: producers encode real slashes as `_`, so a
/// literal `/` is an accidental trailing separator, not data.
///
/// Known limitation: a producer emitting *standard* (non-URL-safe) base64
/// would get its `/` characters silently removed and the payload corrupted.
/// The heuristic cannot tell those apart from injected noise.
pub fn sanitize_base64(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len() + 3);
    for ch in raw.chars() {
        match ch {
            'A'..='Z' | 'a'..='z' | '0'..='9' => cleaned.push(ch),
            '-' | '+' => cleaned.push('+'),
            '_' => cleaned.push('/'),
            _ => {}
        }
    }
    // Repad; any original `=` was dropped above along with the other noise.
    while cleaned.len() % 4 != 0 {
        cleaned.push('=');
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_alphabet_is_untouched_up_to_padding() {
        assert_eq!(sanitize_base64("TWFu"), "TWFu");
        assert_eq!(sanitize_base64("abcXYZ019+"), "abcXYZ019+==");
    }

    #[test]
    fn url_safe_characters_normalize_to_the_standard_alphabet() {
        assert_eq!(sanitize_base64("a-b_"), "a+b/");
    }

    #[test]
    fn noise_and_bare_slashes_are_dropped() {
        assert_eq!(sanitize_base64("\"TW Fu\"\n"), "TWFu");
        assert_eq!(sanitize_base64("TWFu/"), "TWFu");
        assert_eq!(sanitize_base64("TW\u{0}Fu"), "TWFu");
    }

    #[test]
    fn existing_padding_is_rebuilt() {
        assert_eq!(sanitize_base64("QQ=="), "QQ==");
        assert_eq!(sanitize_base64("QQ"), "QQ==");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(sanitize_base64(""), "");
    }
}
