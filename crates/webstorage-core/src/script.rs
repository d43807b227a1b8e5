//! Injection-safe script literal encoding.
//!
//! Storage keys and values come from test authors and application data, so
//! they may legitimately contain quotes, backslashes, or whole script
//! fragments. Interpolating them raw between quotes would corrupt the
//! generated script for benign inputs and open an injection hole for
//! hostile ones. `script_literal` is total over all strings: the rendered
//! literal evaluates back to exactly the input on the remote engine.

use std::fmt::Write as _;

/// Encode a string as a double-quoted script literal.
///
/// The output is valid both as a JavaScript string literal and as a JSON
/// string, so a well-behaved remote engine round-trips it byte for byte.
/// U+2028 and U+2029 are escaped because JavaScript source (pre-ES2019)
/// rejects them inside string literals even though JSON allows them.
#[must_use]
pub fn script_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if (c as u32) < 0x20 => {
                // Remaining C0 controls; infallible for String targets.
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(input: &str) -> String {
        // The literal doubles as a JSON string, so a strict JSON parse
        // models what the remote engine evaluates it to.
        serde_json::from_str(&script_literal(input)).unwrap()
    }

    #[test]
    fn test_plain_strings_pass_through() {
        assert_eq!(script_literal("token"), "\"token\"");
        assert_eq!(script_literal(""), "\"\"");
    }

    #[test]
    fn test_quotes_and_backslashes_escaped() {
        assert_eq!(script_literal("ab\"c\\d"), "\"ab\\\"c\\\\d\"");
        assert_eq!(roundtrip("ab\"c\\d"), "ab\"c\\d");
    }

    #[test]
    fn test_roundtrip_is_identity() {
        let cases = [
            "",
            "plain",
            "with \"delimiters\" inside",
            "back\\slash",
            "line\nbreaks\r\nand\ttabs",
            "nul\u{0}and\u{1f}controls",
            "unicode: \u{1F600} \u{00e9} \u{4e16}\u{754c}",
            "\u{2028}\u{2029}",
            "\"); maliciousCall(); (\"",
        ];
        for case in cases {
            assert_eq!(roundtrip(case), case, "case {case:?}");
        }
    }

    #[test]
    fn test_injection_payload_stays_one_literal() {
        let rendered = script_literal("\"); maliciousCall(); (\"");
        // Every interior quote must be escaped, leaving only the two
        // delimiters as bare quotes.
        let bare_quotes = rendered
            .as_bytes()
            .iter()
            .enumerate()
            .filter(|&(i, &b)| {
                b == b'"' && (i == 0 || rendered.as_bytes()[i - 1] != b'\\')
            })
            .count();
        assert_eq!(bare_quotes, 2);
    }
}
