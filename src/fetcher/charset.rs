//! Decoding of fetched HTML bytes.
//!
//! Priority follows browsers: byte-order mark, then the `Content-Type`
//! header, then a `<meta>` declaration near the top of the document, then
//! UTF-8.

use encoding_rs::{Encoding, UTF_8};

/// Bytes scanned for a `<meta charset>` declaration.
const META_SNIFF_LEN: usize = 1024;

/// Encoding named by the `charset` parameter of a `Content-Type` value.
pub fn from_content_type(content_type: &str) -> Option<&'static Encoding> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        Encoding::for_label(value.trim().trim_matches('"').as_bytes())
    })
}

/// Encoding declared by `<meta charset=..>` or
/// `<meta http-equiv="Content-Type" content="..; charset=..">`.
pub fn sniff_meta(body: &[u8]) -> Option<&'static Encoding> {
    let head = &body[..body.len().min(META_SNIFF_LEN)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();

    let mut rest = head.as_str();
    while let Some(pos) = rest.find("charset") {
        rest = &rest[pos + "charset".len()..];
        let Some(value) = rest.trim_start().strip_prefix('=') else {
            continue;
        };
        let value = value.trim_start().trim_start_matches(['"', '\'']);
        let end = value
            .find(|c: char| matches!(c, '"' | '\'' | ';' | '>' | '/') || c.is_whitespace())
            .unwrap_or(value.len());
        if let Some(encoding) = Encoding::for_label(value[..end].as_bytes()) {
            return Some(encoding);
        }
    }
    None
}

/// Decode `body`, replacing malformed sequences with U+FFFD.
pub fn decode(body: &[u8], declared: Option<&'static Encoding>) -> String {
    let encoding = declared.or_else(|| sniff_meta(body)).unwrap_or(UTF_8);
    // `decode` honours a BOM over `encoding`
    let (text, _, _) = encoding.decode(body);
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{SHIFT_JIS, WINDOWS_1252};

    #[test]
    fn test_content_type_charset() {
        assert_eq!(
            from_content_type("text/html; charset=ISO-8859-1"),
            Some(WINDOWS_1252)
        );
        assert_eq!(
            from_content_type("text/html;charset=\"shift_jis\""),
            Some(SHIFT_JIS)
        );
        assert_eq!(from_content_type("text/html"), None);
        assert_eq!(from_content_type("text/html; charset=bogus"), None);
    }

    #[test]
    fn test_sniff_meta_charset() {
        let html = b"<html><head><meta charset=\"windows-1252\"></head>";
        assert_eq!(sniff_meta(html), Some(WINDOWS_1252));

        let html = b"<META HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset=Shift_JIS\">";
        assert_eq!(sniff_meta(html), Some(SHIFT_JIS));

        assert_eq!(sniff_meta(b"<p>charset is a word</p>"), None);
    }

    #[test]
    fn test_decode_uses_meta_when_header_is_silent() {
        let mut body = b"<meta charset=windows-1252><p>caf".to_vec();
        body.push(0xE9);
        body.extend_from_slice(b"</p>");

        assert_eq!(decode(&body, None), "<meta charset=windows-1252><p>café</p>");
    }

    #[test]
    fn test_decode_header_wins_over_meta() {
        let body = "<meta charset=windows-1252><p>café</p>".as_bytes();
        assert_eq!(decode(body, Some(UTF_8)), "<meta charset=windows-1252><p>café</p>");
    }

    #[test]
    fn test_decode_defaults_to_utf8() {
        assert_eq!(decode("<p>naïve</p>".as_bytes(), None), "<p>naïve</p>");
        assert_eq!(decode(b"<p>\xFF</p>", None), "<p>\u{FFFD}</p>");
    }

    #[test]
    fn test_decode_bom_wins() {
        let mut body = vec![0xEF, 0xBB, 0xBF];
        body.extend_from_slice("<p>é</p>".as_bytes());
        assert_eq!(decode(&body, Some(WINDOWS_1252)), "<p>é</p>");
    }
}
