//! Byte-level helpers for reading HTML from disk.

use std::borrow::Cow;

/// Decode bytes to a string, handling various encodings.
///
/// 1. UTF-8 (a BOM is handled by encoding_rs)
/// 2. The hint encoding (from `<meta charset>` or an XML declaration)
/// 3. Windows-1252 (superset of ISO-8859-1, common on old pages)
///
/// Returns `Cow::Borrowed` when the input is already valid UTF-8 without a BOM.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Find the declared charset in the first kilobyte of an HTML page.
///
/// Looks for `charset=` as written in `<meta charset="...">`,
/// `<meta http-equiv="Content-Type" content="text/html; charset=...">`
/// and `<?xml ... encoding="..."?>`.
pub fn sniff_charset(bytes: &[u8]) -> Option<&str> {
    let prefix = &bytes[..bytes.len().min(1024)];

    find_value_after(prefix, b"charset=").or_else(|| {
        let xml_start = prefix.windows(5).position(|w| w == b"<?xml")?;
        find_value_after(&prefix[xml_start..], b"encoding=")
    })
}

/// Value following `key`, optionally quoted, up to a quote, `;`, `>` or whitespace.
fn find_value_after<'a>(haystack: &'a [u8], key: &[u8]) -> Option<&'a str> {
    let pos = haystack
        .windows(key.len())
        .position(|w| w.eq_ignore_ascii_case(key))?;
    let mut rest = &haystack[pos + key.len()..];

    if let Some((&quote, tail)) = rest.split_first()
        && (quote == b'"' || quote == b'\'')
    {
        rest = tail;
    }

    let end = rest
        .iter()
        .position(|&b| matches!(b, b'"' | b'\'' | b';' | b'>' | b'/') || b.is_ascii_whitespace())
        .unwrap_or(rest.len());

    let value = std::str::from_utf8(&rest[..end]).ok()?;
    (!value.is_empty()).then_some(value)
}
