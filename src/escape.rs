//! Scheme-specific escaping.
//!
//! The `WIFI:` scheme reserves a handful of delimiter characters and escapes them with a
//! backslash. The `mailto:` and `SMSTO:` schemes instead percent-encode whole components,
//! using the same unreserved set as ECMAScript's `encodeURIComponent` so that payloads are
//! byte-compatible with what browser-based generators produce.
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Characters the `WIFI:` scheme treats as delimiters.
const WIFI_RESERVED: [char; 4] = ['\\', ';', ':', ','];

/// Strips the whitespace that browser form input treats as blank from both ends.
///
/// This is the ECMAScript white space and line terminator set: Unicode `White_Space`
/// plus U+FEFF, without U+0085.
///
/// # Example
///
/// ```rust
/// use quickqr::escape::trim_field;
///
/// assert_eq!(trim_field("\u{FEFF} hi \n"), "hi");
/// assert_eq!(trim_field("\u{85}hi"), "\u{85}hi");
/// ```
pub fn trim_field(raw: &str) -> &str {
    raw.trim_matches(is_field_whitespace)
}

fn is_field_whitespace(c: char) -> bool {
    c == '\u{FEFF}' || (c != '\u{85}' && c.is_whitespace())
}

/// Trims `raw` and backslash-escapes `\`, `;`, `:` and `,`.
///
/// # Example
///
/// ```rust
/// use quickqr::escape::escape_wifi;
///
/// assert_eq!(escape_wifi("  Home Net; 5G "), "Home Net\\; 5G");
/// ```
pub fn escape_wifi(raw: &str) -> String {
    let trimmed = trim_field(raw);
    let mut out = String::with_capacity(trimmed.len());
    for c in trimmed.chars() {
        if WIFI_RESERVED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Percent-encodes a whole URI component.
///
/// Spaces become `%20` (never `+`) and non-ASCII text is encoded as UTF-8 bytes with
/// uppercase hex digits.
///
/// # Example
///
/// ```rust
/// use quickqr::escape::percent_encode;
///
/// assert_eq!(percent_encode("Hi there!"), "Hi%20there!");
/// assert_eq!(percent_encode("a&b=c"), "a%26b%3Dc");
/// ```
pub fn percent_encode(raw: &str) -> String {
    utf8_percent_encode(raw, URI_COMPONENT).to_string()
}
