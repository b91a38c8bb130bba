//! Line and token helpers shared by the header and table parsers.

/// The characters that may introduce an XDI header line
pub const COMMENT_MARKERS: [char; 2] = ['#', ';'];

/// Remove a leading `#` or `;` and the whitespace around the remaining text.
///
/// Returns `None` if `line` does not start with a comment marker.
#[inline]
pub fn strip_comment(line: &str) -> Option<&str> {
    line.strip_prefix(COMMENT_MARKERS).map(str::trim)
}

/// Like [`strip_comment`], but a line without a marker is returned trimmed
/// instead of rejected.
#[inline]
pub fn header_text(line: &str) -> &str {
    strip_comment(line).unwrap_or_else(|| line.trim())
}

/// Split a `key: value` directive at its first `:`, trimming both sides.
pub fn split_directive(text: &str) -> Option<(&str, &str)> {
    text.split_once(':')
        .map(|(key, value)| (key.trim(), value.trim()))
}

/// Lower-case a field name and fold `-` into `_` so that reserved and
/// defined fields match however the file spells them.
pub fn normalize_key(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Parse the first whitespace-delimited token of `value` as a float, ignoring
/// any trailing unit text such as `"7.00 GeV"`.
pub fn leading_float(value: &str) -> Option<f64> {
    value.split_ascii_whitespace().next()?.parse().ok()
}

/// Drop a UTF-8 byte order mark if the text starts with one
#[inline]
pub fn strip_bom(line: &str) -> &str {
    line.strip_prefix('\u{feff}').unwrap_or(line)
}
