//! Locating informational lines inside a response buffer.
//!
//! Responses are scanned in place. A field prefix may appear anywhere in the
//! buffer, since the modem echoes the command and prepends blank lines.

use serde::Deserialize;

/// Offset of the first occurrence of `needle` in `haystack`.
pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// The line starting at the first occurrence of `prefix`, without its line
/// ending.
pub fn line<'a>(response: &'a [u8], prefix: &str) -> Option<&'a [u8]> {
    let start = find(response, prefix.as_bytes())?;
    let rest = &response[start..];
    let end = rest
        .iter()
        .position(|&b| b == b'\r' || b == b'\n')
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Deserialize the `prefix` line of `response`.
///
/// `None` when the line is absent or does not deserialize.
pub fn extract<'a, T: Deserialize<'a>>(response: &'a [u8], prefix: &str) -> Option<T> {
    atat::serde_at::from_slice(line(response, prefix)?).ok()
}
