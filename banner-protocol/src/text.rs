//! Bounded text helpers
//!
//! Every text field in the firmware lives in a fixed-capacity buffer. These
//! helpers keep the longest prefix that fits, cut on a UTF-8 character
//! boundary, and never overrun.

use heapless::String;

/// Longest prefix of `s` that is at most `max_len` bytes long
pub fn truncate_to(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Append as much of `src` as fits into `dst`
///
/// Returns `true` if `src` was appended whole.
pub fn push_truncated<const N: usize>(dst: &mut String<N>, src: &str) -> bool {
    let prefix = truncate_to(src, N - dst.len());
    // Cannot fail: the prefix was sized to the remaining capacity
    let _ = dst.push_str(prefix);
    prefix.len() == src.len()
}

/// Copy `src` into a new bounded string, truncating if needed
pub fn bounded<const N: usize>(src: &str) -> String<N> {
    let mut out = String::new();
    push_truncated(&mut out, src);
    out
}
