//! Short token derivation.
//!
//! A token is the MurmurHash3 (x86, 32-bit, seed 0) of the long URL's UTF-8 bytes,
//! rendered as the lowercase hex of the hash's little-endian bytes. The token
//! depends on the URL text only, so equal URLs always share a token.

use axum::http::HeaderValue;
use std::io;

/// Seed used for every token.
const HASH_SEED: u32 = 0;

/// Derives the short token for `long_url`.
///
/// # Errors
///
/// Propagates the hasher's read error. Hashing an in-memory string does not fail
/// in practice.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(short_token("hello").unwrap(), "47fa8b24");
/// ```
pub fn short_token(long_url: &str) -> io::Result<String> {
    let mut source = long_url.as_bytes();
    let hash = murmur3::murmur3_32(&mut source, HASH_SEED)?;

    Ok(hex::encode(hash.to_le_bytes()))
}

/// Returns true if `value` is empty or contains only whitespace.
///
/// No-break spaces (U+00A0, U+2007, U+202F) and NEL count as text; the ASCII
/// information separators U+001C..U+001F count as whitespace.
pub fn is_blank(value: &str) -> bool {
    value.chars().all(is_blank_char)
}

fn is_blank_char(c: char) -> bool {
    match c {
        '\u{1C}'..='\u{1F}' => true,
        '\u{85}' | '\u{A0}' | '\u{2007}' | '\u{202F}' => false,
        c => c.is_whitespace(),
    }
}

/// Returns true if `long_url` can be sent verbatim in a `Location` header.
pub fn is_redirect_target(long_url: &str) -> bool {
    HeaderValue::from_str(long_url).is_ok()
}
