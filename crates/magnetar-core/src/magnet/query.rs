//! Query string decomposition and the extra unescape pass.
//!
//! [`group_query`] performs the standard `application/x-www-form-urlencoded`
//! decoding once. [`query_unescape`] is the second decoding applied to `as`
//! and `tr` values, so a tracker written as `http%253A` ends up as `http:`.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use url::Url;

/// Query values grouped by lowercased key, each list in input order
pub(crate) type QueryParams = BTreeMap<String, Vec<String>>;

/// Group every query pair of `url` by lowercased key.
///
/// Malformed escapes are kept as literal text rather than dropping the pair.
pub(crate) fn group_query(url: &Url) -> QueryParams {
    let mut params = QueryParams::new();
    for (key, value) in url.query_pairs() {
        params
            .entry(key.to_lowercase())
            .or_default()
            .push(value.into_owned());
    }
    params
}

/// Decode `%XX` escapes and `+` the way a query component is decoded.
///
/// Unlike the lenient form decoding done by [`group_query`], a `%` that is
/// not followed by two hex digits is an error.
pub(crate) fn query_unescape(s: &str) -> Result<String> {
    let bytes = s.as_bytes();
    for (offset, _) in s.match_indices('%') {
        let escape = bytes.get(offset + 1..offset + 3);
        let valid = escape.is_some_and(|digits| digits.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            let end = (offset + 3).min(bytes.len());
            return Err(Error::invalid_escape(
                offset,
                String::from_utf8_lossy(&bytes[offset..end]),
            ));
        }
    }

    let spaced = s.replace('+', " ");
    let decoded = urlencoding::decode(&spaced)?;
    Ok(decoded.into_owned())
}
