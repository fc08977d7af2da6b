//! Uniform Resource Names.
//!
//! Only the structural shape `urn:<namespace-id>:<namespace-specific-string>`
//! is checked. Neither part is percent-decoded or restricted to a character
//! set, so `urn:btih:...` and `urn:sha1:...` parse the same way.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Scheme every URN must start with (compared case-insensitively)
pub const URN_SCHEME: &str = "urn";

/// A parsed `urn:<nid>:<nss>` identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Urn {
    namespace_id: String,
    namespace_specific_string: String,
}

impl Urn {
    /// Parse a URN from its string form
    pub fn parse(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 3 {
            return Err(Error::invalid_urn(s, "expected exactly 3 colon-separated parts"));
        }

        if !parts[0].eq_ignore_ascii_case(URN_SCHEME) {
            return Err(Error::invalid_urn(s, "invalid scheme"));
        }

        Ok(Self {
            namespace_id: parts[1].to_string(),
            namespace_specific_string: parts[2].to_string(),
        })
    }

    /// The namespace identifier, e.g. `btih`
    pub fn namespace_id(&self) -> &str {
        &self.namespace_id
    }

    /// The namespace specific string, e.g. the hex info-hash
    pub fn namespace_specific_string(&self) -> &str {
        &self.namespace_specific_string
    }
}

impl FromStr for Urn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Urn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            URN_SCHEME, self.namespace_id, self.namespace_specific_string
        )
    }
}

/// Parse a URN from its string form
pub fn parse_urn(s: &str) -> Result<Urn> {
    Urn::parse(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_urn() {
        let urn = parse_urn("urn:btih:c12fe1c06bba254a9dc9f519b335aa7c1367a88a").unwrap();
        assert_eq!(urn.namespace_id(), "btih");
        assert_eq!(
            urn.namespace_specific_string(),
            "c12fe1c06bba254a9dc9f519b335aa7c1367a88a"
        );
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        for input in ["URN:a:b", "Urn:a:b", "uRn:a:b"] {
            let urn: Urn = input.parse().unwrap();
            assert_eq!(urn.namespace_id(), "a");
            assert_eq!(urn.namespace_specific_string(), "b");
        }
    }

    #[test]
    fn test_empty_parts_are_accepted() {
        let urn = Urn::parse("urn::").unwrap();
        assert_eq!(urn.namespace_id(), "");
        assert_eq!(urn.namespace_specific_string(), "");
    }

    #[test]
    fn test_wrong_part_count() {
        assert!(Urn::parse("").is_err());
        assert!(Urn::parse("urn").is_err());
        assert!(Urn::parse("urn:btih").is_err());
        assert!(Urn::parse("urn:btih:abc:def").is_err());
    }

    #[test]
    fn test_wrong_scheme() {
        let err = Urn::parse("uri:btih:abc").unwrap_err();
        assert!(matches!(err, Error::InvalidUrn { reason: "invalid scheme", .. }));
    }

    #[test]
    fn test_display() {
        let urn = Urn::parse("URN:sha1:abc").unwrap();
        assert_eq!(urn.to_string(), "urn:sha1:abc");
    }
}
