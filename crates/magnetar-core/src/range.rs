//! Numeric ranges as used by the `so` (select-only) parameter.
//!
//! Accepted forms are a single integer (`7`) or a hyphenated pair (`0-3`).
//! Both bounds are always inclusive. An inverted pair such as `5-2` is kept
//! as written.

use crate::error::{Error, Result};
use std::str::FromStr;

/// A closed interval of integers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumRange {
    /// First value of the range
    pub start: i64,
    /// Last value of the range
    pub end: i64,
    /// Whether `start` itself belongs to the range
    pub include_start: bool,
    /// Whether `end` itself belongs to the range
    pub include_end: bool,
}

impl NumRange {
    /// Creates an inclusive range `start..=end`
    pub fn new(start: i64, end: i64) -> Self {
        Self {
            start,
            end,
            include_start: true,
            include_end: true,
        }
    }

    /// Creates a range holding exactly one number
    pub fn single(num: i64) -> Self {
        Self::new(num, num)
    }

    /// Parse `N` or `A-B`
    pub fn parse(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('-').collect();
        match parts.as_slice() {
            [num] => Ok(Self::single(parse_int(num)?)),
            [start, end] => Ok(Self::new(parse_int(start)?, parse_int(end)?)),
            _ => Err(Error::invalid_num_range(s)),
        }
    }

    /// Returns true if `start` and `end` denote the same single number
    pub fn is_single(&self) -> bool {
        self.start == self.end && self.include_start && self.include_end
    }

    /// Returns true if `num` lies within the range
    pub fn contains(&self, num: i64) -> bool {
        let above_start = if self.include_start {
            num >= self.start
        } else {
            num > self.start
        };
        let below_end = if self.include_end {
            num <= self.end
        } else {
            num < self.end
        };
        above_start && below_end
    }
}

impl FromStr for NumRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Parse `N` or `A-B` into a [`NumRange`]
pub fn parse_num_range(s: &str) -> Result<NumRange> {
    NumRange::parse(s)
}

pub(crate) fn parse_int(s: &str) -> Result<i64> {
    s.parse::<i64>().map_err(|e| Error::invalid_integer(s, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_number() {
        for n in [0, 1, 42, 9_999_999] {
            let range = parse_num_range(&n.to_string()).unwrap();
            assert_eq!(range, NumRange::single(n));
            assert_eq!(range.start, n);
            assert_eq!(range.end, n);
            assert!(range.include_start && range.include_end);
            assert!(range.is_single());
        }
    }

    #[test]
    fn test_pair() {
        let range = NumRange::parse("3-17").unwrap();
        assert_eq!(range.start, 3);
        assert_eq!(range.end, 17);
        assert!(range.include_start && range.include_end);
        assert!(!range.is_single());
    }

    #[test]
    fn test_inverted_pair_is_kept() {
        let range: NumRange = "9-2".parse().unwrap();
        assert_eq!(range.start, 9);
        assert_eq!(range.end, 2);
        assert!(!range.contains(5));
    }

    #[test]
    fn test_non_numeric() {
        assert!(matches!(
            NumRange::parse("abc").unwrap_err(),
            Error::InvalidInteger { .. }
        ));
        assert!(matches!(
            NumRange::parse("1-x").unwrap_err(),
            Error::InvalidInteger { .. }
        ));
        assert!(matches!(
            NumRange::parse("").unwrap_err(),
            Error::InvalidInteger { .. }
        ));
        assert!(matches!(
            NumRange::parse("4-").unwrap_err(),
            Error::InvalidInteger { .. }
        ));
    }

    #[test]
    fn test_too_many_segments() {
        let err = NumRange::parse("1-2-3").unwrap_err();
        assert!(matches!(err, Error::InvalidNumRange { .. }));
        assert!(err.to_string().contains("malformed num range string"));
        // a leading minus is a separator, not a sign
        assert!(NumRange::parse("-1-2").is_err());
    }

    #[test]
    fn test_contains() {
        let range = NumRange::new(2, 4);
        assert!(!range.contains(1));
        assert!(range.contains(2));
        assert!(range.contains(4));
        assert!(!range.contains(5));

        let open = NumRange {
            include_start: false,
            include_end: false,
            ..range
        };
        assert!(!open.contains(2));
        assert!(open.contains(3));
        assert!(!open.contains(4));
    }
}
