//! Error types for the magnetar-core library.
//!
//! Leaf variants describe a single grammar violation (a bad URN, a bad
//! integer, a bad escape). Parsing a magnet link wraps any leaf failure in
//! [`Error::MalformedMagnetLink`], so callers only need to distinguish the
//! malformed family from [`Error::WrongMagnetLinkType`].

use thiserror::Error;

/// Result type alias for magnetar operations
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error type for all magnetar operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A URN did not have the `urn:<nid>:<nss>` shape
    #[error("malformed urn '{input}': {reason}")]
    InvalidUrn {
        /// The rejected input
        input: String,
        /// What was wrong with it
        reason: &'static str,
    },

    /// A token that should have been a base-10 integer was not
    #[error("invalid integer '{input}': {source}")]
    InvalidInteger {
        /// The rejected token
        input: String,
        /// Underlying integer parse error
        #[source]
        source: std::num::ParseIntError,
    },

    /// A numeric range had more than one `-` separator
    #[error("malformed num range string '{input}'")]
    InvalidNumRange {
        /// The rejected input
        input: String,
    },

    /// The input was not a syntactically valid URI
    #[error("{0}")]
    InvalidUri(#[from] url::ParseError),

    /// A `%` escape was not followed by two hex digits
    #[error("invalid escape '{escape}' at offset {offset}")]
    InvalidEscape {
        /// Byte offset of the `%` in the escaped input
        offset: usize,
        /// The offending escape sequence
        escape: String,
    },

    /// Unescaped bytes were not valid UTF-8
    #[error("unescaped value is not valid utf-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// A hash string contained non-hex characters or had odd length
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// A hash string contained a symbol outside the base32 alphabet
    #[error("invalid base32 data at offset {offset}")]
    InvalidBase32 {
        /// Byte offset of the first bad symbol
        offset: usize,
    },

    /// The magnet link violated the magnet URI grammar
    #[error("malformed magnet link: {reason}{}", display_cause(.source))]
    MalformedMagnetLink {
        /// Short description of the violated rule
        reason: &'static str,
        /// The leaf failure, when there is one
        #[source]
        source: Option<Box<Error>>,
    },

    /// The magnet link was valid but carried no BitTorrent info-hash
    #[error("wrong magnet link type: {reason}")]
    WrongMagnetLinkType {
        /// Why the link was rejected
        reason: &'static str,
    },
}

fn display_cause(source: &Option<Box<Error>>) -> String {
    match source {
        Some(cause) => format!(" [{}]", cause),
        None => String::new(),
    }
}

impl Error {
    /// Creates a new URN error
    pub fn invalid_urn(input: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidUrn {
            input: input.into(),
            reason,
        }
    }

    /// Creates a new integer error
    pub fn invalid_integer(input: impl Into<String>, source: std::num::ParseIntError) -> Self {
        Self::InvalidInteger {
            input: input.into(),
            source,
        }
    }

    /// Creates a new numeric range error
    pub fn invalid_num_range(input: impl Into<String>) -> Self {
        Self::InvalidNumRange {
            input: input.into(),
        }
    }

    /// Creates a new escape error
    pub fn invalid_escape(offset: usize, escape: impl Into<String>) -> Self {
        Self::InvalidEscape {
            offset,
            escape: escape.into(),
        }
    }

    /// Creates a new base32 error
    pub fn invalid_base32(offset: usize) -> Self {
        Self::InvalidBase32 { offset }
    }

    /// Creates a malformed magnet link error without an underlying cause
    pub fn malformed(reason: &'static str) -> Self {
        Self::MalformedMagnetLink {
            reason,
            source: None,
        }
    }

    /// Creates a malformed magnet link error wrapping a leaf failure
    pub fn malformed_with(reason: &'static str, cause: impl Into<Error>) -> Self {
        Self::MalformedMagnetLink {
            reason,
            source: Some(Box::new(cause.into())),
        }
    }

    /// Creates a wrong link type error
    pub fn wrong_type(reason: &'static str) -> Self {
        Self::WrongMagnetLinkType { reason }
    }

    /// Returns true for syntactic failures of any kind
    pub fn is_malformed(&self) -> bool {
        !self.is_wrong_type()
    }

    /// Returns true if the link parsed but was not a torrent link
    pub fn is_wrong_type(&self) -> bool {
        matches!(self, Self::WrongMagnetLinkType { .. })
    }

    /// Returns the sub-reason of a magnet link level error
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            Self::MalformedMagnetLink { reason, .. } | Self::WrongMagnetLinkType { reason } => {
                Some(*reason)
            }
            _ => None,
        }
    }
}
