//! Magnet link parsing ([BEP-53]).
//!
//! A magnet link is a URI with the `magnet` scheme whose query carries the
//! metadata needed to find some content: `magnet:?xt=urn:btih:...&dn=name`.
//! Every parameter may repeat, so each field of [`MagnetLink`] collects all
//! occurrences.
//!
//! ## Parameter grammar
//!
//! | Key            | Field                   | Treatment                          |
//! |----------------|-------------------------|------------------------------------|
//! | `dn`           | `display_names`         | verbatim                           |
//! | `xt`, `xt.<N>` | `exact_topics`          | parsed as [`Urn`]                  |
//! | `xl`           | `exact_lengths`         | base-10 integer                    |
//! | `as`           | `acceptable_sources`    | unescaped a second time            |
//! | `xs`           | `exact_sources`         | verbatim                           |
//! | `kt`           | `keyword_topics`        | verbatim                           |
//! | `mt`           | `manifest_topics`       | verbatim                           |
//! | `tr`           | `trackers`              | unescaped a second time            |
//! | `so`           | `select_only`           | comma list of [`NumRange`]         |
//! | `x.<name>`     | `experimental`          | verbatim, keyed by `<name>`        |
//! | anything else  | `unknown`               | verbatim, or an error when strict  |
//!
//! Keys are matched case-insensitively.
//!
//! [BEP-53]: https://www.bittorrent.org/beps/bep_0053.html

mod query;

use crate::error::{Error, Result};
use crate::range::{parse_int, NumRange};
use crate::urn::Urn;
use std::collections::BTreeMap;
use tracing::{debug, trace};
use url::Url;

use query::{group_query, query_unescape};

/// Scheme every magnet link must use (compared case-insensitively)
pub const MAGNET_SCHEME: &str = "magnet";

/// Prefix of experimental parameter keys
pub const EXPERIMENTAL_PREFIX: &str = "x.";

/// Options controlling how a magnet link is parsed
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Reject parameters outside the magnet grammar instead of collecting them
    pub strict: bool,
}

impl ParseOptions {
    /// Creates lenient options
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether unknown parameters are rejected
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// A parsed magnet link
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MagnetLink {
    /// Display names (`dn`)
    pub display_names: Vec<String>,
    /// Exact topics (`xt`, `xt.1`, ...)
    pub exact_topics: Vec<Urn>,
    /// Exact lengths in bytes (`xl`)
    pub exact_lengths: Vec<i64>,
    /// Acceptable sources (`as`)
    pub acceptable_sources: Vec<String>,
    /// Exact sources (`xs`)
    pub exact_sources: Vec<String>,
    /// Keyword topics (`kt`)
    pub keyword_topics: Vec<String>,
    /// Manifest topics (`mt`)
    pub manifest_topics: Vec<String>,
    /// Tracker addresses (`tr`)
    pub trackers: Vec<String>,
    /// Select-only file ranges (`so`)
    pub select_only: Vec<NumRange>,
    /// Experimental parameters, keyed without the `x.` prefix
    pub experimental: BTreeMap<String, Vec<String>>,
    /// Parameters outside the grammar, only filled in lenient mode
    pub unknown: BTreeMap<String, Vec<String>>,
}

/// One recognised magnet parameter, or the fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parameter<'a> {
    DisplayName,
    ExactTopic,
    ExactLength,
    AcceptableSource,
    ExactSource,
    KeywordTopic,
    ManifestTopic,
    Tracker,
    SelectOnly,
    Experimental(&'a str),
    Unknown,
}

impl<'a> Parameter<'a> {
    /// Classify a lowercased key
    fn classify(key: &'a str) -> Result<Self> {
        let parameter = match key {
            "dn" => Parameter::DisplayName,
            "xl" => Parameter::ExactLength,
            "as" => Parameter::AcceptableSource,
            "xs" => Parameter::ExactSource,
            "kt" => Parameter::KeywordTopic,
            "mt" => Parameter::ManifestTopic,
            "tr" => Parameter::Tracker,
            "so" => Parameter::SelectOnly,
            _ if is_exact_topic_key(key) => Parameter::ExactTopic,
            _ => match key.strip_prefix(EXPERIMENTAL_PREFIX) {
                Some("") => return Err(Error::malformed("invalid experimental parameter")),
                Some(name) => Parameter::Experimental(name),
                None => Parameter::Unknown,
            },
        };
        Ok(parameter)
    }
}

/// `xt` or `xt.<N>` with `<N>` a base-10 integer
fn is_exact_topic_key(key: &str) -> bool {
    match key.strip_prefix("xt") {
        Some("") => true,
        Some(rest) => rest
            .strip_prefix('.')
            .is_some_and(|index| index.parse::<i64>().is_ok()),
        None => false,
    }
}

impl MagnetLink {
    /// Parse a magnet link with default (lenient) options
    pub fn parse(uri: &str) -> Result<Self> {
        Self::parse_with_options(uri, &ParseOptions::default())
    }

    /// Parse a magnet link
    pub fn parse_with_options(uri: &str, options: &ParseOptions) -> Result<Self> {
        let url = Url::parse(uri).map_err(|e| Error::malformed_with("invalid uri", e))?;
        if !url.scheme().eq_ignore_ascii_case(MAGNET_SCHEME) {
            return Err(Error::malformed("invalid scheme"));
        }

        let mut link = MagnetLink::default();
        for (key, values) in group_query(&url) {
            let parameter = Parameter::classify(&key)?;
            trace!("Dispatching {} value(s) of '{}' as {:?}", values.len(), key, parameter);
            link.push(parameter, &key, values, options)?;
        }

        debug!(
            "Parsed magnet link: {} exact topic(s), {} tracker(s), {} unknown parameter(s)",
            link.exact_topics.len(),
            link.trackers.len(),
            link.unknown.len()
        );
        Ok(link)
    }

    /// Add every value of one key to the matching field
    fn push(
        &mut self,
        parameter: Parameter<'_>,
        key: &str,
        values: Vec<String>,
        options: &ParseOptions,
    ) -> Result<()> {
        match parameter {
            Parameter::DisplayName => self.display_names.extend(values),
            Parameter::ExactTopic => {
                for value in &values {
                    let urn =
                        Urn::parse(value).map_err(|e| Error::malformed_with("invalid xt", e))?;
                    self.exact_topics.push(urn);
                }
            }
            Parameter::ExactLength => {
                for value in &values {
                    let length =
                        parse_int(value).map_err(|e| Error::malformed_with("invalid xl", e))?;
                    self.exact_lengths.push(length);
                }
            }
            Parameter::AcceptableSource => {
                for value in &values {
                    let source =
                        query_unescape(value).map_err(|e| Error::malformed_with("invalid as", e))?;
                    self.acceptable_sources.push(source);
                }
            }
            Parameter::ExactSource => self.exact_sources.extend(values),
            Parameter::KeywordTopic => self.keyword_topics.extend(values),
            Parameter::ManifestTopic => self.manifest_topics.extend(values),
            Parameter::Tracker => {
                for value in &values {
                    let tracker =
                        query_unescape(value).map_err(|e| Error::malformed_with("invalid tr", e))?;
                    self.trackers.push(tracker);
                }
            }
            Parameter::SelectOnly => {
                for segment in values.iter().flat_map(|value| value.split(',')) {
                    let range = NumRange::parse(segment)
                        .map_err(|e| Error::malformed_with("invalid so", e))?;
                    self.select_only.push(range);
                }
            }
            Parameter::Experimental(name) => self
                .experimental
                .entry(name.to_string())
                .or_default()
                .extend(values),
            Parameter::Unknown => {
                if options.strict {
                    return Err(Error::malformed("unknown parameter"));
                }
                debug!("Keeping unknown parameter '{}'", key);
                self.unknown
                    .entry(key.to_string())
                    .or_default()
                    .extend(values);
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for MagnetLink {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Parse a magnet link
pub fn parse_magnet_link(uri: &str, options: &ParseOptions) -> Result<MagnetLink> {
    MagnetLink::parse_with_options(uri, options)
}
