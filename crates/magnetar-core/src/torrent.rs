//! BitTorrent specialization of magnet links.
//!
//! A torrent magnet link is a magnet link with at least one `urn:btih:`
//! exact topic. The info-hash encoding is chosen by the length of the
//! namespace specific string:
//!
//! | Length | Algorithm | Encoding |
//! |--------|-----------|----------|
//! | 32     | SHA-1     | base32   |
//! | 40     | SHA-1     | hex      |
//! | 56     | SHA-256   | base32   |
//! | 64     | SHA-256   | hex      |

use crate::error::{Error, Result};
use crate::hash::{HashAlgorithm, HashValue};
use crate::magnet::{MagnetLink, ParseOptions};
use crate::urn::Urn;
use std::ops::Deref;
use std::sync::Arc;
use tracing::{debug, trace};

/// Namespace identifier of BitTorrent info-hash URNs
pub const BTIH_NAMESPACE: &str = "btih";

/// A magnet link known to identify a torrent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentMagnetLink {
    link: Arc<MagnetLink>,
    info_hashes: Vec<HashValue>,
}

impl TorrentMagnetLink {
    /// Parse a URI straight into a torrent magnet link
    pub fn parse(uri: &str) -> Result<Self> {
        Self::parse_with_options(uri, &ParseOptions::default())
    }

    /// Parse a URI straight into a torrent magnet link
    pub fn parse_with_options(uri: &str, options: &ParseOptions) -> Result<Self> {
        let link = MagnetLink::parse_with_options(uri, options)?;
        Self::from_magnet(Arc::new(link))
    }

    /// Specialize a parsed magnet link.
    ///
    /// Fails with [`Error::WrongMagnetLinkType`] when the link has no `btih`
    /// exact topic.
    pub fn from_magnet(link: Arc<MagnetLink>) -> Result<Self> {
        let info_hashes = link
            .exact_topics
            .iter()
            .filter(|urn| urn.namespace_id().eq_ignore_ascii_case(BTIH_NAMESPACE))
            .map(decode_btih)
            .collect::<Result<Vec<_>>>()?;

        if info_hashes.is_empty() {
            return Err(Error::wrong_type("no torrent info-hash"));
        }

        debug!("Specialized magnet link with {} info-hash(es)", info_hashes.len());
        Ok(Self { link, info_hashes })
    }

    /// The general magnet link this view was built from
    pub fn magnet_link(&self) -> &Arc<MagnetLink> {
        &self.link
    }

    /// Decoded info-hashes, in exact topic order
    pub fn info_hashes(&self) -> &[HashValue] {
        &self.info_hashes
    }
}

impl Deref for TorrentMagnetLink {
    type Target = MagnetLink;

    fn deref(&self) -> &MagnetLink {
        &self.link
    }
}

impl MagnetLink {
    /// Specialize into a torrent link sharing this link
    pub fn as_torrent(self: &Arc<Self>) -> Result<TorrentMagnetLink> {
        TorrentMagnetLink::from_magnet(Arc::clone(self))
    }

    /// Specialize into a torrent link taking ownership of this link
    pub fn into_torrent(self) -> Result<TorrentMagnetLink> {
        TorrentMagnetLink::from_magnet(Arc::new(self))
    }
}

/// Parse a URI straight into a torrent magnet link
pub fn parse_torrent_magnet_link(uri: &str, options: &ParseOptions) -> Result<TorrentMagnetLink> {
    TorrentMagnetLink::parse_with_options(uri, options)
}

fn decode_btih(urn: &Urn) -> Result<HashValue> {
    let encoded = urn.namespace_specific_string();
    trace!("Decoding btih of length {}", encoded.chars().count());

    let decoded = match encoded.chars().count() {
        32 => HashValue::from_base32(HashAlgorithm::Sha1, encoded),
        40 => HashValue::from_hex(HashAlgorithm::Sha1, encoded),
        56 => HashValue::from_base32(HashAlgorithm::Sha256, encoded),
        64 => HashValue::from_hex(HashAlgorithm::Sha256, encoded),
        _ => return Err(Error::malformed("cannot decode btih: bad length")),
    };
    decoded.map_err(|e| Error::malformed_with("cannot decode btih", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEX_V1: &str = "0123456789ABCDEF0123456789ABCDEF01234567";
    const BASE32_V1: &str = "AERUKZ4JVPG66AJDIVTYTK6N54ASGRLH";

    fn hex_v2() -> String {
        "ab".repeat(32)
    }

    #[test]
    fn test_hex_sha1() {
        let link = MagnetLink::parse(&format!("magnet:?xt=urn:btih:{}", HEX_V1)).unwrap();
        let torrent = link.into_torrent().unwrap();
        assert_eq!(torrent.info_hashes().len(), 1);

        let hash = &torrent.info_hashes()[0];
        assert_eq!(hash.algorithm(), HashAlgorithm::Sha1);
        assert_eq!(hash.as_bytes().len(), 20);
        assert_eq!(hash.to_hex(), HEX_V1.to_lowercase());
    }

    #[test]
    fn test_base32_sha1_matches_hex() {
        let from_hex = TorrentMagnetLink::parse(&format!("magnet:?xt=urn:btih:{}", HEX_V1)).unwrap();
        let from_base32 =
            TorrentMagnetLink::parse(&format!("magnet:?xt=urn:btih:{}", BASE32_V1)).unwrap();
        assert_eq!(from_base32.info_hashes(), from_hex.info_hashes());
    }

    #[test]
    fn test_hex_sha256() {
        let torrent =
            TorrentMagnetLink::parse(&format!("magnet:?xt=urn:btih:{}", hex_v2())).unwrap();
        let hash = &torrent.info_hashes()[0];
        assert_eq!(hash.algorithm(), HashAlgorithm::Sha256);
        assert_eq!(hash.as_bytes(), &[0xABu8; 32][..]);
    }

    #[test]
    fn test_base32_sha256() {
        // 32 zero bytes: 52 symbols plus 4 padding
        let encoded = format!("{}====", "A".repeat(52));
        assert_eq!(encoded.len(), 56);
        let torrent = TorrentMagnetLink::parse(&format!("magnet:?xt=urn:btih:{}", encoded)).unwrap();
        let hash = &torrent.info_hashes()[0];
        assert_eq!(hash.algorithm(), HashAlgorithm::Sha256);
        assert_eq!(hash.as_bytes(), &[0u8; 32][..]);
    }

    #[test]
    fn test_hash_order_follows_topics() {
        let uri = format!(
            "magnet:?xt=urn:btih:{}&xt=urn:sha1:ignored&xt=urn:BTIH:{}",
            HEX_V1,
            hex_v2()
        );
        let torrent = TorrentMagnetLink::parse(&uri).unwrap();
        let algorithms: Vec<_> = torrent.info_hashes().iter().map(|h| h.algorithm()).collect();
        assert_eq!(algorithms, vec![HashAlgorithm::Sha1, HashAlgorithm::Sha256]);
    }

    #[test]
    fn test_bad_length() {
        let err = TorrentMagnetLink::parse("magnet:?xt=urn:btih:abcdef").unwrap_err();
        assert!(err.is_malformed());
        assert_eq!(err.reason(), Some("cannot decode btih: bad length"));
    }

    #[test]
    fn test_bad_encoding() {
        let bad_hex = "zz".repeat(20);
        let err = TorrentMagnetLink::parse(&format!("magnet:?xt=urn:btih:{}", bad_hex)).unwrap_err();
        assert_eq!(err.reason(), Some("cannot decode btih"));

        let bad_base32 = "1".repeat(32);
        let err =
            TorrentMagnetLink::parse(&format!("magnet:?xt=urn:btih:{}", bad_base32)).unwrap_err();
        assert_eq!(err.reason(), Some("cannot decode btih"));
    }

    #[test]
    fn test_not_a_torrent() {
        let err = TorrentMagnetLink::parse("magnet:?dn=nothing").unwrap_err();
        assert!(err.is_wrong_type());
        assert!(!err.is_malformed());

        let err = TorrentMagnetLink::parse("magnet:?xt=urn:sha1:abc").unwrap_err();
        assert!(err.is_wrong_type());
    }

    #[test]
    fn test_parse_errors_propagate_unchanged() {
        let err = parse_torrent_magnet_link("http://example.com", &ParseOptions::default())
            .unwrap_err();
        assert_eq!(err.reason(), Some("invalid scheme"));

        let strict = ParseOptions::new().strict(true);
        let uri = format!("magnet:?xt=urn:btih:{}&foo=bar", HEX_V1);
        let err = parse_torrent_magnet_link(&uri, &strict).unwrap_err();
        assert_eq!(err.reason(), Some("unknown parameter"));
    }

    #[test]
    fn test_shares_the_magnet_link() {
        let uri = format!("magnet:?xt=urn:btih:{}&dn=shared&tr=udp%3A%2F%2Ft", HEX_V1);
        let link = Arc::new(MagnetLink::parse(&uri).unwrap());
        let torrent = link.as_torrent().unwrap();

        assert!(Arc::ptr_eq(torrent.magnet_link(), &link));
        assert_eq!(torrent.display_names, vec!["shared"]);
        assert_eq!(torrent.trackers, vec!["udp://t"]);
        assert_eq!(Arc::strong_count(&link), 2);
    }
}
