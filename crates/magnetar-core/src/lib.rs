//! # magnetar-core
//!
//! A library for parsing magnet URIs and the BitTorrent info-hashes they carry.
//!
//! This crate provides the core functionality for:
//! - Parsing `urn:<nid>:<nss>` identifiers and `N` / `A-B` numeric ranges
//! - Parsing a full magnet link into every parameter it carries
//! - Decoding `btih` exact topics into SHA-1 or SHA-256 info-hashes
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`magnet`]: Magnet link grammar and [`ParseOptions`]
//! - [`torrent`]: BitTorrent specialization of a parsed link
//! - [`urn`], [`range`]: Sub-grammars used by magnet parameters
//! - [`hash`]: Tagged digests
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```
//! use magnetar_core::{MagnetLink, ParseOptions, HashAlgorithm};
//! use std::sync::Arc;
//!
//! let uri = "magnet:?xt=urn:btih:c12fe1c06bba254a9dc9f519b335aa7c1367a88a\
//!            &dn=Example&tr=udp%3A%2F%2Ftracker.example%3A80";
//!
//! let link = Arc::new(MagnetLink::parse_with_options(uri, &ParseOptions::new().strict(true))?);
//! assert_eq!(link.display_names, vec!["Example"]);
//! assert_eq!(link.trackers, vec!["udp://tracker.example:80"]);
//!
//! let torrent = link.as_torrent()?;
//! assert_eq!(torrent.info_hashes()[0].algorithm(), HashAlgorithm::Sha1);
//! # Ok::<(), magnetar_core::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod error;
pub mod hash;
pub mod magnet;
pub mod range;
pub mod torrent;
pub mod urn;

// Re-export primary types for convenience
pub use error::{Error, Result};
pub use hash::{HashAlgorithm, HashValue};
pub use magnet::{parse_magnet_link, MagnetLink, ParseOptions};
pub use range::{parse_num_range, NumRange};
pub use torrent::{parse_torrent_magnet_link, TorrentMagnetLink};
pub use urn::{parse_urn, Urn};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
