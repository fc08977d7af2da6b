//! Tagged digests and the text encodings info-hashes arrive in.

use crate::error::{Error, Result};
use std::fmt;

/// RFC 4648 standard base32 alphabet
const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Base32 padding symbol
const BASE32_PAD: u8 = b'=';

/// Digest algorithm a [`HashValue`] was produced with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// SHA-1, 20 byte digests (BitTorrent v1)
    Sha1,
    /// SHA-256, 32 byte digests (BitTorrent v2)
    Sha256,
}

impl HashAlgorithm {
    /// Returns the lowercase algorithm name
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha256 => "sha256",
        }
    }

    /// Length in bytes of a digest produced by this algorithm
    pub fn digest_len(&self) -> usize {
        match self {
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha256 => 32,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A digest together with the algorithm that produced it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HashValue {
    algorithm: HashAlgorithm,
    bytes: Vec<u8>,
}

impl HashValue {
    /// Wraps already decoded digest bytes
    pub fn new(algorithm: HashAlgorithm, bytes: Vec<u8>) -> Self {
        Self { algorithm, bytes }
    }

    /// Decodes a hex string (either case)
    pub fn from_hex(algorithm: HashAlgorithm, s: &str) -> Result<Self> {
        Ok(Self::new(algorithm, hex::decode(s)?))
    }

    /// Decodes an upper case, optionally padded, base32 string
    pub fn from_base32(algorithm: HashAlgorithm, s: &str) -> Result<Self> {
        Ok(Self::new(algorithm, decode_base32(s)?))
    }

    /// Algorithm tag
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Raw digest bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Lowercase hex rendering of the digest
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl fmt::Display for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.to_hex())
    }
}

/// Decode standard base32.
///
/// The input length must be a multiple of 8. Padding may only appear at the
/// end and only in the amounts a final 8 symbol block can carry.
pub(crate) fn decode_base32(input: &str) -> Result<Vec<u8>> {
    let data = input.as_bytes();
    if data.len() % 8 != 0 {
        return Err(Error::invalid_base32(data.len() - data.len() % 8));
    }

    let data_len = data
        .iter()
        .rposition(|&b| b != BASE32_PAD)
        .map_or(0, |pos| pos + 1);
    let padding = data.len() - data_len;
    if !matches!(padding, 0 | 1 | 3 | 4 | 6) {
        return Err(Error::invalid_base32(data_len));
    }

    let mut output = Vec::with_capacity(data_len * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits_in_buffer = 0;

    for (offset, &symbol) in data[..data_len].iter().enumerate() {
        let value = BASE32_ALPHABET
            .iter()
            .position(|&c| c == symbol)
            .ok_or_else(|| Error::invalid_base32(offset))? as u32;

        buffer = (buffer << 5) | value;
        bits_in_buffer += 5;

        if bits_in_buffer >= 8 {
            bits_in_buffer -= 8;
            output.push((buffer >> bits_in_buffer) as u8);
            buffer &= (1 << bits_in_buffer) - 1;
        }
    }

    Ok(output)
}
