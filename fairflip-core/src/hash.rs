//! Keccak-256 digests.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

/// Error returned when a hex string cannot be parsed into a [`Hash`].
#[derive(Debug, thiserror::Error)]
#[error("invalid hash encoding: {0}")]
pub struct ParseHashError(#[from] hex::FromHexError);

/// A 256-bit Keccak digest.
#[derive(Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hash([u8; 32]);

impl Hash {
    /// The length of a hash in bytes
    pub const LEN: usize = 32;

    /// Returns the raw bytes of the hash.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns `true` if every byte of the hash is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Returns the least significant bit of the hash, reading the digest as a
    /// big-endian unsigned integer.
    #[inline]
    pub fn lsb(&self) -> u8 {
        self.0[Self::LEN - 1] & 1
    }
}

/// Hashes the provided bytes with Keccak-256.
///
/// This is the pre-standard Keccak padding, not NIST SHA3-256.
pub fn keccak256(data: &[u8]) -> Hash {
    Hash(Keccak256::digest(data).into())
}

impl From<[u8; 32]> for Hash {
    #[inline]
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<Hash> for [u8; 32] {
    #[inline]
    fn from(hash: Hash) -> Self {
        hash.0
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({self})")
    }
}

impl FromStr for Hash {
    type Err = ParseHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}
