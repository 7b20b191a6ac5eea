//! Player secrets.

use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};

/// The width, in bytes, that secrets are padded to before they are combined.
pub const SECRET_LEN: usize = 32;

/// How a secret longer than [`SECRET_LEN`] is handled when it is padded.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlongPolicy {
    /// Fail with [`SecretError::TooLong`].
    #[default]
    Reject,
    /// Keep the first [`SECRET_LEN`] bytes.
    Truncate,
}

/// A secret error.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum SecretError {
    #[error("secret is {len} bytes, the maximum is {max}")]
    TooLong { len: usize, max: usize },
}

/// A secret byte string supplied by a player.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(Vec<u8>);

opaque_debug::implement!(Secret);

impl Secret {
    /// Creates a secret from raw bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Parses a secret entered by a player.
    ///
    /// Non-empty, even-length input made only of hex digits is decoded as
    /// hex. Anything else is taken as its UTF-8 bytes.
    pub fn parse(input: &str) -> Self {
        if looks_like_hex(input) {
            if let Ok(bytes) = hex::decode(input) {
                return Self(bytes);
            }
        }

        Self(input.as_bytes().to_vec())
    }

    /// Generates a random full-width secret using the provided RNG.
    pub fn random<R: Rng + CryptoRng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen::<[u8; SECRET_LEN]>().to_vec())
    }

    /// Returns the secret bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the secret in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the secret is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Right-pads the secret with zeros to [`SECRET_LEN`] bytes.
    pub fn pad(&self, policy: OverlongPolicy) -> Result<[u8; SECRET_LEN], SecretError> {
        let bytes = match policy {
            _ if self.len() <= SECRET_LEN => &self.0[..],
            OverlongPolicy::Truncate => &self.0[..SECRET_LEN],
            OverlongPolicy::Reject => {
                return Err(SecretError::TooLong {
                    len: self.len(),
                    max: SECRET_LEN,
                })
            }
        };

        let mut padded = [0u8; SECRET_LEN];
        padded[..bytes.len()].copy_from_slice(bytes);

        Ok(padded)
    }
}

fn looks_like_hex(input: &str) -> bool {
    !input.is_empty() && input.len() % 2 == 0 && input.bytes().all(|b| b.is_ascii_hexdigit())
}

impl AsRef<[u8]> for Secret {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
