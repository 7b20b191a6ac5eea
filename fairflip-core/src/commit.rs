//! Hash commitments.
//!
//! A commitment is the Keccak-256 digest of the committed bytes. There is no
//! blinding nonce, so the commitment of a value is reproducible by anyone who
//! knows the value.

use serde::{Deserialize, Serialize};

use crate::hash::{keccak256, Hash};

/// A commitment error.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum CommitmentError {
    #[error("revealed value does not match the commitment")]
    Mismatch,
    #[error("commitment is the zero hash")]
    Zero,
}

/// Checks that a commitment received from another player is usable.
///
/// The zero hash is rejected, nothing is known to hash to it.
#[inline]
pub fn check(commitment: &Hash) -> Result<(), CommitmentError> {
    if commitment.is_zero() {
        Err(CommitmentError::Zero)
    } else {
        Ok(())
    }
}

/// Commits to the provided bytes.
#[inline]
pub fn commit(data: &[u8]) -> Hash {
    keccak256(data)
}

/// Returns `true` if `data` opens `commitment`.
#[inline]
pub fn verify(data: &[u8], commitment: &Hash) -> bool {
    commit(data) == *commitment
}

/// The opening of a hash commitment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decommitment<T> {
    data: T,
}

impl<T> Decommitment<T>
where
    T: AsRef<[u8]>,
{
    /// Creates a decommitment claiming to open a commitment to `data`.
    ///
    /// Nothing is checked here, a claimed opening is only trusted after
    /// [`Decommitment::verify`] succeeds.
    pub fn new(data: T) -> Self {
        Self { data }
    }

    /// Recomputes the commitment to the revealed data.
    pub fn commit(&self) -> Hash {
        commit(self.data.as_ref())
    }

    /// Verifies the decommitment against the provided commitment.
    pub fn verify(&self, commitment: &Hash) -> Result<(), CommitmentError> {
        if verify(self.data.as_ref(), commitment) {
            Ok(())
        } else {
            Err(CommitmentError::Mismatch)
        }
    }

    /// Returns a reference to the revealed data.
    pub fn data(&self) -> &T {
        &self.data
    }
}

/// A trait for committing to a value with a hash.
pub trait HashCommit: AsRef<[u8]> + Sized {
    /// Commits to `self`, returning the decommitment and the commitment.
    fn hash_commit(self) -> (Decommitment<Self>, Hash) {
        let commitment = commit(self.as_ref());
        (Decommitment { data: self }, commitment)
    }
}

impl<T> HashCommit for T where T: AsRef<[u8]> {}
