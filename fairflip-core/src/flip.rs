//! Combining secrets into a coin flip.
//!
//! Two players share a [`Flip`], the parity of the hash of their XORed
//! secrets. A [`Draw`] generalizes this to any number of players by reducing
//! the hash modulo the player count.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    hash::{keccak256, Hash},
    secret::{OverlongPolicy, SecretError, SECRET_LEN},
    Secret,
};

/// The winner of a coin flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Bit 0.
    PlayerA,
    /// Bit 1.
    PlayerB,
}

impl Outcome {
    /// Creates an outcome from the least significant bit of `bit`.
    #[inline]
    pub fn from_bit(bit: u8) -> Self {
        if bit & 1 == 0 {
            Self::PlayerA
        } else {
            Self::PlayerB
        }
    }

    /// Returns the outcome as a bit.
    #[inline]
    pub fn bit(self) -> u8 {
        match self {
            Self::PlayerA => 0,
            Self::PlayerB => 1,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlayerA => f.write_str("Player A wins"),
            Self::PlayerB => f.write_str("Player B wins"),
        }
    }
}

/// XORs two padded secrets.
#[inline]
pub fn combine(a: &[u8; SECRET_LEN], b: &[u8; SECRET_LEN]) -> [u8; SECRET_LEN] {
    std::array::from_fn(|i| a[i] ^ b[i])
}

/// XORs any number of padded secrets.
///
/// An empty input combines to all zeros.
pub fn combine_all<'a, I>(secrets: I) -> [u8; SECRET_LEN]
where
    I: IntoIterator<Item = &'a [u8; SECRET_LEN]>,
{
    secrets
        .into_iter()
        .fold([0u8; SECRET_LEN], |acc, secret| combine(&acc, secret))
}

/// Reads `hash` as a big-endian unsigned integer and reduces it modulo
/// `players`.
///
/// # Panics
///
/// Panics if `players` is zero.
pub fn select_winner(hash: &Hash, players: usize) -> usize {
    assert!(players > 0, "cannot select a winner among zero players");

    let modulus = players as u128;
    hash.as_bytes()
        .iter()
        .fold(0u128, |acc, byte| (acc * 256 + u128::from(*byte)) % modulus) as usize
}

/// Derives the outcome of a flip from the combined secrets.
#[inline]
pub fn derive_outcome(combined: &[u8; SECRET_LEN]) -> Outcome {
    Flip::from_combined(combined).outcome()
}

/// The result of a coin flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flip {
    hash: Hash,
    outcome: Outcome,
}

impl Flip {
    /// Computes the flip from the combined secrets.
    pub fn from_combined(combined: &[u8; SECRET_LEN]) -> Self {
        let hash = keccak256(combined);

        Self {
            hash,
            outcome: Outcome::from_bit(hash.lsb()),
        }
    }

    /// Pads and combines both players' secrets, then computes the flip.
    pub fn from_secrets(
        secret_a: &Secret,
        secret_b: &Secret,
        policy: OverlongPolicy,
    ) -> Result<Self, SecretError> {
        let combined = combine(&secret_a.pad(policy)?, &secret_b.pad(policy)?);

        Ok(Self::from_combined(&combined))
    }

    /// Returns the hash of the combined secrets.
    pub fn hash(&self) -> &Hash {
        &self.hash
    }

    /// Returns the outcome.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }
}

/// The minimum number of players in a [`Draw`].
pub const MIN_PLAYERS: usize = 2;

/// A draw error.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum DrawError {
    #[error("a draw needs at least 2 players, got {0}")]
    TooFewPlayers(usize),
    #[error("secret error: {0}")]
    Secret(#[from] SecretError),
}

/// The result of a draw among two or more players.
///
/// With two players the winner index equals the bit of the corresponding
/// [`Flip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draw {
    hash: Hash,
    winner: usize,
    players: usize,
}

impl Draw {
    /// Computes the draw from the combined secrets of `players` players.
    pub fn from_combined(combined: &[u8; SECRET_LEN], players: usize) -> Result<Self, DrawError> {
        if players < MIN_PLAYERS {
            return Err(DrawError::TooFewPlayers(players));
        }

        let hash = keccak256(combined);

        Ok(Self {
            hash,
            winner: select_winner(&hash, players),
            players,
        })
    }

    /// Pads and combines every player's secret, then computes the draw.
    ///
    /// The winner is an index into `secrets`.
    pub fn from_secrets(secrets: &[Secret], policy: OverlongPolicy) -> Result<Self, DrawError> {
        let padded = secrets
            .iter()
            .map(|secret| secret.pad(policy))
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_combined(&combine_all(&padded), secrets.len())
    }

    /// Returns the hash of the combined secrets.
    pub fn hash(&self) -> &Hash {
        &self.hash
    }

    /// Returns the index of the winning player.
    pub fn winner(&self) -> usize {
        self.winner
    }

    /// Returns the number of players.
    pub fn players(&self) -> usize {
        self.players
    }
}
