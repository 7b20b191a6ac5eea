//! A commit-reveal coin flip between two players, and a draw among more.
//!
//! Player A (the [`Sender`]) commits to its secret, Player B (the
//! [`Receiver`]) answers with its own secret in the clear, and Player A then
//! opens the commitment. Both secrets are combined into one shared bit.
//!
//! A [`Game`] runs the same commit-then-reveal flow for any number of players
//! and picks one winner among them.
//!
//! # Example
//!
//! ```
//! use fairflip_core::{flip::Outcome, Secret};
//! use fairflip_cointoss_core::{Sender, Receiver, CointossError};
//!
//! # fn main() -> Result<(), CointossError> {
//! let sender = Sender::new(Secret::parse("abc"));
//! let receiver = Receiver::new(Secret::parse("xyz"));
//!
//! let (sender, commitment) = sender.commit()?;
//! let (receiver, receiver_payload) = receiver.reveal(commitment)?;
//! let (sender_output, sender) = sender.receive(receiver_payload)?;
//! let sender_payload = sender.finalize();
//! let receiver_output = receiver.finalize(sender_payload)?;
//!
//! assert_eq!(sender_output, receiver_output);
//! assert_eq!(receiver_output.outcome(), Outcome::PlayerA);
//! # Ok(())
//! # }
//! ```

#![deny(
    unsafe_code,
    missing_docs,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all
)]

mod config;
mod game;
pub mod msgs;
mod receiver;
mod sender;
mod session;

pub use config::{CointossConfig, CointossConfigBuilder, CointossConfigBuilderError};
pub use game::{Game, GameError, PlayerId};
pub use receiver::{receiver_state, Receiver};
pub use sender::{sender_state, Sender};
pub use session::{simulate, Session};

/// A coin-flip error.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum CointossError {
    #[error("commitment error: {0}")]
    Commitment(#[from] fairflip_core::commit::CommitmentError),
    #[error("secret error: {0}")]
    Secret(#[from] fairflip_core::secret::SecretError),
}

impl CointossError {
    /// Returns `true` if the sender's commitment or its reveal is invalid.
    pub fn is_cheating(&self) -> bool {
        matches!(self, Self::Commitment(_))
    }
}
