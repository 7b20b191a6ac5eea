use fairflip_core::{flip::Flip, Hash, Secret};
use tracing::instrument;

use crate::{CointossConfig, CointossError, Receiver, Sender};

/// The public record of a coin flip played in process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    commitment: Hash,
    flip: Flip,
}

impl Session {
    /// Returns the sender's commitment.
    pub fn commitment(&self) -> &Hash {
        &self.commitment
    }

    /// Returns the output of the coin flip.
    pub fn flip(&self) -> &Flip {
        &self.flip
    }
}

/// Plays both roles of the coin flip in process.
///
/// If `reveal` is provided the sender opens its commitment with it instead of
/// its own secret, which the receiver detects unless the two are equal.
///
/// # Arguments
///
/// * `config` - The coin-flip configuration, shared by both players.
/// * `secret_a` - The sender's secret.
/// * `secret_b` - The receiver's secret.
/// * `reveal` - A substitute secret for the sender to reveal.
#[instrument(level = "debug", skip_all, fields(cheat = reveal.is_some()))]
pub fn simulate(
    config: CointossConfig,
    secret_a: Secret,
    secret_b: Secret,
    reveal: Option<Secret>,
) -> Result<Session, CointossError> {
    let sender = Sender::new_with_config(config.clone(), secret_a);
    let receiver = Receiver::new_with_config(config, secret_b);

    let (sender, sender_commitment) = sender.commit()?;
    let commitment = sender_commitment.commitment;

    let (receiver, receiver_payload) = receiver.reveal(sender_commitment)?;
    let (sender_flip, sender) = sender.receive(receiver_payload)?;

    let payload = match reveal {
        Some(secret) => sender.finalize_with(secret),
        None => sender.finalize(),
    };

    let flip = receiver.finalize(payload)?;

    debug_assert_eq!(sender_flip, flip);

    Ok(Session { commitment, flip })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairflip_core::flip::Outcome;

    #[test]
    fn test_simulate() {
        let session = simulate(
            CointossConfig::default(),
            Secret::parse("abc"),
            Secret::parse("xyz"),
            None,
        )
        .unwrap();

        assert_eq!(
            session.commitment().to_string(),
            "4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45"
        );
        assert_eq!(session.flip().outcome(), Outcome::PlayerA);
    }

    #[test]
    fn test_simulate_detects_substituted_reveal() {
        let err = simulate(
            CointossConfig::default(),
            Secret::parse("abc"),
            Secret::parse("xyz"),
            Some(Secret::parse("abd")),
        )
        .unwrap_err();

        assert!(err.is_cheating());
    }

    #[test]
    fn test_simulate_reveal_of_same_secret() {
        let session = simulate(
            CointossConfig::default(),
            Secret::parse("abc"),
            Secret::parse("xyz"),
            Some(Secret::parse("abc")),
        )
        .unwrap();

        assert_eq!(session.flip().outcome(), Outcome::PlayerA);
    }

    #[test]
    fn test_simulate_overlong_sender_secret() {
        let err = simulate(
            CointossConfig::default(),
            Secret::new(vec![0xaa; 40]),
            Secret::parse("xyz"),
            None,
        )
        .unwrap_err();

        assert!(!err.is_cheating());
    }
}
