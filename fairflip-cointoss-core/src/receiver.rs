use fairflip_core::{commit, flip::Flip, Hash, Secret};
use tracing::{debug, warn};

use crate::{
    msgs::{ReceiverPayload, SenderCommitment, SenderPayload},
    CointossConfig, CointossError,
};

/// A coin-flip receiver, the player who answers the commitment.
#[derive(Debug)]
pub struct Receiver<S: receiver_state::State = receiver_state::Initialized> {
    config: CointossConfig,
    state: S,
}

impl Receiver {
    /// Create a new receiver.
    pub fn new(secret: Secret) -> Self {
        Self::new_with_config(CointossConfig::default(), secret)
    }

    /// Create a new receiver with the provided configuration.
    pub fn new_with_config(config: CointossConfig, secret: Secret) -> Self {
        Self {
            config,
            state: receiver_state::Initialized { secret },
        }
    }

    /// Reveals the receiver's secret after receiving the sender's commitment.
    ///
    /// A zero commitment is rejected before anything is revealed.
    pub fn reveal(
        self,
        sender_commitment: SenderCommitment,
    ) -> Result<(Receiver<receiver_state::Received>, ReceiverPayload), CointossError> {
        let receiver_state::Initialized { secret } = self.state;

        commit::check(&sender_commitment.commitment)?;
        secret.pad(self.config.overlong())?;

        debug!(commitment = %sender_commitment.commitment, "receiver revealed secret");

        Ok((
            Receiver {
                config: self.config,
                state: receiver_state::Received {
                    secret: secret.clone(),
                    commitment: sender_commitment.commitment,
                },
            },
            ReceiverPayload { secret },
        ))
    }
}

impl Receiver<receiver_state::Received> {
    /// Returns the sender's commitment.
    pub fn commitment(&self) -> &Hash {
        &self.state.commitment
    }

    /// Finalizes the coin flip, returning its output.
    ///
    /// The sender's decommitment is checked before the secrets are combined.
    pub fn finalize(self, payload: SenderPayload) -> Result<Flip, CointossError> {
        let decommitment = payload.decommitment;
        let receiver_secret = self.state.secret;
        let commitment = self.state.commitment;

        if let Err(err) = decommitment.verify(&commitment) {
            warn!(
                %commitment,
                revealed = %decommitment.commit(),
                "sender's reveal does not open its commitment"
            );
            return Err(err.into());
        }

        let flip = Flip::from_secrets(
            decommitment.data(),
            &receiver_secret,
            self.config.overlong(),
        )?;

        debug!(hash = %flip.hash(), outcome = %flip.outcome(), "receiver computed flip");

        Ok(flip)
    }
}

/// Coin-flip receiver state.
pub mod receiver_state {
    use fairflip_core::{Hash, Secret};

    mod sealed {
        pub trait Sealed {}

        impl Sealed for super::Initialized {}
        impl Sealed for super::Received {}
    }

    /// The receiver's state.
    pub trait State: sealed::Sealed {}

    /// The receiver's initial state.
    pub struct Initialized {
        pub(super) secret: Secret,
    }

    impl State for Initialized {}

    opaque_debug::implement!(Initialized);

    /// The receiver's state after receiving the sender's commitment and
    /// revealing its own secret.
    pub struct Received {
        pub(super) secret: Secret,
        pub(super) commitment: Hash,
    }

    impl State for Received {}

    opaque_debug::implement!(Received);
}
