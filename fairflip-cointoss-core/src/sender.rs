use fairflip_core::{
    commit::{Decommitment, HashCommit},
    flip::Flip,
    Secret,
};
use tracing::debug;

use crate::{
    msgs::{ReceiverPayload, SenderCommitment, SenderPayload},
    CointossConfig, CointossError,
};

/// A coin-flip sender, the player who commits first.
#[derive(Debug)]
pub struct Sender<S: sender_state::State = sender_state::Initialized> {
    config: CointossConfig,
    state: S,
}

impl Sender {
    /// Create a new sender.
    pub fn new(secret: Secret) -> Self {
        Self::new_with_config(CointossConfig::default(), secret)
    }

    /// Create a new sender with the provided configuration.
    pub fn new_with_config(config: CointossConfig, secret: Secret) -> Self {
        Self {
            config,
            state: sender_state::Initialized { secret },
        }
    }

    /// Commits to the sender's secret.
    ///
    /// Fails without committing if the secret cannot be combined under the
    /// configured [`OverlongPolicy`](fairflip_core::secret::OverlongPolicy).
    pub fn commit(
        self,
    ) -> Result<(Sender<sender_state::Committed>, SenderCommitment), CointossError> {
        let sender_state::Initialized { secret } = self.state;

        secret.pad(self.config.overlong())?;

        let (decommitment, commitment) = secret.hash_commit();

        debug!(%commitment, "sender committed");

        Ok((
            Sender {
                config: self.config,
                state: sender_state::Committed { decommitment },
            },
            SenderCommitment { commitment },
        ))
    }
}

impl Sender<sender_state::Committed> {
    /// Receives the receiver's payload and computes the output of the
    /// coin flip.
    pub fn receive(
        self,
        payload: ReceiverPayload,
    ) -> Result<(Flip, Sender<sender_state::Received>), CointossError> {
        let decommitment = self.state.decommitment;

        let flip = Flip::from_secrets(
            decommitment.data(),
            &payload.secret,
            self.config.overlong(),
        )?;

        debug!(hash = %flip.hash(), outcome = %flip.outcome(), "sender computed flip");

        Ok((
            flip,
            Sender {
                config: self.config,
                state: sender_state::Received { decommitment },
            },
        ))
    }
}

impl Sender<sender_state::Received> {
    /// Finalizes the coin flip, decommitting the sender's secret.
    pub fn finalize(self) -> SenderPayload {
        SenderPayload {
            decommitment: self.state.decommitment,
        }
    }

    /// Finalizes the coin flip, opening the commitment with `reveal` in place
    /// of the committed secret.
    ///
    /// The receiver rejects the opening unless `reveal` equals the committed
    /// secret.
    pub fn finalize_with(self, reveal: Secret) -> SenderPayload {
        debug!("sender reveals a substitute secret");

        SenderPayload {
            decommitment: Decommitment::new(reveal),
        }
    }
}

/// Coin-flip sender state.
pub mod sender_state {
    use fairflip_core::{commit::Decommitment, Secret};

    mod sealed {
        pub trait Sealed {}

        impl Sealed for super::Initialized {}
        impl Sealed for super::Committed {}
        impl Sealed for super::Received {}
    }

    /// The sender's state.
    pub trait State: sealed::Sealed {}

    /// The sender's initial state.
    pub struct Initialized {
        pub(super) secret: Secret,
    }

    impl State for Initialized {}

    opaque_debug::implement!(Initialized);

    /// The sender's committed state.
    pub struct Committed {
        pub(super) decommitment: Decommitment<Secret>,
    }

    impl State for Committed {}

    opaque_debug::implement!(Committed);

    /// The sender's state after they've received the payload from the
    /// receiver.
    pub struct Received {
        pub(super) decommitment: Decommitment<Secret>,
    }

    impl State for Received {}

    opaque_debug::implement!(Received);
}
