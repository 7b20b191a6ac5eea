//! Coin-flip protocol messages.

use serde::{Deserialize, Serialize};

use fairflip_core::{commit::Decommitment, Hash, Secret};

/// The sender's commitment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SenderCommitment {
    /// The commitment to the sender's secret.
    pub commitment: Hash,
}

/// The sender's payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SenderPayload {
    /// The decommitment to the sender's secret.
    pub decommitment: Decommitment<Secret>,
}

/// The receiver's payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiverPayload {
    /// The receiver's secret.
    pub secret: Secret,
}
