use fairflip_cointoss_core::{CointossConfigBuilderError, CointossError};

/// Exit status for a sender whose reveal did not open its commitment.
pub(crate) const EXIT_CHEATING: u8 = 1;
/// Exit status for every other failure.
pub(crate) const EXIT_FAILURE: u8 = 2;

#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("input ended before {0}'s secret was entered")]
    UnexpectedEof(&'static str),
    #[error(transparent)]
    Cointoss(#[from] CointossError),
    #[error("invalid configuration: {0}")]
    Config(#[from] CointossConfigBuilderError),
}

impl CliError {
    pub(crate) fn exit_code(&self) -> u8 {
        match self {
            Self::Cointoss(err) if err.is_cheating() => EXIT_CHEATING,
            _ => EXIT_FAILURE,
        }
    }
}
