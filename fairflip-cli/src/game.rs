//! The interactive coin-flip session.

use std::io::{BufRead, Write};

use clap::Parser;
use fairflip_cointoss_core::{CointossConfig, Receiver, Sender};
use fairflip_core::{flip::Flip, Secret};
use tracing::info;

use crate::error::CliError;

const PROMPT_A: &str = "Player A - Enter your secret (hex or string): ";
const PROMPT_B: &str = "Player B - Enter your secret (hex or string): ";

/// Fair coin flip between two players using commit-reveal.
#[derive(Debug, Default, Parser)]
#[clap(name = "fairflip", version)]
pub(crate) struct Args {
    /// Player A's secret. Prompted for on stdin when omitted.
    #[clap(long, value_name = "SECRET")]
    pub(crate) secret_a: Option<String>,
    /// Player B's secret. Prompted for on stdin when omitted.
    #[clap(long, value_name = "SECRET")]
    pub(crate) secret_b: Option<String>,
    /// Secret Player A reveals instead of the committed one.
    #[clap(long, value_name = "SECRET")]
    pub(crate) reveal: Option<String>,
    /// Truncate secrets longer than 32 bytes instead of rejecting them.
    #[clap(long)]
    pub(crate) truncate: bool,
}

impl Args {
    fn config(&self) -> Result<CointossConfig, CliError> {
        let mut builder = CointossConfig::builder();
        if self.truncate {
            builder.truncate();
        }

        Ok(builder.build()?)
    }
}

/// Plays one coin flip, reading missing secrets from `input` and writing the
/// transcript to `output`.
pub(crate) fn run<R, W>(args: &Args, mut input: R, mut output: W) -> Result<Flip, CliError>
where
    R: BufRead,
    W: Write,
{
    let config = args.config()?;

    writeln!(output, "=== Fair Coinflip Simulator ===")?;

    let secret_a = read_secret(
        &mut input,
        &mut output,
        "Player A",
        PROMPT_A,
        args.secret_a.as_deref(),
    )?;

    let (sender, commitment) = Sender::new_with_config(config.clone(), secret_a).commit()?;
    writeln!(output, "Player A's commitment: {}", commitment.commitment)?;

    let secret_b = read_secret(
        &mut input,
        &mut output,
        "Player B",
        PROMPT_B,
        args.secret_b.as_deref(),
    )?;
    let (receiver, receiver_payload) =
        Receiver::new_with_config(config, secret_b).reveal(commitment)?;

    writeln!(output, "\n=== Reveal Phase ===")?;
    writeln!(output, "Player A reveals secret to verify commitment...")?;

    let (_, sender) = sender.receive(receiver_payload)?;
    let payload = match args.reveal.as_deref() {
        Some(reveal) => sender.finalize_with(Secret::parse(reveal)),
        None => sender.finalize(),
    };

    let flip = match receiver.finalize(payload) {
        Ok(flip) => flip,
        Err(err) => {
            if err.is_cheating() {
                writeln!(output, "Commitment mismatch! Player A is cheating.")?;
            }
            output.flush()?;
            return Err(err.into());
        }
    };

    writeln!(output, "\nFinal Hash: {}", flip.hash())?;
    writeln!(
        output,
        "Outcome: {} -> {}",
        flip.outcome().bit(),
        flip.outcome()
    )?;
    output.flush()?;

    info!(outcome = %flip.outcome(), "coin flip complete");

    Ok(flip)
}

fn read_secret<R, W>(
    input: &mut R,
    output: &mut W,
    player: &'static str,
    prompt: &str,
    provided: Option<&str>,
) -> Result<Secret, CliError>
where
    R: BufRead,
    W: Write,
{
    if let Some(secret) = provided {
        return Ok(Secret::parse(secret));
    }

    write!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(CliError::UnexpectedEof(player));
    }

    let line = line.strip_suffix('\n').unwrap_or(&line);
    let line = line.strip_suffix('\r').unwrap_or(line);

    Ok(Secret::parse(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EXIT_CHEATING, EXIT_FAILURE};
    use fairflip_cointoss_core::CointossError;
    use fairflip_core::{flip::Outcome, secret::SecretError};
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Cursor;

    const EXPECTED_ABC_XYZ: &str = concat!(
        "=== Fair Coinflip Simulator ===\n",
        "Player A - Enter your secret (hex or string): ",
        "Player A's commitment: 4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45\n",
        "Player B - Enter your secret (hex or string): ",
        "\n=== Reveal Phase ===\n",
        "Player A reveals secret to verify commitment...\n",
        "\nFinal Hash: 9619f01e17f589579d3b02522a1b4a3a5b1ade85e27eff89e18a409a144907e4\n",
        "Outcome: 0 -> Player A wins\n",
    );

    fn play(args: &Args, input: &str) -> (Result<Flip, CliError>, String) {
        let mut output = Vec::new();
        let result = run(args, Cursor::new(input.as_bytes()), &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[rstest]
    #[case::unix("abc\nxyz\n")]
    #[case::windows("abc\r\nxyz\r\n")]
    #[case::no_trailing_newline("abc\nxyz")]
    fn test_run_prompts(#[case] input: &str) {
        let (result, output) = play(&Args::default(), input);

        assert_eq!(result.unwrap().outcome(), Outcome::PlayerA);
        assert_eq!(output, EXPECTED_ABC_XYZ);
    }

    #[test]
    fn test_run_with_flags_skips_prompts() {
        let args = Args {
            secret_a: Some("abc".into()),
            secret_b: Some("xyz".into()),
            ..Default::default()
        };
        let (result, output) = play(&args, "");

        result.unwrap();
        assert!(!output.contains("Enter your secret"));
        assert!(output.contains("Outcome: 0 -> Player A wins"));
    }

    #[test]
    fn test_run_cheating() {
        let args = Args {
            reveal: Some("abd".into()),
            ..Default::default()
        };
        let (result, output) = play(&args, "abc\nxyz\n");

        let err = result.unwrap_err();
        assert_eq!(err.exit_code(), EXIT_CHEATING);
        assert!(output.ends_with("Commitment mismatch! Player A is cheating.\n"));
        assert!(!output.contains("Final Hash"));
    }

    #[test]
    fn test_run_eof() {
        let (result, _) = play(&Args::default(), "abc\n");

        let err = result.unwrap_err();
        assert!(matches!(err, CliError::UnexpectedEof("Player B")));
        assert_eq!(err.exit_code(), EXIT_FAILURE);
    }

    #[test]
    fn test_run_overlong_secret() {
        let long = "x".repeat(33);
        let input = format!("{long}\nxyz\n");

        let (result, output) = play(&Args::default(), &input);
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            CliError::Cointoss(CointossError::Secret(SecretError::TooLong { len: 33, .. }))
        ));
        assert_eq!(err.exit_code(), EXIT_FAILURE);
        assert!(!output.contains("commitment:"));
        assert!(!output.contains("Player B"));

        let args = Args {
            truncate: true,
            ..Default::default()
        };
        let (result, _) = play(&args, &input);
        result.unwrap();
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from([
            "fairflip",
            "--secret-a",
            "abc",
            "--reveal",
            "abd",
            "--truncate",
        ]);

        assert_eq!(args.secret_a.as_deref(), Some("abc"));
        assert_eq!(args.secret_b, None);
        assert_eq!(args.reveal.as_deref(), Some("abd"));
        assert!(args.truncate);
    }
}
