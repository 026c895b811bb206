//! Subcommand implementations for the `relae-signature` binary.

use std::ffi::OsString;
use std::io::{self, Read};

use relae_signature::{SignatureConfig, SignatureError, SignedPayload, Signer, VerificationFailure};
use tracing::{debug, info};

use crate::args::{STDIN_PAYLOAD, ToolSubcommand};

pub const EXIT_VALID: u8 = 0;
pub const EXIT_INVALID: u8 = 1;
pub const EXIT_ERROR: u8 = 2;

/// Failures that stop a command before it can produce an outcome
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error("Failed to read payload: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to serialize signature: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result of a successfully executed command
#[derive(Debug)]
pub enum Outcome {
    Signed(SignedPayload),
    Valid,
    Invalid(VerificationFailure),
}

impl Outcome {
    /// Text printed to stdout
    pub fn render(&self) -> Result<String, CommandError> {
        Ok(match self {
            Outcome::Signed(signed) => serde_json::to_string_pretty(signed)?,
            Outcome::Valid => "valid".to_string(),
            Outcome::Invalid(failure) => format!("invalid: {failure}"),
        })
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Signed(_) | Outcome::Valid => EXIT_VALID,
            Outcome::Invalid(_) => EXIT_INVALID,
        }
    }
}

/// Resolve the payload argument to raw bytes, reading `stdin` for `-`.
pub fn read_payload(payload: OsString, mut stdin: impl Read) -> io::Result<Vec<u8>> {
    if payload == STDIN_PAYLOAD {
        let mut buf = Vec::new();
        stdin.read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        Ok(payload.into_encoded_bytes())
    }
}

pub fn run(
    subcommand: ToolSubcommand,
    config: &SignatureConfig,
    stdin: impl Read,
) -> Result<Outcome, CommandError> {
    match subcommand {
        ToolSubcommand::Sign(args) => sign(config, &read_payload(args.payload, stdin)?),
        ToolSubcommand::Verify(args) => {
            verify(config, &read_payload(args.payload, stdin)?, &args.header)
        }
    }
}

pub fn sign(config: &SignatureConfig, payload: &[u8]) -> Result<Outcome, CommandError> {
    config.validate()?;

    let signed = Signer::new().sign_payload(payload, &config.secret)?;
    info!(timestamp = signed.timestamp, "payload signed");

    Ok(Outcome::Signed(signed))
}

pub fn verify(
    config: &SignatureConfig,
    payload: &[u8],
    header: &str,
) -> Result<Outcome, CommandError> {
    config.validate()?;

    match config.verifier().check(payload, header, &config.secret) {
        Ok(()) => Ok(Outcome::Valid),
        Err(VerificationFailure::Configuration(e)) => Err(e.into()),
        Err(failure) => {
            debug!(reason = failure.kind(), "verification failed");
            Ok(Outcome::Invalid(failure))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{SignArgs, VerifyArgs};
    use std::io::{Cursor, empty};

    const SECRET: &str = "whsec_test";
    const PAYLOAD: &[u8] = br#"{"event":"ping"}"#;

    fn config() -> SignatureConfig {
        SignatureConfig::new(SECRET)
    }

    #[test]
    fn test_sign_prints_signed_payload_json() {
        let outcome = sign(&config(), PAYLOAD).unwrap();
        assert_eq!(outcome.exit_code(), EXIT_VALID);

        let json: serde_json::Value = serde_json::from_str(&outcome.render().unwrap()).unwrap();
        let timestamp = json["timestamp"].as_u64().unwrap();
        let signature = json["signature"].as_str().unwrap();
        assert_eq!(signature.len(), 64);
        assert_eq!(
            json["header"].as_str().unwrap(),
            format!("t={timestamp},v1={signature}")
        );
    }

    #[test]
    fn test_verify_valid_header() {
        let header = Signer::new().sign(PAYLOAD, SECRET).unwrap().to_string();
        let outcome = verify(&config(), PAYLOAD, &header).unwrap();

        assert_eq!(outcome.render().unwrap(), "valid");
        assert_eq!(outcome.exit_code(), EXIT_VALID);
    }

    #[test]
    fn test_verify_stale_header() {
        let header = Signer::new()
            .sign_at(PAYLOAD, SECRET, 1_000)
            .unwrap()
            .to_string();
        let outcome = verify(&config(), PAYLOAD, &header).unwrap();

        assert!(matches!(
            outcome,
            Outcome::Invalid(VerificationFailure::StaleSignature { .. })
        ));
        assert!(outcome.render().unwrap().starts_with("invalid: Signature is "));
        assert_eq!(outcome.exit_code(), EXIT_INVALID);
    }

    #[test]
    fn test_verify_forged_header() {
        let header = Signer::new()
            .sign(PAYLOAD, "whsec_other")
            .unwrap()
            .to_string();
        let outcome = verify(&config(), PAYLOAD, &header).unwrap();

        assert_eq!(
            outcome.render().unwrap(),
            "invalid: Signature does not match payload"
        );
        assert_eq!(outcome.exit_code(), EXIT_INVALID);
    }

    #[test]
    fn test_verify_malformed_header() {
        let outcome = verify(&config(), PAYLOAD, "garbage").unwrap();
        assert!(matches!(
            outcome,
            Outcome::Invalid(VerificationFailure::MalformedHeader(_))
        ));
        assert_eq!(outcome.exit_code(), EXIT_INVALID);
    }

    #[test]
    fn test_empty_secret_is_an_error() {
        let config = SignatureConfig::default();

        assert!(matches!(
            sign(&config, PAYLOAD),
            Err(CommandError::Signature(SignatureError::EmptySecret))
        ));
        assert!(matches!(
            verify(&config, PAYLOAD, "t=1,v1=abc"),
            Err(CommandError::Signature(SignatureError::EmptySecret))
        ));
    }

    #[test]
    fn test_read_payload_from_stdin() {
        let payload = read_payload(OsString::from("-"), Cursor::new(vec![b'x', 0xff])).unwrap();
        assert_eq!(payload, vec![b'x', 0xff]);
    }

    #[test]
    fn test_read_payload_from_argument() {
        let payload = read_payload(OsString::from("hello"), empty()).unwrap();
        assert_eq!(payload, b"hello".to_vec());
    }

    #[test]
    fn test_run_verify_reads_stdin() {
        let header = Signer::new().sign(PAYLOAD, SECRET).unwrap().to_string();
        let subcommand = ToolSubcommand::Verify(VerifyArgs {
            payload: OsString::from("-"),
            header,
        });

        let outcome = run(subcommand, &config(), Cursor::new(PAYLOAD.to_vec())).unwrap();
        assert!(matches!(outcome, Outcome::Valid));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_sign_non_utf8_argument() {
        use std::os::unix::ffi::OsStringExt;

        let raw = vec![b'a', b'b', 0xff];
        let subcommand = ToolSubcommand::Sign(SignArgs {
            payload: OsString::from_vec(raw.clone()),
        });

        let Outcome::Signed(signed) = run(subcommand, &config(), empty()).unwrap() else {
            panic!("expected a signed payload");
        };

        let outcome = verify(&config(), &raw, &signed.header).unwrap();
        assert!(matches!(outcome, Outcome::Valid));
    }
}
