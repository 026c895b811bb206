//! Error types for signing and verification.

/// Fatal conditions that indicate misconfiguration rather than a bad message.
///
/// These are the only failures surfaced as `Err` from `sign` and `verify`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("Webhook secret is missing or empty")]
    EmptySecret,

    #[error("System time error: {0}")]
    Clock(String),
}

/// Reason a signature header was not accepted.
///
/// The boolean `verify` API collapses all of these to `false`; `Verifier::check`
/// reports them for logging and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationFailure {
    #[error("Malformed signature header: {0}")]
    MalformedHeader(String),

    #[error("Invalid signature timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Signature does not match payload")]
    SignatureMismatch,

    #[error("Signature is {age_seconds}s old (tolerance: {tolerance_seconds}s)")]
    StaleSignature {
        age_seconds: u64,
        tolerance_seconds: u64,
    },

    #[error(transparent)]
    Configuration(#[from] SignatureError),
}

impl VerificationFailure {
    /// Short machine-friendly label for log fields
    pub fn kind(&self) -> &'static str {
        match self {
            VerificationFailure::MalformedHeader(_) => "malformed_header",
            VerificationFailure::InvalidTimestamp(_) => "invalid_timestamp",
            VerificationFailure::SignatureMismatch => "signature_mismatch",
            VerificationFailure::StaleSignature { .. } => "stale_signature",
            VerificationFailure::Configuration(_) => "configuration",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_signature_message() {
        let failure = VerificationFailure::StaleSignature {
            age_seconds: 400,
            tolerance_seconds: 300,
        };
        assert_eq!(
            failure.to_string(),
            "Signature is 400s old (tolerance: 300s)"
        );
        assert_eq!(failure.kind(), "stale_signature");
    }

    #[test]
    fn test_configuration_error_is_transparent() {
        let failure = VerificationFailure::from(SignatureError::EmptySecret);
        assert_eq!(failure.to_string(), "Webhook secret is missing or empty");
        assert_eq!(failure.kind(), "configuration");
    }
}
