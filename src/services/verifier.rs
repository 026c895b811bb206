//! Inbound signature verification.
//!
//! A header is accepted only when it parses, its digest matches the payload under the
//! shared secret, and its timestamp lies within the tolerance window of the current time.
//! The digest and freshness results are both computed before either is acted on, so a
//! stale header costs the same as a forged one.

use std::time::Duration;

use tracing::debug;

use crate::{
    models::{SignatureError, SignatureHeader, VerificationFailure},
    utils::{compute_signature, constant_time_eq, unix_now},
};

/// Default replay window: 5 minutes.
pub const DEFAULT_TOLERANCE: Duration = Duration::from_secs(300);

/// Signature verifier holding only the replay tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verifier {
    tolerance: Duration,
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

impl Verifier {
    /// Create a verifier accepting headers up to `tolerance` old (or in the future).
    ///
    /// Only whole seconds count.
    pub const fn new(tolerance: Duration) -> Self {
        Self { tolerance }
    }

    pub const fn tolerance(&self) -> Duration {
        self.tolerance
    }

    /// Verify against the current time.
    ///
    /// Returns `Ok(false)` for every malformed, forged or stale header. `Err` means the
    /// secret itself is unusable.
    pub fn verify(
        &self,
        raw_body: impl AsRef<[u8]>,
        header: &str,
        secret: impl AsRef<[u8]>,
    ) -> Result<bool, SignatureError> {
        self.verify_at(raw_body, header, secret, unix_now()?)
    }

    /// Verify as of `now` (Unix seconds).
    pub fn verify_at(
        &self,
        raw_body: impl AsRef<[u8]>,
        header: &str,
        secret: impl AsRef<[u8]>,
        now: u64,
    ) -> Result<bool, SignatureError> {
        match self.check_at(raw_body, header, secret, now) {
            Ok(()) => Ok(true),
            Err(VerificationFailure::Configuration(e)) => Err(e),
            Err(_) => Ok(false),
        }
    }

    /// Like [`Verifier::verify`], but reports why a header was rejected.
    pub fn check(
        &self,
        raw_body: impl AsRef<[u8]>,
        header: &str,
        secret: impl AsRef<[u8]>,
    ) -> Result<(), VerificationFailure> {
        self.check_at(raw_body, header, secret, unix_now()?)
    }

    /// Like [`Verifier::verify_at`], but reports why a header was rejected.
    ///
    /// When a header is both forged and stale, the mismatch is reported.
    pub fn check_at(
        &self,
        raw_body: impl AsRef<[u8]>,
        header: &str,
        secret: impl AsRef<[u8]>,
        now: u64,
    ) -> Result<(), VerificationFailure> {
        let result = self.evaluate(raw_body.as_ref(), header, secret.as_ref(), now);
        if let Err(failure) = &result {
            debug!(
                reason = failure.kind(),
                error = %failure,
                "webhook signature rejected"
            );
        }
        result
    }

    fn evaluate(
        &self,
        raw_body: &[u8],
        header: &str,
        secret: &[u8],
        now: u64,
    ) -> Result<(), VerificationFailure> {
        if secret.is_empty() {
            return Err(SignatureError::EmptySecret.into());
        }

        let header = SignatureHeader::parse(header)?;

        let expected = compute_signature(secret, header.timestamp, raw_body)?;
        let digest_matches = constant_time_eq(expected.as_bytes(), header.signature.as_bytes());

        let age_seconds = now.abs_diff(header.timestamp);
        let tolerance_seconds = self.tolerance.as_secs();
        let fresh = age_seconds <= tolerance_seconds;

        match (digest_matches, fresh) {
            (true, true) => Ok(()),
            (false, _) => Err(VerificationFailure::SignatureMismatch),
            (true, false) => Err(VerificationFailure::StaleSignature {
                age_seconds,
                tolerance_seconds,
            }),
        }
    }
}

/// Verify `header` over `raw_body` with `secret`, allowing `tolerance` of clock skew or age.
pub fn verify(
    raw_body: impl AsRef<[u8]>,
    header: &str,
    secret: impl AsRef<[u8]>,
    tolerance: Duration,
) -> Result<bool, SignatureError> {
    Verifier::new(tolerance).verify(raw_body, header, secret)
}
