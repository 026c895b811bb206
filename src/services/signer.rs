//! Outbound payload signing.

use tracing::trace;

use crate::{
    models::{SignatureError, SignatureHeader, SignedPayload},
    utils::{compute_signature, unix_now},
};

/// Stateless signer.
///
/// Holds no key material; the secret is borrowed for the duration of each call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signer;

impl Signer {
    pub const fn new() -> Self {
        Self
    }

    /// Sign `payload` with the current Unix time.
    pub fn sign(
        &self,
        payload: impl AsRef<[u8]>,
        secret: impl AsRef<[u8]>,
    ) -> Result<SignatureHeader, SignatureError> {
        self.sign_at(payload, secret, unix_now()?)
    }

    /// Sign `payload` as of `timestamp`. Identical inputs always produce identical headers.
    pub fn sign_at(
        &self,
        payload: impl AsRef<[u8]>,
        secret: impl AsRef<[u8]>,
        timestamp: u64,
    ) -> Result<SignatureHeader, SignatureError> {
        let signature = compute_signature(secret.as_ref(), timestamp, payload.as_ref())?;
        trace!(timestamp, payload_len = payload.as_ref().len(), "signed payload");
        Ok(SignatureHeader::new(timestamp, signature))
    }

    /// Like [`Signer::sign`], returning timestamp, signature and header together.
    pub fn sign_payload(
        &self,
        payload: impl AsRef<[u8]>,
        secret: impl AsRef<[u8]>,
    ) -> Result<SignedPayload, SignatureError> {
        self.sign(payload, secret).map(SignedPayload::from)
    }
}

/// Sign `payload` with `secret` at the current time.
pub fn sign(
    payload: impl AsRef<[u8]>,
    secret: impl AsRef<[u8]>,
) -> Result<SignatureHeader, SignatureError> {
    Signer::new().sign(payload, secret)
}
