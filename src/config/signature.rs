//! Webhook signature configuration.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::models::SignatureError;
use crate::services::{DEFAULT_TOLERANCE, Verifier};

/// Environment variable holding the shared webhook secret.
pub const SECRET_ENV: &str = "RELAE_WEBHOOK_SECRET";

/// Environment variable holding the tolerance window in seconds.
pub const TOLERANCE_ENV: &str = "RELAE_SIGNATURE_TOLERANCE";

/// Configuration for signing and verifying webhook payloads
#[derive(Clone, PartialEq, Eq)]
pub struct SignatureConfig {
    pub secret: String,
    pub tolerance_seconds: u64,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            tolerance_seconds: DEFAULT_TOLERANCE.as_secs(),
        }
    }
}

impl SignatureConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Self::default()
        }
    }

    pub fn with_tolerance_seconds(mut self, tolerance_seconds: u64) -> Self {
        self.tolerance_seconds = tolerance_seconds;
        self
    }

    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let secret = env::var(SECRET_ENV).unwrap_or_default();

        let tolerance_seconds = env::var(TOLERANCE_ENV)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TOLERANCE.as_secs());

        Self {
            secret,
            tolerance_seconds,
        }
    }

    /// Fail if no usable secret is configured.
    pub fn validate(&self) -> Result<(), SignatureError> {
        if self.secret.is_empty() {
            return Err(SignatureError::EmptySecret);
        }
        Ok(())
    }

    pub fn tolerance(&self) -> Duration {
        Duration::from_secs(self.tolerance_seconds)
    }

    pub fn verifier(&self) -> Verifier {
        Verifier::new(self.tolerance())
    }
}

impl fmt::Debug for SignatureConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secret = if self.secret.is_empty() {
            "<unset>"
        } else {
            "[REDACTED]"
        };
        f.debug_struct("SignatureConfig")
            .field("secret", &secret)
            .field("tolerance_seconds", &self.tolerance_seconds)
            .finish()
    }
}
