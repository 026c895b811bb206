//! Relae webhook signatures
//!
//! Timestamped HMAC-SHA256 signatures for webhook payloads:
//! - the sender signs the raw body and ships `t=<unix seconds>,v1=<hex digest>`
//!   (usually in the `X-Relae-Signature` header)
//! - the receiver recomputes the digest over `"{t}.{body}"`, compares it in constant
//!   time and rejects anything older than the tolerance window (default 300 seconds)
//!
//! ## Architecture
//!
//! - `utils/` - HMAC primitive, signing string, constant-time comparison, clock
//! - `models/` - Signature header codec and error types
//! - `services/` - Stateless `Signer` and `Verifier`
//! - `config/` - Environment-based configuration
//!
//! ## Quick Start
//!
//! ```
//! use std::time::Duration;
//! use relae_signature::{sign, verify};
//!
//! let body = br#"{"event":"ping"}"#;
//! let header = sign(body, "whsec_test").unwrap().to_string();
//!
//! assert!(verify(body, &header, "whsec_test", Duration::from_secs(300)).unwrap());
//! assert!(!verify(b"tampered", &header, "whsec_test", Duration::from_secs(300)).unwrap());
//! ```

pub mod config;
pub mod models;
pub mod services;
pub mod utils;

pub use config::SignatureConfig;
pub use models::{
    SIGNATURE_HEADER, SignatureError, SignatureHeader, SignedPayload, VerificationFailure,
};
pub use services::{DEFAULT_TOLERANCE, Signer, Verifier, sign, verify};
pub use utils::hmac as hmac_utils;
