//! Data models for webhook signatures.
//!
//! This module contains the signature header value type, the serializable
//! signing result and the error taxonomy shared by signer and verifier.

pub mod error;
pub mod signature;

pub use error::*;
pub use signature::*;
