//! Signing and verification services.
//!
//! Both services are stateless value types: they can be constructed per call or
//! shared freely across threads, and neither keeps the secret it is given.

pub mod signer;
pub mod verifier;

pub use signer::*;
pub use verifier::*;
