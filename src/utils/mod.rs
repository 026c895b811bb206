//! Utility functions and helper modules.
//!
//! This module contains the MAC primitive, the signing-string builder and the
//! wall-clock helper shared by the signer and verifier.

pub mod hmac;
pub mod time;

pub use self::hmac::*;
pub use self::time::*;
