//! Configuration structures and loading utilities.
//!
//! This module contains the signature configuration, including environment
//! variable loading and default values.

pub mod signature;

pub use signature::*;
