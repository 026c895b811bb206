//! Signature header model and its textual codec.
//!
//! Wire format: `t=<unix seconds>,v1=<64 lowercase hex chars>`, no whitespace.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::VerificationFailure;

/// HTTP header carrying the signature on deliveries from Relae.
pub const SIGNATURE_HEADER: &str = "X-Relae-Signature";

/// Header key for the signing timestamp.
pub const TIMESTAMP_KEY: &str = "t";

/// Header key for the HMAC-SHA256 signature.
pub const SIGNATURE_KEY: &str = "v1";

/// A parsed or freshly produced signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Seconds since the Unix epoch at signing time
    pub timestamp: u64,
    /// Hex-encoded digest exactly as carried in `v1`
    pub signature: String,
}

impl SignatureHeader {
    pub fn new(timestamp: u64, signature: impl Into<String>) -> Self {
        Self {
            timestamp,
            signature: signature.into(),
        }
    }

    /// Parse a header value.
    ///
    /// Key/value pairs may appear in any order and unknown keys are skipped, but `t` and
    /// `v1` must each appear exactly once.
    pub fn parse(header: &str) -> Result<Self, VerificationFailure> {
        if header.is_empty() {
            return Err(VerificationFailure::MalformedHeader(
                "header is empty".to_string(),
            ));
        }

        let mut timestamp = None;
        let mut signature = None;

        for pair in header.split(',') {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                VerificationFailure::MalformedHeader(format!("segment {pair:?} is not key=value"))
            })?;

            let slot = match key {
                TIMESTAMP_KEY => &mut timestamp,
                SIGNATURE_KEY => &mut signature,
                "" => {
                    return Err(VerificationFailure::MalformedHeader(
                        "segment has an empty key".to_string(),
                    ));
                }
                _ => continue,
            };

            if slot.replace(value).is_some() {
                return Err(VerificationFailure::MalformedHeader(format!(
                    "duplicate {key:?} field"
                )));
            }
        }

        let timestamp = timestamp.ok_or_else(|| {
            VerificationFailure::MalformedHeader("missing t field".to_string())
        })?;
        let signature = signature.ok_or_else(|| {
            VerificationFailure::MalformedHeader("missing v1 field".to_string())
        })?;

        Ok(Self {
            timestamp: parse_timestamp(timestamp)?,
            signature: signature.to_string(),
        })
    }
}

/// Parse `t` as canonical base-10 seconds.
///
/// Signs, leading zeros and anything outside the `i64` range are rejected so that a
/// timestamp has exactly one accepted spelling.
fn parse_timestamp(value: &str) -> Result<u64, VerificationFailure> {
    let invalid = |reason: &str| VerificationFailure::InvalidTimestamp(format!("{value:?} {reason}"));

    if value.is_empty() {
        return Err(invalid("is empty"));
    }
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("is not a decimal integer"));
    }
    if value.len() > 1 && value.starts_with('0') {
        return Err(invalid("has leading zeros"));
    }

    let timestamp: u64 = value.parse().map_err(|_| invalid("is out of range"))?;
    if i64::try_from(timestamp).is_err() {
        return Err(invalid("is out of range"));
    }

    Ok(timestamp)
}

impl fmt::Display for SignatureHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{TIMESTAMP_KEY}={},{SIGNATURE_KEY}={}",
            self.timestamp, self.signature
        )
    }
}

impl FromStr for SignatureHeader {
    type Err = VerificationFailure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Expanded result of signing a payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedPayload {
    pub timestamp: u64,
    pub signature: String,
    pub header: String,
}

impl From<SignatureHeader> for SignedPayload {
    fn from(header: SignatureHeader) -> Self {
        Self {
            header: header.to_string(),
            timestamp: header.timestamp,
            signature: header.signature,
        }
    }
}
