use std::ffi::OsString;

use clap::{Args, Parser, Subcommand};

/// Payload argument; `-` means raw stdin.
pub const STDIN_PAYLOAD: &str = "-";

#[derive(Args, Debug)]
pub struct SignArgs {
    /// Raw payload to sign, or `-` to read it from stdin
    pub payload: OsString,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Raw payload as received, or `-` to read it from stdin
    pub payload: OsString,

    /// Signature header value, e.g. `t=1700000000,v1=...`
    pub header: String,
}

#[derive(Subcommand, Debug)]
pub enum ToolSubcommand {
    /// Sign a payload and print timestamp, signature and header as JSON
    Sign(SignArgs),

    /// Verify a signature header against a payload
    Verify(VerifyArgs),
}

/// Sign and verify Relae webhook payloads.
///
/// The secret is read from RELAE_WEBHOOK_SECRET and the replay window (seconds)
/// from RELAE_SIGNATURE_TOLERANCE. Set LOG_FORMAT=json for JSON logs.
#[derive(Parser, Debug)]
#[command(about, long_about, version)]
pub struct ToolArgs {
    #[clap(subcommand)]
    pub subcommand: ToolSubcommand,
}
