use std::env;
use std::io;
use std::process::ExitCode;

use clap::Parser;
use relae_signature::SignatureConfig;
use tracing::error;
use tracing_subscriber::EnvFilter;

use self::args::ToolArgs;
use self::commands::EXIT_ERROR;

mod args;
mod commands;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let json = env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> ExitCode {
    let args = ToolArgs::parse();
    init_tracing();

    let config = SignatureConfig::from_env();
    let rendered = commands::run(args.subcommand, &config, io::stdin().lock())
        .and_then(|outcome| Ok((outcome.render()?, outcome.exit_code())));

    match rendered {
        Ok((output, code)) => {
            println!("{output}");
            ExitCode::from(code)
        }
        Err(e) => {
            error!(error = %e, "relae-signature failed");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
