//! Evidence CLI Binary
//!
//! Resolves character ranges of an OCR structure to page regions and prints
//! the result as JSON on stdout. Logs go to stderr.

use clap::Parser;
use evidence_cli::{commands, Cli, Command};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries the JSON result, so logs must go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Command::Resolve(args) => {
            let report = commands::resolve(&args)?;
            print_json(&report, args.pretty)?;
        }
        Command::Validate(args) => {
            let report = commands::validate(&args.ocr)?;
            print_json(&report, true)?;
        }
    }

    Ok(())
}
