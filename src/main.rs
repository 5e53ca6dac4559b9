use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod auth;
mod cli;

use cli::select::{select_auth, SelectOptions};

/// Select the registry credential that applies to a container image.
///
/// Reads the auth file named by --authfile or $AUTHFILE (default
/// ~/.docker/config.json) and prints a minimal `{"auths": {...}}` document
/// holding only the most specific matching entry.
#[derive(Parser, Debug)]
#[command(author, disable_version_flag = true)]
pub struct Cli {
    /// Image reference (e.g., quay.io/org/app:v1.0, docker.io/library/debian@sha256:...)
    image_ref: Option<String>,
    /// Auth file to read instead of $AUTHFILE or ~/.docker/config.json
    #[arg(long, value_name = "PATH")]
    authfile: Option<PathBuf>,
    /// Key the selected entry by the image's registry host
    #[arg(long)]
    registry_key: bool,
    /// Print version
    #[arg(long, short = 'V')]
    version: bool,
}

fn main() -> Result<()> {
    // stdout carries the selected auth, logs go to stderr
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let stdout = std::io::stdout();
    run(&cli, &mut stdout.lock())
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    if cli.version {
        writeln!(out, "{}", env!("CARGO_PKG_VERSION"))?;
        return Ok(());
    }

    match &cli.image_ref {
        Some(image_ref) => select_auth(
            &SelectOptions {
                image_ref,
                authfile: cli.authfile.as_deref(),
                registry_key: cli.registry_key,
            },
            out,
        ),
        None => {
            // No image given: show usage and exit successfully
            write!(out, "{}", Cli::command().render_help())?;
            Ok(())
        }
    }
}
