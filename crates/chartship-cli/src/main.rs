//! Chartship - ChartMuseum resource for CI pipelines

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

mod commands;
mod error;
mod exit_codes;
mod io;
mod keyring;
mod package;
mod repos;
mod tools;

#[derive(Parser)]
#[command(name = "chartship")]
#[command(author = "Chartship Contributors")]
#[command(version)]
#[command(about = "ChartMuseum resource for CI pipelines", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover published versions of the tracked chart
    Check,

    /// Materialize one published version into a destination directory
    In {
        /// Destination directory
        destination: PathBuf,
    },

    /// Package, optionally sign, upload, and verify a new version
    Out {
        /// Build root the request's paths are relative to
        build_root: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let command = match dispatch_from_argv0() {
        Some(command) => command,
        None => Cli::parse().command,
    };

    let result = match command {
        Commands::Check => commands::check::run().await,
        Commands::In { destination } => commands::pull::run(&destination).await,
        Commands::Out { build_root } => commands::push::run(&build_root).await,
    };

    if let Err(err) = result {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

/// CI orchestrators install the resource as `/opt/resource/{check,in,out}`
/// symlinks; the program name then selects the operation directly.
fn dispatch_from_argv0() -> Option<Commands> {
    let mut args = std::env::args();
    let program = args.next()?;
    let stem = Path::new(&program).file_stem()?.to_str()?.to_string();

    match stem.as_str() {
        "check" => Some(Commands::Check),
        "in" | "out" => {
            let Some(directory) = args.next() else {
                eprintln!("usage: {} <directory>", stem);
                std::process::exit(exit_codes::INPUT_ERROR);
            };
            let directory = PathBuf::from(directory);
            if stem == "in" {
                Some(Commands::In {
                    destination: directory,
                })
            } else {
                Some(Commands::Out {
                    build_root: directory,
                })
            }
        }
        _ => None,
    }
}
