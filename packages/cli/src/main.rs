mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    apply, blocks, check, init, inspect, ui, ApplyArgs, BlocksArgs, CheckArgs, InitArgs,
    InspectArgs, UiArgs,
};
use tracing_subscriber::EnvFilter;

/// Sitecraft CLI - edit website block trees from the command line
#[derive(Parser, Debug)]
#[command(name = "sitecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Sitecraft project
    Init(InitArgs),

    /// List block types, or print a new block as JSON
    Blocks(BlocksArgs),

    /// Print a document's block outline
    Inspect(InspectArgs),

    /// Apply a JSON list of mutations to a document
    Apply(ApplyArgs),

    /// Validate documents
    Check(CheckArgs),

    /// Show or change persisted editor UI state
    Ui(UiArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("SITECRAFT_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Blocks(args) => blocks(args, &cwd),
        Command::Inspect(args) => inspect(args, &cwd),
        Command::Apply(args) => apply(args, &cwd),
        Command::Check(args) => check(args, &cwd),
        Command::Ui(args) => ui(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
