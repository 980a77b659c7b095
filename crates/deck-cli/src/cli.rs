use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    name = "pimdeck",
    version,
    about = "pimdeck - Check, inspect and normalize input decks for path-integral molecular dynamics runs.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a deck and run every semantic check, reporting all violations.
    Check(CheckArgs),
    /// Print a summary of a deck, or its full model as JSON.
    Show(ShowArgs),
    /// Re-emit a deck in normalized form, defaults spelled out.
    Fmt(FmtArgs),
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the input deck.
    #[arg(required = true, value_name = "PATH")]
    pub input: PathBuf,
}

/// Arguments for the `show` subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Path to the input deck.
    #[arg(required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Dump the parsed model as pretty-printed JSON instead of a summary.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `fmt` subcommand.
#[derive(Args, Debug)]
pub struct FmtArgs {
    /// Path to the input deck.
    #[arg(required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the normalized deck; written to stdout when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Refuse to format a deck that fails semantic validation.
    #[arg(long)]
    pub strict: bool,
}
