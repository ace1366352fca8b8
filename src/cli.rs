use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Schema-driven simulation-to-NetCDF converter.
#[derive(Parser)]
#[command(
    name = "geonc",
    version,
    about = "Write NetCDF metadata and data from a JSON schema"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Write dimensions, variables and attributes into a NetCDF file.
    Define(DefineArgs),
    /// Load and validate a schema without writing anything.
    Check(CheckArgs),
}

/// Arguments for the `define` subcommand.
#[derive(clap::Args)]
pub struct DefineArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "geonc.toml")]
    pub config: PathBuf,

    /// Override schema JSON path from config.
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    /// Override output NetCDF path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override file mode from config (read, write, replace, new).
    #[arg(short, long)]
    pub mode: Option<String>,
}

/// Arguments for the `check` subcommand.
#[derive(clap::Args)]
pub struct CheckArgs {
    /// Path to the schema JSON file.
    #[arg(short, long)]
    pub schema: PathBuf,
}
