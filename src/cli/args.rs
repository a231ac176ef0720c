//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--repo <path>`: Repository to operate on (default: `.`)
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--json`: Machine-readable output

use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// mklr - run commands and drive Git working copies
#[derive(Parser, Debug)]
#[command(name = "mklr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Repository to operate on
    #[arg(long, global = true, value_name = "PATH", default_value = ".")]
    pub repo: PathBuf,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true, conflicts_with = "debug")]
    pub quiet: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a program and exit with its exit code
    #[command(
        long_about = "Run a program to completion with a closed stdin.\n\n\
            Its stdout and stderr are captured and then written, unchanged, to \
            mklr's own stdout and stderr. mklr exits with the program's exit code. \
            With --json the captured result is printed as a JSON object instead.",
        after_help = "\
EXAMPLES:
    mklr call git --version
    mklr --json call sh -c 'echo out; echo err >&2; exit 3'"
    )]
    Call {
        /// Program to run (looked up on PATH), followed by its arguments
        #[arg(
            required = true,
            trailing_var_arg = true,
            allow_hyphen_values = true,
            value_name = "PROGRAM"
        )]
        command: Vec<OsString>,
    },

    /// Show the commit HEAD points to
    Head,

    /// Check out a branch, discarding local changes
    Checkout {
        /// Branch to check out
        branch: String,
    },

    /// Clone the repository into a new location
    Clone {
        /// Where to create the clone (missing or empty directory)
        target: PathBuf,

        /// Clone only this branch
        #[arg(short, long)]
        branch: Option<String>,
    },

    /// List local branches
    Branches,
}
