//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Calls the process invoker or the repository handle
//! 3. Formats and displays output
//!
//! Handlers return the process exit code. Repository handlers are generic
//! over [`VersionControl`] and dispatched with the git2-backed
//! [`Repository`].

mod branches;
mod call;
mod checkout;
mod clone;
mod head;

pub use branches::branches;
pub use call::{call, shell_exit_code};
pub use checkout::checkout;
pub use clone::clone;
pub use head::head;

use anyhow::{Context as _, Result};
use serde::Serialize;

use super::{Command, Context};
use crate::repository::{Repository, VersionControl};

/// Dispatch a parsed command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<i32> {
    match command {
        Command::Call { command } => call::call(ctx, &command),
        Command::Head => head::head::<Repository>(ctx),
        Command::Checkout { branch } => checkout::checkout::<Repository>(ctx, &branch),
        Command::Clone { target, branch } => {
            clone::clone::<Repository>(ctx, &target, branch.as_deref())
        }
        Command::Branches => branches::branches(ctx),
    }
}

/// Open the repository named by `--repo`.
fn open_repo<R: VersionControl>(ctx: &Context) -> Result<R> {
    R::open(&ctx.repo).with_context(|| format!("Failed to open repository at {}", ctx.repo.display()))
}

/// Print a value as pretty JSON on stdout.
fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}
