//! checkout command - Check out a branch

use anyhow::{Context as _, Result};

use super::{open_repo, print_json};
use crate::cli::Context;
use crate::core::types::BranchName;
use crate::repository::VersionControl;

/// Check out a branch, discarding working tree changes.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `branch` - Branch to check out
pub fn checkout<R: VersionControl>(ctx: &Context, branch: &str) -> Result<i32> {
    let branch = BranchName::new(branch).context("Invalid branch name")?;
    let mut repo: R = open_repo(ctx)?;

    repo.checkout(&branch)
        .with_context(|| format!("Failed to check out '{}'", branch))?;
    let commit = repo.head().context("Failed to resolve HEAD")?;

    if ctx.json {
        print_json(&commit)?;
    } else if !ctx.quiet {
        println!("Switched to '{}' at {}", branch, commit);
    }

    Ok(0)
}
