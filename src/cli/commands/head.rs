//! head command - Show the HEAD commit

use anyhow::{Context as _, Result};

use super::{open_repo, print_json};
use crate::cli::Context;
use crate::repository::VersionControl;

/// Print the commit HEAD points to as `<id> <summary>`.
pub fn head<R: VersionControl>(ctx: &Context) -> Result<i32> {
    let repo: R = open_repo(ctx)?;
    let commit = repo.head().context("Failed to resolve HEAD")?;

    if ctx.json {
        print_json(&commit)?;
    } else {
        println!("{} {}", commit.id, commit.summary);
    }

    Ok(0)
}
