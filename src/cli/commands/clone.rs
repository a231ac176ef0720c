//! clone command - Clone the repository into a new location

use std::path::Path;

use anyhow::{Context as _, Result};
use serde::Serialize;

use super::{open_repo, print_json};
use crate::cli::Context;
use crate::core::types::BranchName;
use crate::repository::{Commit, VersionControl};

#[derive(Serialize)]
struct CloneOutput<'a> {
    target: &'a Path,
    branch: Option<&'a str>,
    head: Commit,
}

/// Clone `--repo` into `target`.
///
/// The branch comes from `--branch`, then from `clone.branch` in the
/// config file; with neither, the source's current branch is cloned.
pub fn clone<R: VersionControl>(ctx: &Context, target: &Path, branch: Option<&str>) -> Result<i32> {
    let branch = match branch {
        Some(name) => Some(BranchName::new(name).context("Invalid branch name")?),
        None => ctx.config.clone_branch(),
    };

    let source: R = open_repo(ctx)?;
    let cloned = source
        .clone_to(target, branch.as_ref())
        .with_context(|| format!("Failed to clone into {}", target.display()))?;
    let head = cloned.head().context("Failed to resolve HEAD of clone")?;

    if ctx.json {
        print_json(&CloneOutput {
            target,
            branch: branch.as_ref().map(BranchName::as_str),
            head,
        })?;
    } else if !ctx.quiet {
        println!("Cloned into {} at {}", target.display(), head);
    }

    Ok(0)
}
