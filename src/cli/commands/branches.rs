//! branches command - List local branches

use anyhow::{Context as _, Result};
use serde::Serialize;

use super::{open_repo, print_json};
use crate::cli::Context;
use crate::core::types::BranchName;
use crate::repository::Repository;

#[derive(Serialize)]
struct BranchesOutput {
    current: Option<BranchName>,
    branches: Vec<BranchName>,
}

/// List local branches, marking the current one with `*`.
pub fn branches(ctx: &Context) -> Result<i32> {
    let repo: Repository = open_repo(ctx)?;
    let mut branches = repo.list_branches().context("Failed to list branches")?;
    branches.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    let current = repo.current_branch().context("Failed to read HEAD")?;

    if ctx.json {
        print_json(&BranchesOutput { current, branches })?;
        return Ok(0);
    }

    for branch in &branches {
        let marker = if current.as_ref() == Some(branch) { "*" } else { " " };
        println!("{} {}", marker, branch);
    }

    Ok(0)
}
