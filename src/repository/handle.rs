//! repository::handle
//!
//! The [`Repository`] handle and its errors.
//!
//! # Error Handling
//!
//! git2 errors are normalized into typed variants:
//! - [`RepositoryError::NotARepo`]: nothing to open at the location
//! - [`RepositoryError::BranchNotFound`]: no local branch with that name
//! - [`RepositoryError::InvalidTarget`]: clone target unusable
//! - [`RepositoryError::UnbornHead`]: HEAD has no commit yet

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use git2::build::{CheckoutBuilder, RepoBuilder};
use thiserror::Error;
use tracing::debug;

use super::Commit;
use crate::core::types::{BranchName, TypeError};

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No repository at the given location.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The location that was opened
        path: PathBuf,
    },

    /// The operation needs a working tree and the repository is bare.
    #[error("bare repository has no working tree: {path}")]
    BareRepo {
        /// The repository location
        path: PathBuf,
    },

    /// HEAD points at a branch with no commits.
    #[error("HEAD does not point to a commit yet")]
    UnbornHead,

    /// The branch does not exist.
    #[error("branch not found: {branch}")]
    BranchNotFound {
        /// The requested branch
        branch: String,
    },

    /// The clone target cannot receive a new repository.
    #[error("invalid clone target {path}: {reason}")]
    InvalidTarget {
        /// The requested target
        path: PathBuf,
        /// Why it was refused
        reason: String,
    },

    /// A name or id read from Git failed validation.
    #[error(transparent)]
    InvalidValue(#[from] TypeError),

    /// Any other libgit2 failure.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl RepositoryError {
    fn from_git2(err: git2::Error, context: &str) -> Self {
        RepositoryError::Internal {
            message: format!("{}: {}", context, err.message()),
        }
    }

    fn invalid_target(path: &Path, reason: impl Into<String>) -> Self {
        RepositoryError::InvalidTarget {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// A Git working copy at a known location.
///
/// Holds the location it was opened at and an open libgit2 handle. The
/// handle is released on drop.
pub struct Repository {
    location: PathBuf,
    repo: git2::Repository,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("location", &self.location)
            .field("git_dir", &self.repo.path())
            .finish()
    }
}

impl Repository {
    // =========================================================================
    // Opening
    // =========================================================================

    /// Open the repository at `location`.
    ///
    /// `location` must itself be a repository (its working directory or its
    /// git directory). Parent directories are not searched and nothing is
    /// initialized.
    ///
    /// # Errors
    ///
    /// - [`RepositoryError::NotARepo`] if there is no repository there
    pub fn open(location: &Path) -> Result<Self, RepositoryError> {
        let repo = git2::Repository::open(location).map_err(|e| {
            debug!(path = %location.display(), error = %e.message(), "open failed");
            RepositoryError::NotARepo {
                path: location.to_path_buf(),
            }
        })?;

        Ok(Self {
            location: location.to_path_buf(),
            repo,
        })
    }

    /// The location this handle was opened at.
    pub fn location(&self) -> &Path {
        &self.location
    }

    // =========================================================================
    // Checkout and HEAD
    // =========================================================================

    /// Check out `branch`, discarding local changes.
    ///
    /// Index and working tree are force-checked-out to that branch's commit,
    /// then HEAD becomes `refs/heads/<branch>`. Modifications to tracked files
    /// are lost; untracked files are left alone. Checking out the branch
    /// that is already active is a no-op apart from the reset.
    ///
    /// # Errors
    ///
    /// - [`RepositoryError::BranchNotFound`] if there is no such local branch
    /// - [`RepositoryError::BareRepo`] if there is no working tree
    pub fn checkout(&mut self, branch: &BranchName) -> Result<(), RepositoryError> {
        if self.repo.is_bare() {
            return Err(RepositoryError::BareRepo {
                path: self.location.clone(),
            });
        }

        let refname = branch.ref_name();
        let target = self
            .repo
            .find_reference(&refname)
            .and_then(|reference| reference.peel_to_commit())
            .map_err(|e| match e.code() {
                git2::ErrorCode::NotFound => RepositoryError::BranchNotFound {
                    branch: branch.to_string(),
                },
                _ => RepositoryError::from_git2(e, &refname),
            })?;

        // Tree first: if it fails, HEAD still names the old branch.
        let mut checkout = CheckoutBuilder::new();
        checkout.force();
        self.repo
            .checkout_tree(target.as_object(), Some(&mut checkout))
            .map_err(|e| RepositoryError::from_git2(e, "checkout"))?;

        self.repo
            .set_head(&refname)
            .map_err(|e| RepositoryError::from_git2(e, &refname))?;

        debug!(branch = %branch, commit = %target.id(), "checked out");
        Ok(())
    }

    /// Snapshot the commit HEAD resolves to.
    ///
    /// # Errors
    ///
    /// - [`RepositoryError::UnbornHead`] if the current branch has no commits
    pub fn head(&self) -> Result<Commit, RepositoryError> {
        let head = self.repo.head().map_err(|e| match e.code() {
            git2::ErrorCode::UnbornBranch => RepositoryError::UnbornHead,
            _ => RepositoryError::from_git2(e, "HEAD"),
        })?;

        let commit = head
            .peel_to_commit()
            .map_err(|e| RepositoryError::from_git2(e, "HEAD"))?;

        Ok(Commit::from_git2(&commit)?)
    }

    // =========================================================================
    // Branches
    // =========================================================================

    /// The branch HEAD points to, or `None` when detached or unborn.
    pub fn current_branch(&self) -> Result<Option<BranchName>, RepositoryError> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return Ok(None),
            Err(e) => return Err(RepositoryError::from_git2(e, "HEAD")),
        };

        if !head.is_branch() {
            return Ok(None);
        }
        match head.shorthand() {
            Some(name) => Ok(Some(BranchName::new(name)?)),
            None => Ok(None),
        }
    }

    /// All local branches, in the order libgit2 lists them.
    ///
    /// Branches whose names are not valid UTF-8 are skipped.
    pub fn list_branches(&self) -> Result<Vec<BranchName>, RepositoryError> {
        let branches = self
            .repo
            .branches(Some(git2::BranchType::Local))
            .map_err(|e| RepositoryError::from_git2(e, "list branches"))?;

        let mut names = Vec::new();
        for branch in branches {
            let (branch, _) = branch.map_err(|e| RepositoryError::from_git2(e, "list branches"))?;
            if let Some(name) = branch.name().ok().flatten() {
                names.push(BranchName::new(name)?);
            }
        }

        Ok(names)
    }

    /// Whether a local branch with this name exists.
    pub fn branch_exists(&self, branch: &BranchName) -> bool {
        self.repo
            .find_branch(branch.as_str(), git2::BranchType::Local)
            .is_ok()
    }

    // =========================================================================
    // Clone
    // =========================================================================

    /// Clone this repository into `target` and open the clone.
    ///
    /// With `branch`, only that branch is fetched and it becomes the
    /// clone's active branch. Without it, the clone checks out whatever
    /// branch this repository's HEAD points to. This repository is only
    /// read.
    ///
    /// `target` may be missing or an empty directory.
    ///
    /// # Errors
    ///
    /// - [`RepositoryError::InvalidTarget`] if `target` already holds a
    ///   repository, is a non-empty directory, is not a directory, or
    ///   cannot be written
    /// - [`RepositoryError::BranchNotFound`] if `branch` is not a local
    ///   branch of this repository
    pub fn clone_to(
        &self,
        target: &Path,
        branch: Option<&BranchName>,
    ) -> Result<Repository, RepositoryError> {
        check_clone_target(target)?;

        if let Some(branch) = branch {
            if !self.branch_exists(branch) {
                return Err(RepositoryError::BranchNotFound {
                    branch: branch.to_string(),
                });
            }
        }

        let source = self.location.to_str().ok_or_else(|| RepositoryError::Internal {
            message: format!("source path is not valid UTF-8: {}", self.location.display()),
        })?;

        let mut builder = RepoBuilder::new();
        if let Some(branch) = branch {
            let name = branch.as_str().to_string();
            builder.branch(&name);
            builder.remote_create(move |repo, remote, url| {
                let refspec = format!("+refs/heads/{name}:refs/remotes/{remote}/{name}");
                repo.remote_with_fetch(remote, url, &refspec)
            });
        }

        debug!(
            source = %self.location.display(),
            target = %target.display(),
            branch = branch.map(BranchName::as_str),
            "cloning"
        );

        builder.clone(source, target).map_err(|e| match e.class() {
            git2::ErrorClass::Os | git2::ErrorClass::Filesystem => {
                RepositoryError::invalid_target(target, e.message())
            }
            _ => RepositoryError::from_git2(e, "clone"),
        })?;

        Repository::open(target)
    }
}

/// Refuse targets Git would refuse, before any transport work starts.
fn check_clone_target(target: &Path) -> Result<(), RepositoryError> {
    if git2::Repository::open(target).is_ok() {
        return Err(RepositoryError::invalid_target(
            target,
            "already contains a repository",
        ));
    }

    match fs::metadata(target) {
        Ok(meta) if !meta.is_dir() => Err(RepositoryError::invalid_target(
            target,
            "exists and is not a directory",
        )),
        Ok(_) => {
            let mut entries = fs::read_dir(target)
                .map_err(|e| RepositoryError::invalid_target(target, e.to_string()))?;
            if entries.next().is_some() {
                Err(RepositoryError::invalid_target(
                    target,
                    "directory is not empty",
                ))
            } else {
                Ok(())
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(RepositoryError::invalid_target(target, e.to_string())),
    }
}
