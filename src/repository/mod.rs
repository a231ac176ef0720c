//! repository
//!
//! A thin handle over a Git working copy.
//!
//! # Architecture
//!
//! This module is the only place that imports `git2`. Everything Git does
//! (refs, objects, checkout, transport) is delegated to libgit2; the handle
//! only picks the right calls and normalizes errors into
//! [`RepositoryError`].
//!
//! # Operations
//!
//! - [`Repository::open`] - bind to an existing repository (no discovery,
//!   no implicit init)
//! - [`Repository::checkout`] - point HEAD at a branch and hard-reset to it
//! - [`Repository::head`] - snapshot the HEAD commit as a [`Commit`]
//! - [`Repository::clone_to`] - clone into a new location, optionally a
//!   single branch
//!
//! The same four operations form the [`VersionControl`] capability trait.
//!
//! # Concurrency
//!
//! Nothing here locks. Mutating operations take `&mut self`; callers must
//! not run checkout or clone against the same location from two handles at
//! once.
//!
//! # Example
//!
//! ```ignore
//! use mklr::core::types::BranchName;
//! use mklr::repository::Repository;
//! use std::path::Path;
//!
//! let mut repo = Repository::open(Path::new("/srv/project"))?;
//! repo.checkout(&BranchName::new("release")?)?;
//! println!("{}", repo.head()?.id);
//!
//! let copy = repo.clone_to(Path::new("/tmp/release-copy"), None)?;
//! ```

mod commit;
mod handle;

use std::path::Path;

pub use commit::Commit;
pub use handle::{Repository, RepositoryError};

use crate::core::types::BranchName;

/// The version-control capabilities the crate relies on.
///
/// [`Repository`] implements this over libgit2. Code that only needs these
/// four operations should be written against the trait.
pub trait VersionControl: Sized {
    /// Error type for all operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Bind to the existing repository at `location`.
    fn open(location: &Path) -> Result<Self, Self::Error>;

    /// Make `branch` the active branch, discarding working tree changes.
    fn checkout(&mut self, branch: &BranchName) -> Result<(), Self::Error>;

    /// The commit HEAD currently resolves to.
    fn head(&self) -> Result<Commit, Self::Error>;

    /// Clone into `target`, optionally restricted to one branch.
    fn clone_to(&self, target: &Path, branch: Option<&BranchName>) -> Result<Self, Self::Error>;
}

impl VersionControl for Repository {
    type Error = RepositoryError;

    fn open(location: &Path) -> Result<Self, Self::Error> {
        Repository::open(location)
    }

    fn checkout(&mut self, branch: &BranchName) -> Result<(), Self::Error> {
        Repository::checkout(self, branch)
    }

    fn head(&self) -> Result<Commit, Self::Error> {
        Repository::head(self)
    }

    fn clone_to(&self, target: &Path, branch: Option<&BranchName>) -> Result<Self, Self::Error> {
        Repository::clone_to(self, target, branch)
    }
}
