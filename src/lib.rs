//! mklr - run external commands and drive Git working copies
//!
//! mklr is a small utility layer with two independent facilities:
//!
//! - [`command`] - run a program to completion and capture its exit code,
//!   stdout, and stderr. A non-zero exit is reported as data, never raised.
//! - [`repository`] - a handle over a Git working copy with checkout,
//!   HEAD inspection, and (single-branch) clone, backed by libgit2.
//!
//! # Architecture
//!
//! - [`core`] - Strong types and configuration
//! - [`command`] - Process invocation
//! - [`repository`] - The only module that talks to `git2`
//! - [`cli`] - The `mklr` binary, a thin consumer of the above
//!
//! The two facilities never call each other. Every operation takes an
//! explicit path or handle; nothing depends on the process working
//! directory.
//!
//! # Example
//!
//! ```no_run
//! use mklr::call;
//! use mklr::core::types::BranchName;
//! use mklr::repository::Repository;
//! use std::path::Path;
//!
//! let result = call!("python3", "script.py", 42).unwrap();
//! println!("exit {}", result.exit_code);
//!
//! let mut repo = Repository::open(Path::new("/srv/project")).unwrap();
//! repo.checkout(&BranchName::new("branch1").unwrap()).unwrap();
//! println!("{}", repo.head().unwrap().message);
//! ```

pub mod cli;
pub mod command;
pub mod core;
pub mod repository;
