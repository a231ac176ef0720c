//! core
//!
//! Shared domain types and configuration.
//!
//! # Modules
//!
//! - [`types`] - Strong types: BranchName, Oid
//! - [`config`] - Configuration schema and loading

pub mod config;
pub mod types;
