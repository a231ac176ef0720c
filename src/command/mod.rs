//! command
//!
//! Run an external program to completion and capture what it did.
//!
//! # Contract
//!
//! - The child gets a closed stdin, so it can never block waiting for input.
//! - stdout and stderr are collected in full, byte for byte.
//! - A non-zero exit status is **data**, reported in [`InvocationResult`].
//! - The only errors are launch failures ([`CommandError`]): the program
//!   does not exist, cannot be executed, or the OS refused to spawn it.
//!
//! Calls block the current thread until the child exits. There is no
//! timeout and no cancellation; layer those on top if needed.
//!
//! # Example
//!
//! ```no_run
//! use mklr::call;
//!
//! let result = call!("git", "rev-parse", "--verify", "HEAD").unwrap();
//! if result.success() {
//!     print!("{}", result.output_str());
//! } else {
//!     eprint!("exit {}: {}", result.exit_code, result.errors_str());
//! }
//! ```

mod invocation;

pub use invocation::{call, Arg, CommandError, Invocation, InvocationResult};

/// Run a program with any number of arguments.
///
/// Each argument may be anything convertible into an [`Arg`]: strings,
/// paths, and integers are all accepted and passed in their textual form.
///
/// Expands to [`Invocation::run`], so it evaluates to
/// `Result<InvocationResult, CommandError>`.
///
/// ```no_run
/// use mklr::call;
/// use std::path::Path;
///
/// let result = call!("head", "-n", 5, Path::new("Cargo.toml")).unwrap();
/// assert_eq!(result.exit_code, 0);
/// ```
#[macro_export]
macro_rules! call {
    ($program:expr $(, $arg:expr)* $(,)?) => {
        $crate::command::Invocation::new($program)
            $(.arg($arg))*
            .run()
    };
}
