//! call command - Run a program and replay its output

use std::ffi::OsString;
use std::io::{self, Write};

use anyhow::{Context as _, Result};

use super::print_json;
use crate::cli::Context;
use crate::command::Invocation;

/// Run `command[0]` with the remaining elements as arguments.
///
/// Captured stdout and stderr are written to our own streams unchanged,
/// or printed as JSON with `--json`. The child's exit code is returned in
/// shell form (see [`shell_exit_code`]).
pub fn call(ctx: &Context, command: &[OsString]) -> Result<i32> {
    let (program, args) = command
        .split_first()
        .context("No program given")?;

    let result = Invocation::new(program.clone())
        .args(args.iter().cloned())
        .run()
        .with_context(|| format!("Failed to run {}", program.to_string_lossy()))?;

    if ctx.json {
        print_json(&result)?;
    } else {
        let mut stdout = io::stdout().lock();
        stdout.write_all(&result.output)?;
        stdout.flush()?;

        let mut stderr = io::stderr().lock();
        stderr.write_all(&result.errors)?;
        stderr.flush()?;
    }

    Ok(shell_exit_code(result.exit_code))
}

/// Map an invocation exit code to one a shell would report.
///
/// Signal deaths (negative codes) become `128 + signal`.
pub fn shell_exit_code(code: i32) -> i32 {
    if code < 0 {
        128 - code
    } else {
        code
    }
}
