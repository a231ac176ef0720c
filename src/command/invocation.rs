//! command::invocation
//!
//! The [`Invocation`] builder, its [`InvocationResult`], and launch errors.

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, trace};

/// Failures to launch a program.
///
/// A program that starts and then exits non-zero is not an error; see
/// [`InvocationResult::exit_code`].
#[derive(Debug, Error)]
pub enum CommandError {
    /// The OS could not locate the program.
    #[error("command not found: {program}")]
    NotFound {
        /// The program as given by the caller
        program: String,
    },

    /// The program exists but may not be executed.
    #[error("command is not executable: {program}")]
    NotExecutable {
        /// The program as given by the caller
        program: String,
    },

    /// Any other spawn or wait failure.
    #[error("failed to run {program}: {source}")]
    Spawn {
        /// The program as given by the caller
        program: String,
        /// The underlying OS error
        #[source]
        source: io::Error,
    },
}

impl CommandError {
    fn from_io(err: io::Error, program: &OsStr) -> Self {
        let program = program.to_string_lossy().into_owned();
        match err.kind() {
            io::ErrorKind::NotFound => CommandError::NotFound { program },
            io::ErrorKind::PermissionDenied => CommandError::NotExecutable { program },
            _ => CommandError::Spawn {
                program,
                source: err,
            },
        }
    }
}

/// The outcome of a program that ran to completion.
///
/// Immutable once produced. `output` and `errors` hold exactly the bytes
/// the child wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationResult {
    /// Exit status. On Unix, a child killed by signal `n` reports `-n`.
    pub exit_code: i32,
    /// Everything the child wrote to stdout
    pub output: Vec<u8>,
    /// Everything the child wrote to stderr
    pub errors: Vec<u8>,
}

impl InvocationResult {
    /// Whether the child exited with status 0.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// stdout as text, with invalid UTF-8 replaced.
    pub fn output_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.output)
    }

    /// stderr as text, with invalid UTF-8 replaced.
    pub fn errors_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.errors)
    }
}

/// Text view of a result, used for machine-readable output.
impl Serialize for InvocationResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut s = serializer.serialize_struct("InvocationResult", 3)?;
        s.serialize_field("exit_code", &self.exit_code)?;
        s.serialize_field("output", &self.output_str())?;
        s.serialize_field("errors", &self.errors_str())?;
        s.end()
    }
}

/// One command-line argument in its textual form.
///
/// Exists so that [`call!`](crate::call) can take strings, paths, and
/// numbers side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg(OsString);

impl Arg {
    /// Build an argument from anything with a textual representation.
    pub fn display(value: impl std::fmt::Display) -> Self {
        Self(OsString::from(value.to_string()))
    }

    /// The argument as passed to the OS.
    pub fn as_os_str(&self) -> &OsStr {
        &self.0
    }
}

impl AsRef<OsStr> for Arg {
    fn as_ref(&self) -> &OsStr {
        &self.0
    }
}

macro_rules! arg_from_os {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Arg {
            fn from(value: $ty) -> Self {
                Self(OsString::from(value))
            }
        })*
    };
}

macro_rules! arg_from_display {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Arg {
            fn from(value: $ty) -> Self {
                Self::display(value)
            }
        })*
    };
}

arg_from_os!(&str, String, OsString, PathBuf);
arg_from_display!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, bool, char);

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Self(OsString::from(value))
    }
}

impl From<&OsStr> for Arg {
    fn from(value: &OsStr) -> Self {
        Self(value.to_os_string())
    }
}

impl From<&Path> for Arg {
    fn from(value: &Path) -> Self {
        Self(value.as_os_str().to_os_string())
    }
}

impl From<&PathBuf> for Arg {
    fn from(value: &PathBuf) -> Self {
        Self(value.as_os_str().to_os_string())
    }
}

/// A program invocation, built up and then [`run`](Invocation::run).
///
/// By default the child inherits the caller's environment and working
/// directory. Both can be set explicitly so callers never have to change
/// the process-wide current directory.
///
/// # Example
///
/// ```no_run
/// use mklr::command::Invocation;
///
/// let result = Invocation::new("git")
///     .arg("status")
///     .arg("--short")
///     .current_dir("/path/to/repo")
///     .env("GIT_PAGER", "cat")
///     .run()
///     .unwrap();
/// println!("{}", result.output_str());
/// ```
#[derive(Debug, Clone)]
pub struct Invocation {
    program: OsString,
    args: Vec<Arg>,
    current_dir: Option<PathBuf>,
    env: Vec<(OsString, OsString)>,
}

impl Invocation {
    /// Start an invocation of `program`.
    pub fn new(program: impl Into<Arg>) -> Self {
        Self {
            program: program.into().0,
            args: Vec::new(),
            current_dir: None,
            env: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<Arg>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Arg>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the child in `dir` instead of the caller's working directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Set an environment variable for the child.
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Run the program to completion.
    ///
    /// # Errors
    ///
    /// - [`CommandError::NotFound`] if the program cannot be located
    /// - [`CommandError::NotExecutable`] if it cannot be executed
    /// - [`CommandError::Spawn`] for any other launch failure
    pub fn run(&self) -> Result<InvocationResult, CommandError> {
        if self.program.is_empty() {
            return Err(CommandError::NotFound {
                program: String::new(),
            });
        }

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }
        for (key, value) in &self.env {
            command.env(key, value);
        }

        debug!(
            program = %self.program.to_string_lossy(),
            args = self.args.len(),
            cwd = ?self.current_dir,
            "spawning command"
        );

        let output = command
            .output()
            .map_err(|e| CommandError::from_io(e, &self.program))?;

        let result = InvocationResult {
            exit_code: exit_code(output.status),
            output: output.stdout,
            errors: output.stderr,
        };

        trace!(
            exit_code = result.exit_code,
            stdout_bytes = result.output.len(),
            stderr_bytes = result.errors.len(),
            "command finished"
        );

        Ok(result)
    }
}

/// Run `program` with `args` and capture the result.
///
/// Shorthand for `Invocation::new(program).args(args).run()`. See the
/// [`call!`](crate::call) macro for mixed argument types.
pub fn call<P, I>(program: P, args: I) -> Result<InvocationResult, CommandError>
where
    P: Into<Arg>,
    I: IntoIterator,
    I::Item: Into<Arg>,
{
    Invocation::new(program).args(args).run()
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status
        .code()
        .or_else(|| status.signal().map(|signal| -signal))
        .unwrap_or(-1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod arg {
        use super::*;

        #[test]
        fn numbers_become_text() {
            assert_eq!(Arg::from(42).as_os_str(), "42");
            assert_eq!(Arg::from(-1i64).as_os_str(), "-1");
            assert_eq!(Arg::from(7usize).as_os_str(), "7");
        }

        #[test]
        fn paths_pass_through() {
            let path = Path::new("/tmp/some file");
            assert_eq!(Arg::from(path).as_os_str(), "/tmp/some file");
            assert_eq!(Arg::from(path.to_path_buf()).as_os_str(), "/tmp/some file");
        }

        #[test]
        fn display_values() {
            struct Thing;
            impl std::fmt::Display for Thing {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str("thing")
                }
            }
            assert_eq!(Arg::display(Thing).as_os_str(), "thing");
        }
    }

    mod invocation_result {
        use super::*;

        fn result(exit_code: i32, output: &[u8], errors: &[u8]) -> InvocationResult {
            InvocationResult {
                exit_code,
                output: output.to_vec(),
                errors: errors.to_vec(),
            }
        }

        #[test]
        fn success_only_on_zero() {
            assert!(result(0, b"", b"").success());
            assert!(!result(1, b"", b"").success());
            assert!(!result(-9, b"", b"").success());
        }

        #[test]
        fn lossy_views_leave_bytes_alone() {
            let r = result(0, b"ok\xff\n", b"warn\n");
            assert_eq!(r.output_str(), "ok\u{fffd}\n");
            assert_eq!(r.errors_str(), "warn\n");
            assert_eq!(r.output, b"ok\xff\n");
        }

        #[test]
        fn serializes_as_text() {
            let json = serde_json::to_value(result(2, b"out", b"err")).unwrap();
            assert_eq!(json["exit_code"], 2);
            assert_eq!(json["output"], "out");
            assert_eq!(json["errors"], "err");
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn io_kinds_map_to_variants() {
            let program = OsStr::new("prog");
            assert!(matches!(
                CommandError::from_io(io::ErrorKind::NotFound.into(), program),
                CommandError::NotFound { .. }
            ));
            assert!(matches!(
                CommandError::from_io(io::ErrorKind::PermissionDenied.into(), program),
                CommandError::NotExecutable { .. }
            ));
            assert!(matches!(
                CommandError::from_io(io::ErrorKind::Other.into(), program),
                CommandError::Spawn { .. }
            ));
        }

        #[test]
        fn empty_program_is_not_found() {
            let err = Invocation::new("").run().unwrap_err();
            assert!(matches!(err, CommandError::NotFound { .. }));
        }

        #[test]
        fn display_names_the_program() {
            let err = CommandError::NotFound {
                program: "no-such-tool".into(),
            };
            assert_eq!(err.to_string(), "command not found: no-such-tool");
        }
    }

    #[cfg(unix)]
    mod run {
        use super::*;

        #[test]
        fn captures_both_streams_and_code() {
            let result = Invocation::new("sh")
                .arg("-c")
                .arg("printf out; printf err >&2; exit 3")
                .run()
                .unwrap();
            assert_eq!(result.exit_code, 3);
            assert_eq!(result.output, b"out");
            assert_eq!(result.errors, b"err");
        }

        #[test]
        fn stdin_is_closed() {
            let result = call("cat", Vec::<&str>::new()).unwrap();
            assert_eq!(result.exit_code, 0);
            assert!(result.output.is_empty());
        }

        #[test]
        fn signal_is_negative() {
            let result = call("sh", ["-c", "kill -9 $$"]).unwrap();
            assert_eq!(result.exit_code, -9);
        }

        #[test]
        fn env_and_cwd_are_applied() {
            let dir = tempfile::TempDir::new().unwrap();
            let result = Invocation::new("sh")
                .args(["-c", "printf '%s' \"$MKLR_PROBE\"; pwd >&2"])
                .env("MKLR_PROBE", "probe")
                .current_dir(dir.path())
                .run()
                .unwrap();
            assert_eq!(result.output_str(), "probe");
            let reported = PathBuf::from(result.errors_str().trim_end());
            assert_eq!(
                reported.canonicalize().unwrap(),
                dir.path().canonicalize().unwrap()
            );
        }

        #[test]
        fn macro_mixes_argument_types() {
            let result = crate::call!("sh", "-c", "exit \"$1\"", "sh", 4).unwrap();
            assert_eq!(result.exit_code, 4);
        }
    }
}
