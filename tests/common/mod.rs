//! Shared fixtures for integration tests.
//!
//! Repositories are built with the `git` CLI inside a `TempDir`, so the
//! library is always checked against what real Git wrote.

#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

const ORDINALS: [&str; 5] = ["First", "Second", "Third", "Fourth", "Fifth"];

/// A repository with three branches, each commit rewriting `file`:
///
/// ```text
/// * Fifth master commit.      file = "master 5\n"
/// * Fourth master commit.
/// | * Second branch2 commit.  file = "branch2 2\n"
/// | * First branch2 commit.
/// | | * Second branch1 commit. file = "branch1 2\n"
/// | | * First branch1 commit.
/// | |/
/// |/|
/// * | Third master commit.
/// |/
/// * Second master commit.
/// * First master commit.
/// ```
///
/// `master` is checked out when construction finishes.
pub struct FixtureRepo {
    dir: TempDir,
}

impl FixtureRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let repo = Self { dir };

        repo.git(&["init", "-q"]);
        repo.git(&["symbolic-ref", "HEAD", "refs/heads/master"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "commit.gpgsign", "false"]);

        repo.commit_line("master", 1);
        repo.commit_line("master", 2);
        repo.git(&["branch", "branch2"]);
        repo.commit_line("master", 3);
        repo.git(&["branch", "branch1"]);

        repo.git(&["checkout", "-q", "branch1"]);
        repo.commit_line("branch1", 1);
        repo.commit_line("branch1", 2);

        repo.git(&["checkout", "-q", "branch2"]);
        repo.commit_line("branch2", 1);
        repo.commit_line("branch2", 2);

        repo.git(&["checkout", "-q", "master"]);
        repo.commit_line("master", 4);
        repo.commit_line("master", 5);

        repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `"<branch> <n>\n"` to `file` and commit it as
    /// `"<Ordinal> <branch> commit."`.
    fn commit_line(&self, branch: &str, n: usize) {
        std::fs::write(self.path().join("file"), format!("{branch} {n}\n")).unwrap();
        self.git(&["add", "file"]);
        let message = format!("{} {} commit.", ORDINALS[n - 1], branch);
        self.git(&["commit", "-q", "-m", &message]);
    }

    /// Run git in the fixture and return trimmed stdout.
    pub fn git(&self, args: &[&str]) -> String {
        git_in(self.path(), args)
    }

    /// Full id of `rev`, as git reports it.
    pub fn rev_parse(&self, rev: &str) -> String {
        self.git(&["rev-parse", rev])
    }

    /// Raw commit message of `rev`, trailing newline included.
    pub fn message(&self, rev: &str) -> String {
        raw_message(self.path(), rev)
    }

    /// Branch HEAD points to, as git reports it.
    pub fn current_branch(&self) -> String {
        self.git(&["symbolic-ref", "--short", "HEAD"])
    }

    /// Contents of the tracked `file`.
    pub fn file(&self) -> String {
        read_file(self.path())
    }
}

/// Contents of `file` in the working tree at `dir`.
pub fn read_file(dir: &Path) -> String {
    std::fs::read_to_string(dir.join("file")).expect("failed to read file")
}

/// Raw message of `rev` in the repository at `dir`.
pub fn raw_message(dir: &Path, rev: &str) -> String {
    let object = run(dir, &["cat-file", "commit", rev]);
    let text = String::from_utf8(object).unwrap();
    let (_, message) = text.split_once("\n\n").expect("commit has no message");
    message.to_string()
}

/// Run git in `dir` and return trimmed stdout, panicking on failure.
pub fn git_in(dir: &Path, args: &[&str]) -> String {
    let stdout = run(dir, args);
    String::from_utf8(stdout).unwrap().trim().to_string()
}

fn run(dir: &Path, args: &[&str]) -> Vec<u8> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .output()
        .expect("git command failed");

    if !output.status.success() {
        panic!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
    output.stdout
}
