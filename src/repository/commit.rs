//! repository::commit
//!
//! Immutable commit snapshots.

use serde::Serialize;

use crate::core::types::{Oid, TypeError};

/// What we need to know about a commit.
///
/// A snapshot taken when the commit was resolved; it does not follow the
/// ref it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    /// The commit OID
    pub id: Oid,
    /// Full commit message, trailing newline included
    pub message: String,
    /// First line of the commit message
    pub summary: String,
    /// Author name
    pub author_name: String,
    /// Author email
    pub author_email: String,
    /// Author timestamp
    pub author_time: chrono::DateTime<chrono::Utc>,
}

impl Commit {
    pub(super) fn from_git2(commit: &git2::Commit<'_>) -> Result<Self, TypeError> {
        let author = commit.author();
        let author_time = chrono::DateTime::from_timestamp(author.when().seconds(), 0)
            .unwrap_or(chrono::DateTime::UNIX_EPOCH);

        Ok(Self {
            id: Oid::new(commit.id().to_string())?,
            message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
            summary: commit.summary().unwrap_or("").to_string(),
            author_name: String::from_utf8_lossy(author.name_bytes()).into_owned(),
            author_email: String::from_utf8_lossy(author.email_bytes()).into_owned(),
            author_time,
        })
    }
}

impl std::fmt::Display for Commit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.id.short(7), self.summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_short_id_and_summary() {
        let commit = Commit {
            id: Oid::new("b31bc3aec13846e15f88ef31fd8639e03a1df39a").unwrap(),
            message: "Fifth master commit.\n".to_string(),
            summary: "Fifth master commit.".to_string(),
            author_name: "Test User".to_string(),
            author_email: "test@example.com".to_string(),
            author_time: chrono::DateTime::UNIX_EPOCH,
        };
        assert_eq!(commit.to_string(), "b31bc3a Fifth master commit.");
    }
}
