//! Parsed commit type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::raw::short_hash;

/// A commit whose subject was parsed as `type(scope): description`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCommit {
    /// The commit hash (SHA).
    pub hash: String,

    /// The commit type (feat, fix, perf).
    pub r#type: String,

    /// The scope between the parentheses.
    pub scope: String,

    /// The trimmed description after the colon.
    pub description: String,

    /// The author date.
    pub date: DateTime<Utc>,
}

impl ParsedCommit {
    /// Creates a new parsed commit builder.
    #[must_use]
    pub fn builder(hash: impl Into<String>, r#type: impl Into<String>) -> ParsedCommitBuilder {
        ParsedCommitBuilder::new(hash, r#type)
    }

    /// Returns the short hash (first 8 characters).
    #[must_use]
    pub fn short_hash(&self) -> &str {
        short_hash(&self.hash)
    }

    /// Replaces type, scope and description, keeping hash and date.
    pub fn relabel(
        &mut self,
        r#type: impl Into<String>,
        scope: impl Into<String>,
        description: impl Into<String>,
    ) {
        self.r#type = r#type.into();
        self.scope = scope.into();
        self.description = description.into();
    }
}

/// Builder for [`ParsedCommit`].
#[derive(Debug)]
pub struct ParsedCommitBuilder {
    hash: String,
    r#type: String,
    scope: String,
    description: String,
    date: DateTime<Utc>,
}

impl ParsedCommitBuilder {
    /// Creates a new builder with required fields.
    fn new(hash: impl Into<String>, r#type: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            r#type: r#type.into(),
            scope: String::new(),
            description: String::new(),
            date: Utc::now(),
        }
    }

    /// Sets the scope.
    #[must_use]
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the date.
    #[must_use]
    pub fn date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    /// Builds the [`ParsedCommit`].
    #[must_use]
    pub fn build(self) -> ParsedCommit {
        ParsedCommit {
            hash: self.hash,
            r#type: self.r#type,
            scope: self.scope,
            description: self.description,
            date: self.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_builder() {
        let date = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let commit = ParsedCommit::builder("abc1234567890", "feat")
            .scope("runtime")
            .description("add new endpoint")
            .date(date)
            .build();

        assert_eq!(commit.r#type, "feat");
        assert_eq!(commit.scope, "runtime");
        assert_eq!(commit.description, "add new endpoint");
        assert_eq!(commit.date, date);
    }

    #[test]
    fn test_builder_defaults() {
        let commit = ParsedCommit::builder("abc", "fix").build();
        assert!(commit.scope.is_empty());
        assert!(commit.description.is_empty());
    }

    #[test]
    fn test_short_hash() {
        let commit = ParsedCommit::builder("deadbeefcafebabe", "perf").build();
        assert_eq!(commit.short_hash(), "deadbeef");
    }

    #[test]
    fn test_relabel_keeps_identity() {
        let date = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut commit = ParsedCommit::builder("abc1234567890", "feat")
            .scope("editor")
            .description("add thing")
            .date(date)
            .build();

        commit.relabel("fix", "runtime", "corrected leak");

        assert_eq!(commit.r#type, "fix");
        assert_eq!(commit.scope, "runtime");
        assert_eq!(commit.description, "corrected leak");
        assert_eq!(commit.hash, "abc1234567890");
        assert_eq!(commit.date, date);
    }
}
