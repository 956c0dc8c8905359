//! Conventional commit subject parser.

use std::sync::LazyLock;

use chlog_commit::{ParsedCommit, RawCommit};
use regex::Regex;
use thiserror::Error;

static CONVENTIONAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<type>\w+)\((?P<scope>\w+)\): ?(?P<description>.*)$").expect("invalid regex")
});

/// Parse failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The subject is not of the form `type(scope): description`.
    #[error("not a conventional commit: {0:?}")]
    NotConventional(String),
}

/// The three parts of a conventional subject line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// The commit type.
    pub r#type: String,

    /// The scope between the parentheses.
    pub scope: String,

    /// The description, trimmed.
    pub description: String,
}

/// Parser for `type(scope): description` subjects.
///
/// Both type and scope are single words (letters, digits, underscore). Only
/// the first line of a message is considered.
#[derive(Debug, Clone, Copy)]
pub struct ConventionalParser;

impl ConventionalParser {
    /// Creates a new conventional parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parses the first line of `message`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::NotConventional`] if the line does not match.
    pub fn parse_message(&self, message: &str) -> Result<Header, ParseError> {
        let subject = message.lines().next().unwrap_or("");
        let not_conventional = || ParseError::NotConventional(subject.to_string());

        let captures = CONVENTIONAL_RE.captures(subject).ok_or_else(not_conventional)?;
        let field = |name| {
            captures
                .name(name)
                .map(|m| m.as_str())
                .ok_or_else(not_conventional)
        };

        Ok(Header {
            r#type: field("type")?.to_string(),
            scope: field("scope")?.to_string(),
            description: field("description")?.trim().to_string(),
        })
    }

    /// Parses a raw commit, keeping its hash and date.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::NotConventional`] if the subject does not match.
    pub fn parse(&self, raw: &RawCommit) -> Result<ParsedCommit, ParseError> {
        let header = self.parse_message(&raw.message)?;

        Ok(ParsedCommit::builder(&raw.hash, header.r#type)
            .scope(header.scope)
            .description(header.description)
            .date(raw.date)
            .build())
    }
}

impl Default for ConventionalParser {
    fn default() -> Self {
        Self::new()
    }
}
