//! Manual corrections keyed by short hash.
//!
//! Overrides live in a directive block embedded in some other document,
//! typically a release script:
//!
//! ```text
//! changelog_modify = {
//!     'abc12345': 'fix(runtime): corrected leak',
//!     'def67890': '',
//! }
//! ```
//!
//! Keys and values are single- or double-quoted strings without escapes.
//! Outside quotes, the configured comment prefix starts a comment that runs to
//! the end of the line. An empty value deletes the commit; any other value replaces its subject. The
//! block body is emptied once read so the same overrides are not applied by a
//! later run.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use chlog_commit::{CommitSet, short_hash};
use regex::{Captures, Regex};
use tracing::{debug, info, warn};

use crate::{ConventionalParser, CoreResult, Taxonomy};

/// Override entries: short hash to replacement subject (blank deletes).
pub type Overrides = BTreeMap<String, String>;

static PAIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:'(?P<k1>[^']*)'|"(?P<k2>[^"]*)")\s*:\s*(?:'(?P<v1>[^']*)'|"(?P<v2>[^"]*)")"#)
        .expect("invalid regex")
});

/// Result of reading a directive block out of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Entries found in the block.
    pub overrides: Overrides,

    /// The document to write back.
    pub document: String,

    /// Whether the block header was found.
    pub found: bool,
}

/// Locates and consumes the override directive block.
#[derive(Debug, Clone)]
pub struct OverrideBlock {
    header_re: Regex,
    block_re: Regex,
    comment_re: Option<Regex>,
    marker: String,
}

impl OverrideBlock {
    /// Creates a block reader for `header`.
    ///
    /// Text from `comment_prefix` to the end of the line is a comment inside
    /// the block; the prefix also starts the marker line for documents
    /// without a block.
    ///
    /// # Errors
    ///
    /// Returns an error if the block pattern cannot be compiled.
    pub fn new(header: &str, comment_prefix: &str) -> CoreResult<Self> {
        let boundary = if header.starts_with(|c: char| c.is_alphanumeric() || c == '_') {
            r"\b"
        } else {
            ""
        };
        let opening = format!(r"{boundary}{}\s*=\s*\{{", regex::escape(header));
        // Outside quotes the comment prefix only ever opens a comment.
        let (comment, reserved) = match comment_prefix.chars().next() {
            Some(first) => (
                format!(r"{}[^\n]*|", regex::escape(comment_prefix)),
                regex::escape(&first.to_string()),
            ),
            None => (String::new(), String::new()),
        };

        let header_re = Regex::new(&opening)?;
        let block_re = Regex::new(&format!(
            r#"{opening}(?P<body>(?:{comment}'[^']*'|"[^"]*"|[^'"}}{reserved}])*)\}}"#
        ))?;
        let comment_re = if comment_prefix.is_empty() {
            None
        } else {
            Some(Regex::new(&format!(
                r#"'[^']*'|"[^"]*"|(?P<comment>{}[^\n]*)"#,
                regex::escape(comment_prefix)
            ))?)
        };
        let marker = format!("{comment_prefix} chlog: {header} block not found, no overrides applied");

        Ok(Self {
            header_re,
            block_re,
            comment_re,
            marker,
        })
    }

    /// Returns the comment line prepended to documents without a block.
    #[must_use]
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Reads the override entries from `text`.
    ///
    /// The returned document has the block body removed, leaving `header = {}`.
    /// When no block is present the entries are empty and the document gains a
    /// marker line, unless it already starts with one.
    #[must_use]
    pub fn extract(&self, text: &str) -> Extraction {
        let Some(body) = self
            .block_re
            .captures(text)
            .and_then(|caps| caps.name("body"))
        else {
            if self.header_re.is_match(text) {
                warn!("override block is not terminated, no overrides applied");
            } else {
                warn!("override block not found, no overrides applied");
            }
            let document = if text.starts_with(&self.marker) {
                text.to_string()
            } else {
                format!("{}\n{text}", self.marker)
            };
            return Extraction {
                overrides: Overrides::new(),
                document,
                found: false,
            };
        };

        let entries = self.strip_comments(body.as_str());
        let mut overrides = Overrides::new();
        for caps in PAIR_RE.captures_iter(&entries) {
            let (Some(key), Some(value)) = (
                caps.name("k1").or_else(|| caps.name("k2")),
                caps.name("v1").or_else(|| caps.name("v2")),
            ) else {
                continue;
            };
            let key = short_hash(key.as_str().trim()).to_ascii_lowercase();
            overrides.insert(key, value.as_str().to_string());
        }
        debug!(entries = overrides.len(), "read override block");

        let document = format!("{}{}", &text[..body.start()], &text[body.end()..]);
        Extraction {
            overrides,
            document,
            found: true,
        }
    }

    fn strip_comments<'a>(&self, body: &'a str) -> Cow<'a, str> {
        let Some(comment_re) = &self.comment_re else {
            return Cow::Borrowed(body);
        };
        comment_re.replace_all(body, |caps: &Captures<'_>| {
            if caps.name("comment").is_some() {
                String::new()
            } else {
                caps[0].to_string()
            }
        })
    }
}

/// Counts of what [`resolve`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveReport {
    /// Commits deleted by a blank override.
    pub removed: usize,

    /// Commits whose type, scope and description were replaced.
    pub edited: usize,

    /// Overrides left unapplied because the replacement was unusable.
    pub ignored: usize,

    /// Overrides naming no commit in the set.
    pub unmatched: usize,
}

/// Applies overrides to `commits` in place.
///
/// A blank value removes the commit. Any other value is parsed as a
/// conventional subject and replaces type, scope and description, keeping the
/// commit's hash and date. Replacements that do not parse, or that name a type
/// outside `taxonomy`, are ignored and the commit is kept unchanged.
pub fn resolve(
    commits: &mut CommitSet,
    overrides: &Overrides,
    parser: &ConventionalParser,
    taxonomy: &Taxonomy,
) -> ResolveReport {
    let mut report = ResolveReport::default();
    for key in overrides.keys().filter(|k| !commits.contains(k)) {
        debug!(hash = %key, "override matches no commit in range");
        report.unmatched += 1;
    }

    for key in commits.short_hashes() {
        let Some(replacement) = overrides.get(&key) else {
            continue;
        };

        if replacement.trim().is_empty() {
            commits.remove(&key);
            debug!(hash = %key, "removed commit by override");
            report.removed += 1;
            continue;
        }

        let header = match parser.parse_message(replacement) {
            Ok(header) if taxonomy.is_known_type(&header.r#type) => header,
            Ok(header) => {
                warn!(
                    hash = %key,
                    commit_type = %header.r#type,
                    "override names an unknown type, ignoring"
                );
                report.ignored += 1;
                continue;
            }
            Err(e) => {
                warn!(hash = %key, "ignoring override: {e}");
                report.ignored += 1;
                continue;
            }
        };

        if let Some(commit) = commits.get_mut(&key) {
            commit.relabel(header.r#type, header.scope, header.description);
            debug!(hash = %key, "edited commit by override");
            report.edited += 1;
        }
    }

    info!(
        removed = report.removed,
        edited = report.edited,
        ignored = report.ignored,
        unmatched = report.unmatched,
        "applied overrides"
    );
    report
}
