//! Markdown changelog rendering.

use std::fmt::Write;

use chlog_commit::ParsedCommit;
use chlog_config::ChangelogConfig;
use chrono::Datelike;

use crate::Taxonomy;

/// Returns the heading line that introduces one generated section.
///
/// Components are not zero-padded: `#  2024-3-5`.
#[must_use]
pub fn date_heading(date: &impl Datelike) -> String {
    format!("#  {}-{}-{}", date.year(), date.month(), date.day())
}

/// Renders sorted commits as Markdown sections, one per commit type.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    commit_link: String,
}

impl MarkdownRenderer {
    /// Creates a renderer using `commit_link` as the link template.
    ///
    /// `{hash}` and `{short_hash}` in the template are replaced per commit.
    #[must_use]
    pub fn new(commit_link: impl Into<String>) -> Self {
        Self {
            commit_link: commit_link.into(),
        }
    }

    /// Returns the link target for a commit.
    #[must_use]
    pub fn link(&self, commit: &ParsedCommit) -> String {
        self.commit_link
            .replace("{hash}", &commit.hash)
            .replace("{short_hash}", commit.short_hash())
    }

    fn reference(&self, commit: &ParsedCommit) -> String {
        format!("[{}]({})", commit.short_hash(), self.link(commit))
    }

    /// Renders commits that are already in changelog order.
    ///
    /// A commit whose description equals the previous bullet's description in
    /// the same section is added to that bullet as another reference. Only
    /// adjacent commits merge. An empty slice renders to an empty string.
    #[must_use]
    pub fn render(&self, taxonomy: &Taxonomy, commits: &[ParsedCommit]) -> String {
        let mut output = String::new();
        let mut current_type: Option<&str> = None;
        // Description of the bullet still waiting for its closing parenthesis.
        let mut open_bullet: Option<&str> = None;

        for commit in commits {
            if current_type != Some(commit.r#type.as_str()) {
                close_bullet(&mut output, &mut open_bullet);
                _ = write!(output, "\n### {}\n\n", taxonomy.label(&commit.r#type));
                current_type = Some(commit.r#type.as_str());
            }

            if open_bullet == Some(commit.description.as_str()) {
                _ = write!(output, ", {}", self.reference(commit));
                continue;
            }

            close_bullet(&mut output, &mut open_bullet);
            _ = write!(
                output,
                "* **{}:** {} ({}",
                commit.scope,
                commit.description,
                self.reference(commit)
            );
            open_bullet = Some(commit.description.as_str());
        }

        close_bullet(&mut output, &mut open_bullet);
        if !output.is_empty() {
            output.push('\n');
        }
        output
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(ChangelogConfig::default().commit_link)
    }
}

fn close_bullet(output: &mut String, open_bullet: &mut Option<&str>) {
    if open_bullet.take().is_some() {
        output.push_str(")\n");
    }
}
