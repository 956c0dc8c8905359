//! Changelog generation for a repository.

use std::path::PathBuf;

use chlog_config::Config;
use chlog_git::Repository;
use tracing::{debug, info, warn};

use crate::{
    CoreResult, OverrideBlock, Overrides, Pipeline, ResolveReport, TimeRange, date_heading,
    prepend_to_file, read_optional, write_file,
};

/// Outcome of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// Heading line for the section, derived from the range end.
    pub heading: String,

    /// Rendered Markdown body, empty when no commits qualified.
    pub markdown: String,

    /// Number of commits in the rendered body.
    pub entries: usize,

    /// What the overrides did.
    pub report: ResolveReport,

    /// Whether the override document contained a directive block.
    pub override_block_found: bool,
}

impl Generated {
    /// Returns the text prepended to the changelog, or an empty string if
    /// there is nothing to add.
    #[must_use]
    pub fn section(&self) -> String {
        if self.markdown.is_empty() {
            String::new()
        } else {
            format!("{}\n{}", self.heading, self.markdown)
        }
    }
}

/// Generates changelog sections for a repository.
pub struct ChangelogGenerator {
    repo: Repository,
    config: Config,
    pipeline: Pipeline,
    block: OverrideBlock,
}

impl ChangelogGenerator {
    /// Creates a generator for `repo` using `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the override header cannot be turned into a pattern.
    pub fn new(repo: Repository, config: Config) -> CoreResult<Self> {
        let block = OverrideBlock::new(&config.overrides.header, &config.overrides.comment_prefix)?;
        Ok(Self {
            pipeline: Pipeline::from_config(&config),
            repo,
            config,
            block,
        })
    }

    /// Returns the absolute changelog path.
    #[must_use]
    pub fn changelog_path(&self) -> PathBuf {
        self.repo.path().join(&self.config.changelog.path)
    }

    /// Returns the absolute override document path.
    #[must_use]
    pub fn overrides_path(&self) -> PathBuf {
        self.repo.path().join(&self.config.overrides.path)
    }

    /// Generates the section for `range`.
    ///
    /// Unless `dry_run` is set, a non-empty section is prepended to the
    /// changelog and the consumed override block is written back.
    ///
    /// # Errors
    ///
    /// Returns an error if history cannot be read, two commits share a short
    /// hash, or a file cannot be read or written.
    pub fn generate(&self, range: &TimeRange, dry_run: bool) -> CoreResult<Generated> {
        let (since, until) = range.to_utc();
        let raw_commits = self.repo.commits_between(since, until)?;
        info!(
            count = raw_commits.len(),
            %since,
            %until,
            "found commits in range"
        );

        let overrides_path = self.overrides_path();
        let (overrides, rewritten, found) = match read_optional(&overrides_path)? {
            Some(text) => {
                let extraction = self.block.extract(&text);
                let rewritten = (extraction.document != text).then_some(extraction.document);
                (extraction.overrides, rewritten, extraction.found)
            }
            None => {
                warn!(path = %overrides_path.display(), "override document not found");
                (Overrides::new(), None, false)
            }
        };

        let mut commits = self.pipeline.parse_commits(&raw_commits)?;
        let report = self.pipeline.apply_overrides(&mut commits, &overrides);
        let sorted = self.pipeline.sort(commits);
        let generated = Generated {
            heading: date_heading(&range.until()),
            markdown: self.pipeline.render(&sorted),
            entries: sorted.len(),
            report,
            override_block_found: found,
        };

        if dry_run {
            info!("dry run, no files written");
            return Ok(generated);
        }

        let section = generated.section();
        if section.is_empty() {
            info!("no changelog entries in range");
        } else {
            let changelog_path = self.changelog_path();
            prepend_to_file(&changelog_path, &section)?;
            info!(
                path = %changelog_path.display(),
                entries = generated.entries,
                "updated changelog"
            );
        }

        if let Some(document) = rewritten {
            write_file(&overrides_path, &document)?;
            debug!(path = %overrides_path.display(), "rewrote override document");
        }

        Ok(generated)
    }
}
