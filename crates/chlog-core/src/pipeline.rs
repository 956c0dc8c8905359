//! Parse, override, sort and render.

use chlog_commit::{CommitSet, ParsedCommit, RawCommit};
use chlog_config::Config;
use tracing::{debug, info};

use crate::{
    ConventionalParser, CoreResult, MarkdownRenderer, Overrides, ResolveReport, Taxonomy, classify,
    resolve,
};

/// Turns raw commits into a rendered changelog section.
#[derive(Debug, Clone)]
pub struct Pipeline {
    parser: ConventionalParser,
    taxonomy: Taxonomy,
    renderer: MarkdownRenderer,
}

impl Pipeline {
    /// Creates a new pipeline.
    #[must_use]
    pub fn new(taxonomy: Taxonomy, renderer: MarkdownRenderer) -> Self {
        Self {
            parser: ConventionalParser::new(),
            taxonomy,
            renderer,
        }
    }

    /// Creates a pipeline from the `[commits]` and `[changelog]` settings.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Taxonomy::from_config(&config.commits),
            MarkdownRenderer::new(config.changelog.commit_link.clone()),
        )
    }

    /// Returns the type and scope vocabulary.
    #[must_use]
    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Parses raw commits, keeping those with a conventional subject of a known type.
    ///
    /// # Errors
    ///
    /// Returns an error if two distinct commits share a short hash.
    pub fn parse_commits(&self, raw_commits: &[RawCommit]) -> CoreResult<CommitSet> {
        let mut commits = CommitSet::new();

        for raw in raw_commits {
            let parsed = match self.parser.parse(raw) {
                Ok(parsed) => parsed,
                Err(e) => {
                    debug!(hash = %raw.short_hash(), "skipping commit: {e}");
                    continue;
                }
            };
            if !self.taxonomy.is_known_type(&parsed.r#type) {
                debug!(
                    hash = %raw.short_hash(),
                    subject = %raw.subject(),
                    "skipping commit of unlisted type"
                );
                continue;
            }
            commits.insert(parsed)?;
        }

        info!(
            total = raw_commits.len(),
            kept = commits.len(),
            "parsed commits"
        );
        Ok(commits)
    }

    /// Applies overrides to parsed commits.
    pub fn apply_overrides(&self, commits: &mut CommitSet, overrides: &Overrides) -> ResolveReport {
        resolve(commits, overrides, &self.parser, &self.taxonomy)
    }

    /// Returns the commits in changelog order.
    #[must_use]
    pub fn sort(&self, commits: CommitSet) -> Vec<ParsedCommit> {
        classify::sort(&self.taxonomy, commits.into_commits())
    }

    /// Renders sorted commits as Markdown.
    #[must_use]
    pub fn render(&self, commits: &[ParsedCommit]) -> String {
        self.renderer.render(&self.taxonomy, commits)
    }

    /// Runs every stage and returns the Markdown body.
    ///
    /// # Errors
    ///
    /// Returns an error if two distinct commits share a short hash.
    pub fn run(&self, raw_commits: &[RawCommit], overrides: &Overrides) -> CoreResult<String> {
        let mut commits = self.parse_commits(raw_commits)?;
        self.apply_overrides(&mut commits, overrides);
        Ok(self.render(&self.sort(commits)))
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreError;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap()
    }

    fn make_raw(hash: &str, message: &str, t: i64) -> RawCommit {
        RawCommit::new(hash, message, at(t))
    }

    fn pipeline() -> Pipeline {
        Pipeline::new(Taxonomy::default(), MarkdownRenderer::new("L/{short_hash}"))
    }

    fn overrides(pairs: &[(&str, &str)]) -> Overrides {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn example_commits() -> Vec<RawCommit> {
        vec![
            make_raw("11111111aaaa", "feat(runtime): add X", 3),
            make_raw("22222222bbbb", "fix(editor): fix Y", 2),
            make_raw("33333333cccc", "feat(editor): add Z", 1),
        ]
    }

    #[test]
    fn test_parse_commits_skips_invalid() {
        let raw = vec![
            make_raw("11111111aaaa", "feat(runtime): add X", 1),
            make_raw("22222222bbbb", "Merge branch 'main'", 1),
            make_raw("33333333cccc", "chore(build): bump deps", 1),
            make_raw("44444444dddd", "fix: no scope", 1),
        ];

        let commits = pipeline().parse_commits(&raw).unwrap();
        assert_eq!(commits.short_hashes(), ["11111111"]);
    }

    #[test]
    fn test_parse_commits_empty() {
        let commits = pipeline().parse_commits(&[]).unwrap();
        assert!(commits.is_empty());
    }

    #[test]
    fn test_parse_commits_short_hash_collision() {
        let raw = vec![
            make_raw("abcdef12aaaa", "feat(core): one", 1),
            make_raw("abcdef12bbbb", "fix(core): two", 2),
        ];

        let err = pipeline().parse_commits(&raw).unwrap_err();
        assert!(matches!(err, CoreError::ShortHashCollision(_)));
    }

    #[test]
    fn test_colliding_non_conventional_commit_is_harmless() {
        let raw = vec![
            make_raw("abcdef12aaaa", "feat(core): one", 1),
            make_raw("abcdef12bbbb", "wip", 2),
        ];
        assert_eq!(pipeline().parse_commits(&raw).unwrap().len(), 1);
    }

    #[test]
    fn test_run_renders_example() {
        let output = pipeline().run(&example_commits(), &Overrides::new()).unwrap();

        insta::assert_snapshot!(output.trim(), @r"
        ### Features

        * **runtime:** add X ([11111111](L/11111111))
        * **editor:** add Z ([33333333](L/33333333))

        ### Bug Fixes

        * **editor:** fix Y ([22222222](L/22222222))
        ");
    }

    #[test]
    fn test_run_with_overrides() {
        let output = pipeline()
            .run(
                &example_commits(),
                &overrides(&[
                    ("33333333", ""),
                    ("22222222", "perf(runtime): faster Y"),
                ]),
            )
            .unwrap();

        assert!(!output.contains("add Z"));
        assert!(!output.contains("Bug Fixes"));
        assert!(output.contains("\n### Performance Improvements\n\n* **runtime:** faster Y"));
    }

    #[test]
    fn test_run_merges_duplicate_descriptions() {
        let raw = vec![
            make_raw("11111111aaaa", "perf(runtime): improve startup time", 2),
            make_raw("22222222bbbb", "perf(editor): improve startup time", 1),
        ];

        let output = pipeline().run(&raw, &Overrides::new()).unwrap();
        assert_eq!(
            output,
            "\n### Performance Improvements\n\n\
             * **runtime:** improve startup time ([11111111](L/11111111), [22222222](L/22222222))\n\n"
        );
    }

    #[test]
    fn test_run_empty_range() {
        assert_eq!(pipeline().run(&[], &Overrides::new()).unwrap(), "");
    }

    #[test]
    fn test_run_is_independent_of_input_order() {
        let mut raw = example_commits();
        let expected = pipeline().run(&raw, &Overrides::new()).unwrap();

        raw.reverse();
        assert_eq!(pipeline().run(&raw, &Overrides::new()).unwrap(), expected);
    }

    #[test]
    fn test_from_config_uses_configured_types() {
        let mut config = Config::default();
        config.commits.types.retain(|t| t.name == "fix");

        let pipeline = Pipeline::from_config(&config);
        let output = pipeline.run(&example_commits(), &Overrides::new()).unwrap();

        assert!(!output.contains("Features"));
        assert!(output.contains("### Bug Fixes"));
        assert!(output.contains("(../../commit/22222222bbbb)"));
    }

    #[test]
    fn test_default_pipeline_knows_default_types() {
        let pipeline = Pipeline::default();
        assert!(pipeline.taxonomy().is_known_type("feat"));
        assert!(pipeline.taxonomy().is_known_type("perf"));
        assert!(!pipeline.taxonomy().is_known_type("chore"));
    }
}
