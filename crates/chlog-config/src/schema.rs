//! Configuration schema.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Changelog output configuration.
    #[serde(default)]
    pub changelog: ChangelogConfig,

    /// Recognized commit types and scopes.
    #[serde(default)]
    pub commits: CommitsConfig,

    /// Override document configuration.
    #[serde(default)]
    pub overrides: OverridesConfig,
}

impl Config {
    /// Checks the configuration for values the generator cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.commits.types.is_empty() {
            return Err(ConfigError::Invalid("no commit types configured".into()));
        }

        let mut seen = HashSet::new();
        for ty in &self.commits.types {
            if ty.name.trim().is_empty() {
                return Err(ConfigError::Invalid("commit type with empty name".into()));
            }
            if !seen.insert(ty.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate commit type: {}",
                    ty.name
                )));
            }
        }

        let mut seen = HashSet::new();
        for scope in &self.commits.scopes {
            if !seen.insert(scope.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate scope: {scope}")));
            }
        }

        if self.overrides.header.trim().is_empty() {
            return Err(ConfigError::Invalid("override header token is empty".into()));
        }

        let link = &self.changelog.commit_link;
        if !link.contains("{hash}") && !link.contains("{short_hash}") {
            return Err(ConfigError::Invalid(format!(
                "commit_link has no {{hash}} or {{short_hash}} placeholder: {link}"
            )));
        }

        Ok(())
    }
}

/// Changelog output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangelogConfig {
    /// Changelog path, relative to the repository root.
    #[serde(default = "default_changelog_path")]
    pub path: String,

    /// Link target for commit references; `{hash}` and `{short_hash}` are substituted.
    #[serde(default = "default_commit_link")]
    pub commit_link: String,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            path: default_changelog_path(),
            commit_link: default_commit_link(),
        }
    }
}

fn default_changelog_path() -> String {
    "CHANGELOG.md".to_string()
}

fn default_commit_link() -> String {
    "../../commit/{hash}".to_string()
}

/// Recognized commit types and known scopes, both in priority order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitsConfig {
    /// Commit types, highest priority first.
    #[serde(default = "default_types")]
    pub types: Vec<TypeConfig>,

    /// Known scopes, highest priority first. Other scopes sort after these.
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
}

impl Default for CommitsConfig {
    fn default() -> Self {
        Self {
            types: default_types(),
            scopes: default_scopes(),
        }
    }
}

/// A recognized commit type and its section heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeConfig {
    /// Type as written in commit subjects (e.g. `feat`).
    pub name: String,

    /// Section heading (e.g. `Features`).
    pub label: String,
}

impl TypeConfig {
    /// Creates a new type entry.
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }
}

fn default_types() -> Vec<TypeConfig> {
    vec![
        TypeConfig::new("feat", "Features"),
        TypeConfig::new("fix", "Bug Fixes"),
        TypeConfig::new("perf", "Performance Improvements"),
    ]
}

fn default_scopes() -> Vec<String> {
    ["core", "runtime", "editor", "cli", "build", "docs"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Override document configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverridesConfig {
    /// Override document path, relative to the repository root.
    #[serde(default = "default_overrides_path")]
    pub path: String,

    /// Token that introduces the directive block.
    #[serde(default = "default_header")]
    pub header: String,

    /// Line comment prefix used for the failure marker.
    #[serde(default = "default_comment_prefix")]
    pub comment_prefix: String,
}

impl Default for OverridesConfig {
    fn default() -> Self {
        Self {
            path: default_overrides_path(),
            header: default_header(),
            comment_prefix: default_comment_prefix(),
        }
    }
}

fn default_overrides_path() -> String {
    "changelog_overrides.py".to_string()
}

fn default_header() -> String {
    "changelog_modify".to_string()
}

fn default_comment_prefix() -> String {
    "#".to_string()
}
