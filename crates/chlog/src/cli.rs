//! CLI definition.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chlog_config::{Config, ConfigError, find_and_load_config_from, load_config};
use chlog_core::{ChangelogGenerator, TimeRange, parse_timestamp};
use chlog_git::Repository;
use chrono::{DateTime, Local};
use clap::Parser;
use tracing::{debug, info};

/// Generate a Markdown changelog section from conventional commits.
///
/// Timestamps are `year-month-day-hour-minute-second` in local time,
/// e.g. `2024-3-1-0-0-0`. Both ends of the range are inclusive.
#[derive(Debug, Parser)]
#[command(name = "chlog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the Git repository
    pub repo: PathBuf,

    /// Start of the commit range
    #[arg(value_parser = parse_time)]
    pub since: DateTime<Local>,

    /// End of the commit range (default: now)
    #[arg(value_parser = parse_time)]
    pub until: Option<DateTime<Local>>,

    /// Configuration file (default: chlog.toml found from the repository upwards)
    #[arg(short, long, env = "CHLOG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the section instead of writing any file
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_time(input: &str) -> Result<DateTime<Local>, String> {
    parse_timestamp(input).map_err(|e| e.to_string())
}

impl Cli {
    /// Runs the CLI command.
    pub fn run(self) -> Result<()> {
        let until = self.until.unwrap_or_else(Local::now);
        let range = TimeRange::new(self.since, until)?;

        let repo = Repository::open(&self.repo)?;
        let config = self.resolve_config(repo.path())?;

        let generator = ChangelogGenerator::new(repo, config)?;
        let generated = generator.generate(&range, self.dry_run)?;

        if self.dry_run {
            print!("{}", generated.section());
        } else if generated.entries == 0 {
            println!("No changelog entries between {} and {}", range.since(), range.until());
        } else {
            println!(
                "Added {} entries to {}",
                generated.entries,
                generator.changelog_path().display()
            );
        }

        if !generated.override_block_found {
            info!(
                path = %generator.overrides_path().display(),
                "no override block, commits used as written"
            );
        }
        Ok(())
    }

    fn resolve_config(&self, repo_root: &Path) -> Result<Config> {
        if let Some(path) = &self.config {
            return load_config(path)
                .with_context(|| format!("failed to load config {}", path.display()));
        }

        match find_and_load_config_from(repo_root) {
            Ok(config) => Ok(config),
            Err(ConfigError::NotFound(path)) => {
                debug!(path = %path.display(), "no config file found, using defaults");
                Ok(Config::default())
            }
            Err(e) => Err(e.into()),
        }
    }
}
