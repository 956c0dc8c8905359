//! Git repository wrapper.

use std::path::Path;

use chlog_commit::RawCommit;
use chrono::{DateTime, TimeZone, Utc};
use git2::{ErrorCode, Repository as Git2Repo, Sort};
use tracing::debug;

use crate::{GitError, GitResult};

/// A Git repository wrapper.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Opens a repository at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a valid Git repository.
    pub fn open(path: impl AsRef<Path>) -> GitResult<Self> {
        let path = path.as_ref();
        let inner = Git2Repo::open(path).map_err(|_| GitError::NotARepo(path.to_path_buf()))?;
        Ok(Self { inner })
    }

    /// Returns the repository root path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.workdir().unwrap_or_else(|| self.inner.path())
    }

    /// Returns commits reachable from HEAD whose author date lies in `[since, until]`.
    ///
    /// Commits are returned newest first. A repository without commits yields
    /// an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be walked.
    pub fn commits_between(
        &self,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> GitResult<Vec<RawCommit>> {
        let mut revwalk = self.inner.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;

        match revwalk.push_head() {
            Ok(()) => {}
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                debug!("repository has no commits");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            let commit = self.inner.find_commit(oid)?;

            let Some(date) = Utc
                .timestamp_opt(commit.author().when().seconds(), 0)
                .single()
            else {
                debug!(hash = %oid, "skipping commit with out-of-range author time");
                continue;
            };

            if date < since || date > until {
                continue;
            }

            let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();
            commits.push(RawCommit::new(oid.to_string(), message, date));
        }

        debug!(count = commits.len(), %since, %until, "collected commits in range");
        Ok(commits)
    }
}
