//! Parsed commits keyed by short hash.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::ParsedCommit;

/// Two distinct commits share the same short hash.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("short hash {short_hash} is shared by {existing} and {incoming}")]
pub struct ShortHashCollision {
    /// The contested short hash.
    pub short_hash: String,

    /// Full hash of the commit already in the set.
    pub existing: String,

    /// Full hash of the commit that was rejected.
    pub incoming: String,
}

/// A set of parsed commits keyed by their short hash.
///
/// Keys are never re-keyed once inserted; overrides edit or remove entries in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitSet {
    commits: BTreeMap<String, ParsedCommit>,
}

impl CommitSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a commit under its short hash.
    ///
    /// Re-inserting a commit with the same full hash replaces it.
    ///
    /// # Errors
    ///
    /// Returns [`ShortHashCollision`] if a different commit already owns the short hash.
    pub fn insert(&mut self, commit: ParsedCommit) -> Result<(), ShortHashCollision> {
        let key = commit.short_hash().to_string();
        if let Some(existing) = self.commits.get(&key)
            && existing.hash != commit.hash
        {
            return Err(ShortHashCollision {
                short_hash: key,
                existing: existing.hash.clone(),
                incoming: commit.hash,
            });
        }
        self.commits.insert(key, commit);
        Ok(())
    }

    /// Removes and returns the commit with the given short hash.
    pub fn remove(&mut self, short_hash: &str) -> Option<ParsedCommit> {
        self.commits.remove(short_hash)
    }

    /// Returns the commit with the given short hash.
    #[must_use]
    pub fn get(&self, short_hash: &str) -> Option<&ParsedCommit> {
        self.commits.get(short_hash)
    }

    /// Returns a mutable reference to the commit with the given short hash.
    pub fn get_mut(&mut self, short_hash: &str) -> Option<&mut ParsedCommit> {
        self.commits.get_mut(short_hash)
    }

    /// Returns true if a commit with the given short hash is present.
    #[must_use]
    pub fn contains(&self, short_hash: &str) -> bool {
        self.commits.contains_key(short_hash)
    }

    /// Returns the number of commits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commits.len()
    }

    /// Returns true if the set holds no commits.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Returns a snapshot of the keys, safe to hold while mutating the set.
    #[must_use]
    pub fn short_hashes(&self) -> Vec<String> {
        self.commits.keys().cloned().collect()
    }

    /// Consumes the set, returning its commits in key order.
    #[must_use]
    pub fn into_commits(self) -> Vec<ParsedCommit> {
        self.commits.into_values().collect()
    }
}
