//! Commit types for chlog.
//!
//! This crate provides the commit types used throughout chlog:
//! - [`RawCommit`]: A commit as retrieved from Git
//! - [`ParsedCommit`]: A commit whose subject follows `type(scope): description`
//! - [`CommitSet`]: Parsed commits keyed by short hash

mod parsed;
mod raw;
mod set;

pub use parsed::{ParsedCommit, ParsedCommitBuilder};
pub use raw::{RawCommit, SHORT_HASH_LEN, short_hash};
pub use set::{CommitSet, ShortHashCollision};
