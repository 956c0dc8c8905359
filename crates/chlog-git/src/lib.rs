//! Git abstraction layer for chlog.
//!
//! This crate provides the Git operations the changelog generator needs:
//! - Repository opening
//! - Commit retrieval by author-time range

mod error;
mod repository;

pub use error::{GitError, GitResult};
pub use repository::Repository;
