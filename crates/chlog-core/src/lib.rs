//! Core library for chlog.
//!
//! This crate turns a range of commits into a changelog section:
//! - [`ConventionalParser`]: reads `type(scope): description` subjects
//! - [`OverrideBlock`] and [`resolve`]: manual edits and deletions keyed by short hash
//! - [`sort`]: the deterministic section/bullet order
//! - [`MarkdownRenderer`]: grouped Markdown output
//! - [`ChangelogGenerator`]: repository-to-file orchestration

mod classify;
mod error;
mod files;
mod generator;
mod overrides;
mod parser;
mod pipeline;
mod range;
mod render;
mod taxonomy;

pub use classify::sort;
pub use error::{CoreError, CoreResult};
pub use files::{FileError, FileResult, prepend_to_file, read_optional, write_file};
pub use generator::{ChangelogGenerator, Generated};
pub use overrides::{Extraction, OverrideBlock, Overrides, ResolveReport, resolve};
pub use parser::{ConventionalParser, Header, ParseError};
pub use pipeline::Pipeline;
pub use range::{TimeRange, parse_timestamp};
pub use render::{MarkdownRenderer, date_heading};
pub use taxonomy::Taxonomy;
