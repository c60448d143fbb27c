//! Build-time error types

use std::path::PathBuf;
use thiserror::Error;

/// The specific way a file's front-matter broke the article schema
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    #[error("missing front-matter block (file must start with `---`)")]
    MissingFrontMatter,

    #[error("front-matter block is not closed by a `---` line")]
    UnterminatedFrontMatter,

    /// Covers missing fields, unknown fields and wrongly typed values
    #[error("{0}")]
    Yaml(String),

    #[error("`title` must not be empty")]
    EmptyTitle,

    #[error("tag #{0} must not be empty")]
    EmptyTag(usize),

    #[error("`date` must have the form YYYY-MM-DD, got {0:?}")]
    MalformedDate(String),

    #[error("`date` is not a real calendar date: {0:?}")]
    InvalidDate(String),
}

/// Front-matter of a single article failed validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid front-matter in {filename}: {violation}")]
pub struct SchemaValidationError {
    pub filename: String,
    pub violation: SchemaViolation,
}

/// Errors that abort an index build
#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Schema(#[from] SchemaValidationError),

    #[error("duplicate slug {slug:?} derived from {first} and {second}")]
    DuplicateSlug {
        slug: String,
        first: String,
        second: String,
    },

    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize artifact: {0}")]
    Serialize(#[from] serde_json::Error),
}
