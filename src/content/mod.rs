//! Content module - front-matter, slugs, and the index builder

mod article;
mod artifact;
mod error;
mod frontmatter;
pub mod loader;
mod slug;

pub use article::{sort_by_date_desc, ArticleMetadata};
pub use artifact::Artifact;
pub use error::{BuildError, SchemaValidationError, SchemaViolation};
pub use frontmatter::FrontMatter;
pub use loader::IndexBuilder;
pub use slug::{slug_from_filename, validate_slug, SlugError, MAX_SLUG_LEN};
