//! Slug derivation and validation

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

/// Longest slug accepted from a request
pub const MAX_SLUG_LEN: usize = 128;

lazy_static! {
    static ref SLUG_CHARSET: Regex = Regex::new(r"^[A-Za-z0-9._-]+$").unwrap();
}

/// Why a slug was refused
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugError {
    #[error("slug is empty")]
    Empty,

    #[error("slug is longer than 128 characters")]
    TooLong,

    #[error("slug contains a path separator")]
    PathSeparator,

    #[error("slug contains a parent-directory sequence")]
    ParentDirectory,

    #[error("slug contains characters outside [A-Za-z0-9._-]")]
    Charset,
}

/// Derive the slug of a markdown file: the filename with a trailing `.md`
/// (any case) removed. Returns `None` for anything that is not markdown.
///
/// ```
/// use folio_rs::content::slug_from_filename;
///
/// assert_eq!(slug_from_filename("hello-world.md"), Some("hello-world"));
/// assert_eq!(slug_from_filename("Notes.MD"), Some("Notes"));
/// assert_eq!(slug_from_filename("image.png"), None);
/// ```
pub fn slug_from_filename(filename: &str) -> Option<&str> {
    let split = filename.len().checked_sub(3)?;
    if !filename.is_char_boundary(split) {
        return None;
    }
    let (stem, ext) = filename.split_at(split);
    ext.eq_ignore_ascii_case(".md").then_some(stem)
}

/// Check a (decoded) slug before it is used as a lookup key
pub fn validate_slug(slug: &str) -> Result<(), SlugError> {
    if slug.is_empty() {
        return Err(SlugError::Empty);
    }
    if slug.chars().count() > MAX_SLUG_LEN {
        return Err(SlugError::TooLong);
    }
    if slug.contains(['/', '\\']) {
        return Err(SlugError::PathSeparator);
    }
    if slug.contains("..") {
        return Err(SlugError::ParentDirectory);
    }
    if !SLUG_CHARSET.is_match(slug) {
        return Err(SlugError::Charset);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_slug_from_filename() {
        assert_eq!(slug_from_filename("post.md"), Some("post"));
        assert_eq!(slug_from_filename("Post.Md"), Some("Post"));
        assert_eq!(slug_from_filename("a.b.md"), Some("a.b"));
        assert_eq!(slug_from_filename("draft.md.bak"), None);
        assert_eq!(slug_from_filename("README"), None);
        assert_eq!(slug_from_filename("md"), None);
        assert_eq!(slug_from_filename(".md"), Some(""));
    }

    #[test]
    fn test_slug_keeps_case() {
        // Case variants stay distinct slugs; they do not collide.
        assert_eq!(slug_from_filename("Post.MD"), Some("Post"));
        assert_eq!(slug_from_filename("post.md"), Some("post"));
    }

    #[test]
    fn test_slug_from_non_ascii_filename() {
        assert_eq!(slug_from_filename("日記.md"), Some("日記"));
        assert_eq!(slug_from_filename("é"), None);
    }

    #[test]
    fn test_validate_slug() {
        assert_eq!(validate_slug("hello-world_2024.v2"), Ok(()));
        assert_eq!(validate_slug(""), Err(SlugError::Empty));
        assert_eq!(validate_slug(&"a".repeat(129)), Err(SlugError::TooLong));
        assert_eq!(validate_slug(&"a".repeat(128)), Ok(()));
        assert_eq!(validate_slug("../secret"), Err(SlugError::PathSeparator));
        assert_eq!(validate_slug("a\\b"), Err(SlugError::PathSeparator));
        assert_eq!(validate_slug(".."), Err(SlugError::ParentDirectory));
        assert_eq!(validate_slug("a..b"), Err(SlugError::ParentDirectory));
        assert_eq!(validate_slug("hello world"), Err(SlugError::Charset));
        assert_eq!(validate_slug("100%"), Err(SlugError::Charset));
        assert_eq!(validate_slug("日記"), Err(SlugError::Charset));
    }

    proptest! {
        #[test]
        fn slug_is_filename_without_suffix(stem in "[A-Za-z0-9._ -]{0,40}", ext in "\\.[mM][dD]") {
            let filename = format!("{stem}{ext}");
            prop_assert_eq!(slug_from_filename(&filename), Some(stem.as_str()));
        }

        #[test]
        fn valid_slugs_pass(slug in "[A-Za-z0-9_-][A-Za-z0-9_-]{0,127}") {
            prop_assert_eq!(validate_slug(&slug), Ok(()));
        }
    }
}
