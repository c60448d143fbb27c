//! Article metadata model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::FrontMatter;

/// One entry of the article index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleMetadata {
    /// URL-safe identifier derived from the filename
    pub slug: String,

    /// Source filename, informational only
    pub filename: String,

    /// Article title
    pub title: String,

    /// Publication date, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,

    /// Article tags
    pub tags: Vec<String>,

    /// Client should enable math rendering
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub math: bool,
}

impl ArticleMetadata {
    pub fn new(slug: &str, filename: &str, fm: FrontMatter) -> Self {
        Self {
            slug: slug.to_string(),
            filename: filename.to_string(),
            title: fm.title,
            date: fm.date,
            tags: fm.tags,
            math: fm.math,
        }
    }
}

/// Sort newest first. The sort is stable, so entries sharing a date keep
/// their incoming (filename) order.
pub fn sort_by_date_desc(articles: &mut [ArticleMetadata]) {
    articles.sort_by(|a, b| b.date.cmp(&a.date));
}
