//! List view of the built index

use anyhow::Result;

use crate::content::{sort_by_date_desc, ArticleMetadata, Artifact};
use crate::Folio;

/// Print every article, newest first
pub fn run(folio: &Folio) -> Result<()> {
    let artifact = folio.load_artifact()?;
    print!("{}", render(&artifact));
    Ok(())
}

/// Render the list view. The index is already sorted by the build; sorting
/// again keeps the view correct for hand-edited artifacts.
pub fn render(artifact: &Artifact) -> String {
    let mut articles = artifact.index.clone();
    sort_by_date_desc(&mut articles);

    let mut out = format!("Articles ({}):\n", articles.len());
    for article in &articles {
        out.push_str(&format_entry(article));
        out.push('\n');
    }
    out
}

fn format_entry(article: &ArticleMetadata) -> String {
    let tags = if article.tags.is_empty() {
        "(no tags)".to_string()
    } else {
        article.tags.join(", ")
    };
    format!(
        "  {} - {} [{}] ({})",
        article.date.format("%Y-%m-%d"),
        article.title,
        tags,
        article.slug
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(slug: &str, date: &str, tags: &[&str]) -> ArticleMetadata {
        ArticleMetadata {
            slug: slug.to_string(),
            filename: format!("{slug}.md"),
            title: format!("Title {slug}"),
            date: date.parse().unwrap(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            math: false,
        }
    }

    #[test]
    fn test_render_sorts_newest_first() {
        let artifact = Artifact {
            index: vec![
                article("old", "2023-01-01", &[]),
                article("new", "2024-01-01", &["rust", "web"]),
            ],
            ..Default::default()
        };

        assert_eq!(
            render(&artifact),
            "Articles (2):\n  \
             2024-01-01 - Title new [rust, web] (new)\n  \
             2023-01-01 - Title old [(no tags)] (old)\n"
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&Artifact::default()), "Articles (0):\n");
    }
}
