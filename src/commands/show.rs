//! Detail view of a single article

use anyhow::{anyhow, Result};

use crate::content::{validate_slug, Artifact};
use crate::Folio;

/// Print one article's metadata header and raw body
pub fn run(folio: &Folio, slug: &str) -> Result<()> {
    let artifact = folio.load_artifact()?;
    print!("{}", render(&artifact, slug)?);
    Ok(())
}

/// Render the detail view, applying the same slug rules as the service
pub fn render(artifact: &Artifact, slug: &str) -> Result<String> {
    validate_slug(slug).map_err(|e| anyhow!("Invalid slug {:?}: {}", slug, e))?;

    let body = artifact
        .body(slug)
        .ok_or_else(|| anyhow!("No article with slug {:?}", slug))?;

    let mut out = String::new();
    if let Some(meta) = artifact.article(slug) {
        out.push_str(&format!("# {}\n", meta.title));
        out.push_str(&format!("date: {}\n", meta.date.format("%Y-%m-%d")));
        if !meta.tags.is_empty() {
            out.push_str(&format!("tags: {}\n", meta.tags.join(", ")));
        }
        out.push('\n');
    }
    out.push_str(body);
    Ok(out)
}
