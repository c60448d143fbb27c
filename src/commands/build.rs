//! Build the article index

use anyhow::Result;

use crate::content::{Artifact, IndexBuilder};
use crate::Folio;

/// Build the index and write the artifact. Nothing is written unless every
/// article validates.
pub fn run(folio: &Folio) -> Result<Artifact> {
    let start = std::time::Instant::now();

    let artifact = check(folio)?;
    artifact.write(&folio.output_path)?;

    tracing::info!(
        "Wrote {} articles to {:?} in {:.2}s",
        artifact.index.len(),
        folio.output_path,
        start.elapsed().as_secs_f64()
    );

    Ok(artifact)
}

/// Build the index in memory only
pub fn check(folio: &Folio) -> Result<Artifact> {
    tracing::info!("Indexing {:?}", folio.content_dir);
    let artifact = IndexBuilder::new(&folio.content_dir).build()?;
    tracing::info!("Indexed {} articles", artifact.index.len());
    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{BuildError, SchemaViolation};
    use std::fs;
    use tempfile::TempDir;

    fn site() -> (TempDir, Folio) {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        fs::create_dir_all(&folio.content_dir).unwrap();
        (dir, folio)
    }

    fn article(folio: &Folio, name: &str, front_matter: &str) {
        let content = format!("---\n{front_matter}\n---\nBody\n");
        fs::write(folio.content_dir.join(name), content).unwrap();
    }

    fn violation(err: anyhow::Error) -> SchemaViolation {
        match err.downcast::<BuildError>().unwrap() {
            BuildError::Schema(e) => e.violation,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_build_writes_artifact() {
        let (_dir, folio) = site();
        article(&folio, "first.md", "title: First\ndate: 2024-01-01\ntags: [a]");
        article(&folio, "second.md", "title: Second\ndate: 2024-02-01");

        let artifact = folio.build().unwrap();
        assert_eq!(artifact.index.len(), 2);
        assert_eq!(folio.load_artifact().unwrap(), artifact);
        assert_eq!(artifact.index[0].slug, "second");
    }

    #[test]
    fn test_build_without_content_dir() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let artifact = folio.build().unwrap();
        assert!(artifact.index.is_empty());
        assert!(folio.output_path.exists());
    }

    #[test]
    fn test_rebuild_is_byte_identical() {
        let (_dir, folio) = site();
        article(&folio, "a.md", "title: A\ndate: 2024-01-01");
        article(&folio, "b.md", "title: B\ndate: 2024-01-01");

        folio.build().unwrap();
        let first = fs::read(&folio.output_path).unwrap();
        folio.build().unwrap();
        let second = fs::read(&folio.output_path).unwrap();
        assert_eq!(first, second);
    }

    fn assert_aborts(front_matter: &str) -> SchemaViolation {
        let (_dir, folio) = site();
        article(&folio, "good.md", "title: Good\ndate: 2024-01-01");
        article(&folio, "bad.md", front_matter);

        let err = folio.build().unwrap_err();
        assert!(!folio.output_path.exists());
        violation(err)
    }

    #[test]
    fn test_missing_title_aborts_without_output() {
        assert!(matches!(
            assert_aborts("date: 2024-01-01"),
            SchemaViolation::Yaml(_)
        ));
    }

    #[test]
    fn test_missing_date_aborts_without_output() {
        assert!(matches!(
            assert_aborts("title: No date"),
            SchemaViolation::Yaml(_)
        ));
    }

    #[test]
    fn test_bad_dates_abort_without_output() {
        assert!(matches!(
            assert_aborts("title: T\ndate: 2024-13-01"),
            SchemaViolation::InvalidDate(_)
        ));
        assert!(matches!(
            assert_aborts("title: T\ndate: 2024-02-30"),
            SchemaViolation::InvalidDate(_)
        ));
    }

    #[test]
    fn test_extra_field_aborts_without_output() {
        assert!(matches!(
            assert_aborts("title: T\ndate: 2024-01-01\nauthor: someone"),
            SchemaViolation::Yaml(_)
        ));
    }

    #[test]
    fn test_failed_build_keeps_previous_artifact() {
        let (_dir, folio) = site();
        article(&folio, "a.md", "title: A\ndate: 2024-01-01");
        folio.build().unwrap();
        let before = fs::read(&folio.output_path).unwrap();

        article(&folio, "b.md", "title: B");
        assert!(folio.build().is_err());
        assert_eq!(fs::read(&folio.output_path).unwrap(), before);
    }

    #[test]
    fn test_check_does_not_write() {
        let (_dir, folio) = site();
        article(&folio, "a.md", "title: A\ndate: 2024-01-01");
        let artifact = folio.check().unwrap();
        assert_eq!(artifact.index.len(), 1);
        assert!(!folio.output_path.exists());
    }
}
