//! The generated artifact: article index plus slug → body mapping

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use super::error::BuildError;
use super::ArticleMetadata;

/// Everything the content service needs, produced in one build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Article metadata, newest first
    pub index: Vec<ArticleMetadata>,
    /// Raw markdown bodies keyed by slug, in filename order
    pub bodies: IndexMap<String, String>,
}

impl Artifact {
    /// Look up the raw body of an article
    pub fn body(&self, slug: &str) -> Option<&str> {
        self.bodies.get(slug).map(String::as_str)
    }

    /// Look up the metadata of an article
    pub fn article(&self, slug: &str) -> Option<&ArticleMetadata> {
        self.index.iter().find(|a| a.slug == slug)
    }

    /// Deterministic serialized form (pretty JSON, trailing newline)
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Serialize and write to `path`, creating parent directories.
    ///
    /// The JSON goes to a temporary file next to `path` which is then renamed
    /// over it, so `path` holds either the previous artifact or the new one.
    pub fn write(&self, path: &Path) -> Result<(), BuildError> {
        let json = self.to_json()?;

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let write_err = |source| BuildError::Write {
            path: path.to_path_buf(),
            source,
        };

        fs::create_dir_all(parent).map_err(|source| BuildError::Write {
            path: parent.to_path_buf(),
            source,
        })?;

        let mut tmp = NamedTempFile::new_in(parent).map_err(write_err)?;
        tmp.write_all(json.as_bytes()).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(path).map_err(|e| write_err(e.error))?;
        Ok(())
    }

    /// Load a previously written artifact
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read artifact {:?} (run `folio build` first)", path))?;
        let artifact = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse artifact {:?}", path))?;
        Ok(artifact)
    }
}
