//! Index builder - turns a directory of markdown files into an [`Artifact`]

use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::article::sort_by_date_desc;
use super::error::BuildError;
use super::slug::{slug_from_filename, validate_slug};
use super::{ArticleMetadata, Artifact, FrontMatter};

/// Builds the article index from a content directory
pub struct IndexBuilder {
    content_dir: PathBuf,
}

impl IndexBuilder {
    /// Create a builder for the given content directory
    pub fn new<P: AsRef<Path>>(content_dir: P) -> Self {
        Self {
            content_dir: content_dir.as_ref().to_path_buf(),
        }
    }

    /// Parse and validate every article. Any invalid file aborts the whole
    /// build; nothing is returned for the files that did parse.
    pub fn build(&self) -> Result<Artifact, BuildError> {
        let filenames = self.markdown_filenames();
        tracing::debug!(
            "Found {} markdown files in {:?}",
            filenames.len(),
            self.content_dir
        );

        let mut index: Vec<ArticleMetadata> = Vec::with_capacity(filenames.len());
        let mut bodies = IndexMap::with_capacity(filenames.len());

        for filename in &filenames {
            let Some(slug) = slug_from_filename(filename) else {
                continue;
            };

            let path = self.content_dir.join(filename);
            let content = fs::read_to_string(&path).map_err(|source| BuildError::Read {
                path: path.clone(),
                source,
            })?;
            let (fm, body) = FrontMatter::parse(filename, &content)?;

            if let Some(first) = index.iter().find(|a| a.slug == slug) {
                return Err(BuildError::DuplicateSlug {
                    slug: slug.to_string(),
                    first: first.filename.clone(),
                    second: filename.clone(),
                });
            }

            if let Err(e) = validate_slug(slug) {
                tracing::warn!(
                    "Article {} will not be reachable over HTTP: {}",
                    filename,
                    e
                );
            }

            tracing::debug!("Indexed {} as {:?} ({})", filename, slug, fm.date);
            bodies.insert(slug.to_string(), body.to_string());
            index.push(ArticleMetadata::new(slug, filename, fm));
        }

        sort_by_date_desc(&mut index);

        Ok(Artifact { index, bodies })
    }

    /// Markdown filenames directly inside the content directory, in ordinal
    /// order. A missing or unreadable directory yields no files.
    fn markdown_filenames(&self) -> Vec<String> {
        if !self.content_dir.is_dir() {
            tracing::debug!("Content directory {:?} not found", self.content_dir);
            return Vec::new();
        }

        let mut filenames: Vec<String> = WalkDir::new(&self.content_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| match e.file_name().to_str() {
                Some(name) => Some(name.to_string()),
                None => {
                    tracing::warn!("Skipping non UTF-8 filename {:?}", e.path());
                    None
                }
            })
            .filter(|name| slug_from_filename(name).is_some())
            .collect();

        filenames.sort();
        filenames
    }
}
