//! folio-rs: a markdown article indexer and JSON content service
//!
//! The build step validates the front-matter of every article in a content
//! directory and writes a single JSON artifact. The content service loads that
//! artifact once and serves the index and raw article bodies over HTTP.

pub mod commands;
pub mod config;
pub mod content;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the base directory
pub const CONFIG_FILE: &str = "folio.yml";

/// The main application handle
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown content directory
    pub content_dir: PathBuf,
    /// Artifact output path
    pub output_path: PathBuf,
}

impl Folio {
    /// Create a new instance from a directory, reading `folio.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        Self::with_config(base_dir, None)
    }

    /// Create a new instance with an explicit config file. An explicit file
    /// must exist; the default one is optional.
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config_path: Option<&Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();

        let config = match config_path {
            Some(path) => {
                let path = base_dir.join(path);
                tracing::debug!("Loading config from {:?}", path);
                config::SiteConfig::load(&path)?
            }
            None => {
                let path = base_dir.join(CONFIG_FILE);
                if path.exists() {
                    tracing::debug!("Loading config from {:?}", path);
                    config::SiteConfig::load(&path)?
                } else {
                    config::SiteConfig::default()
                }
            }
        };

        let content_dir = base_dir.join(&config.content_dir);
        let output_path = base_dir.join(&config.output);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            output_path,
        })
    }

    /// Build the index and write the artifact
    pub fn build(&self) -> Result<content::Artifact> {
        commands::build::run(self)
    }

    /// Build the index without writing anything
    pub fn check(&self) -> Result<content::Artifact> {
        commands::build::check(self)
    }

    /// Load the artifact written by the last build
    pub fn load_artifact(&self) -> Result<content::Artifact> {
        content::Artifact::load(&self.output_path)
    }

    /// Remove the artifact
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
