//! Run the content service

use anyhow::Result;

use crate::server::{self, AllowedOrigins, Catalog};
use crate::Folio;

/// Options for the serve command; unset values fall back to the config file
#[derive(Debug, Clone, Default)]
pub struct ServeOptions {
    pub ip: Option<String>,
    pub port: Option<u16>,
    pub allowed_origins: Option<String>,
    /// Rebuild the artifact before serving
    pub build: bool,
}

/// Load (or build) the artifact and serve it until interrupted
pub async fn run(folio: &Folio, options: ServeOptions) -> Result<()> {
    let artifact = if options.build {
        folio.build()?
    } else {
        folio.load_artifact()?
    };

    let cors = allowed_origins(folio, options.allowed_origins.as_deref());
    let ip = options
        .ip
        .unwrap_or_else(|| folio.config.server.ip.clone());
    let port = options.port.unwrap_or(folio.config.server.port);

    let catalog = Catalog::from_artifact(artifact)?;
    server::start(catalog, cors, &ip, port).await
}

/// Resolve the CORS policy: flag or environment first, then the config file
pub fn allowed_origins(folio: &Folio, flag: Option<&str>) -> AllowedOrigins {
    AllowedOrigins::parse(flag.unwrap_or(&folio.config.allowed_origins))
}
