use std::path::{Path, PathBuf};

use curify_core::locale::Locale;
use curify_core::projection::DEFAULT_MAX_IMAGES_PER_TEMPLATE;

/// Default catalog file names inside `CATALOG_DIR`.
pub const DEFAULT_TEMPLATES_FILE: &str = "nano_templates.json";
pub const DEFAULT_IMAGES_FILE: &str = "nano_images.json";
pub const DEFAULT_INSPIRATIONS_FILE: &str = "inspirations.json";

/// Locations of the JSON catalog files the registry is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPaths {
    pub templates: PathBuf,
    pub images: PathBuf,
    /// Editorial cards. Optional: a missing file means an empty primary feed.
    pub inspirations: PathBuf,
}

impl CatalogPaths {
    /// Default file names under `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            templates: dir.join(DEFAULT_TEMPLATES_FILE),
            images: dir.join(DEFAULT_IMAGES_FILE),
            inspirations: dir.join(DEFAULT_INSPIRATIONS_FILE),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Grace period for in-flight requests after a shutdown signal (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Catalog file locations.
    pub catalog: CatalogPaths,
    /// Locale used when a request names none (default: `zh`).
    pub default_locale: Locale,
    /// Images per feed card when a request names no limit (default: `6`).
    pub feed_max_images: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                       |
    /// |-------------------------|-------------------------------|
    /// | `HOST`                  | `0.0.0.0`                     |
    /// | `PORT`                  | `3000`                        |
    /// | `CORS_ORIGINS`          | `http://localhost:3001`       |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                          |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                          |
    /// | `CATALOG_DIR`           | `./data`                      |
    /// | `TEMPLATES_FILE`        | `$CATALOG_DIR/nano_templates.json` |
    /// | `IMAGES_FILE`           | `$CATALOG_DIR/nano_images.json`    |
    /// | `INSPIRATIONS_FILE`     | `$CATALOG_DIR/inspirations.json`   |
    /// | `DEFAULT_LOCALE`        | `zh`                          |
    /// | `FEED_MAX_IMAGES`       | `6`                           |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3001".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let catalog_dir = std::env::var("CATALOG_DIR").unwrap_or_else(|_| "./data".into());
        let mut catalog = CatalogPaths::in_dir(&catalog_dir);
        if let Ok(path) = std::env::var("TEMPLATES_FILE") {
            catalog.templates = path.into();
        }
        if let Ok(path) = std::env::var("IMAGES_FILE") {
            catalog.images = path.into();
        }
        if let Ok(path) = std::env::var("INSPIRATIONS_FILE") {
            catalog.inspirations = path.into();
        }

        let default_locale = Locale::new(
            std::env::var("DEFAULT_LOCALE").unwrap_or_else(|_| Locale::ZH_TAG.into()),
        );

        let feed_max_images: usize = std::env::var("FEED_MAX_IMAGES")
            .unwrap_or_else(|_| DEFAULT_MAX_IMAGES_PER_TEMPLATE.to_string())
            .parse()
            .expect("FEED_MAX_IMAGES must be a valid usize");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            catalog,
            default_locale,
            feed_max_images,
        }
    }
}
