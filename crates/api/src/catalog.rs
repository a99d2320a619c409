//! Catalog loading and the swappable registry snapshot.
//!
//! The service reads three JSON arrays from disk (templates, image records,
//! editorial cards), builds a [`Registry`] from them and publishes the result
//! as an immutable [`CatalogSnapshot`]. Handlers clone the current `Arc` and
//! work against it; a reload builds a complete new snapshot before swapping
//! it in, so no reader ever sees a half-built catalog.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;

use curify_core::catalog::{ImageRecord, Template};
use curify_core::inspiration::InspirationCard;
use curify_core::prompt::missing_parameters;
use curify_core::registry::Registry;
use curify_core::types::Timestamp;

use crate::config::CatalogPaths;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Raw catalog contents as read from disk.
#[derive(Debug, Default)]
pub struct Catalog {
    pub templates: Vec<Template>,
    pub images: Vec<ImageRecord>,
    pub inspirations: Vec<InspirationCard>,
}

/// Read a JSON array of records.
///
/// The file must be a valid JSON array. A record that does not fit `T` is
/// logged and skipped so the rest of the file still loads.
async fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, CatalogError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: Vec<Value> = serde_json::from_slice(&bytes).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let total = raw.len();
    let records: Vec<T> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let id = value.get("id").and_then(Value::as_str).unwrap_or("-").to_string();
            match serde_json::from_value(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        index,
                        id,
                        error = %e,
                        "Skipping malformed catalog record"
                    );
                    None
                }
            }
        })
        .collect();

    if records.len() < total {
        tracing::warn!(
            path = %path.display(),
            skipped = total - records.len(),
            total,
            "Catalog file loaded with skipped records"
        );
    }
    Ok(records)
}

/// Read all catalog files.
///
/// Templates and images are required. A missing inspirations file is logged
/// and treated as an empty list; one that is not a JSON array is an error.
pub async fn load_catalog(paths: &CatalogPaths) -> Result<Catalog, CatalogError> {
    let templates = read_json_array(&paths.templates).await?;
    let images = read_json_array(&paths.images).await?;

    let inspirations = match read_json_array(&paths.inspirations).await {
        Ok(cards) => cards,
        Err(CatalogError::Io { path, source }) if source.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "Inspirations file not found, primary feed is empty");
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    Ok(Catalog {
        templates,
        images,
        inspirations,
    })
}

/// Log data-quality problems the registry tolerates but authors should fix.
fn report_catalog_issues(registry: &Registry) {
    for id in registry.duplicate_template_ids() {
        tracing::warn!(template_id = %id, "Duplicate template id, last definition wins");
    }

    for image_id in registry.orphan_image_ids() {
        tracing::warn!(image_id, "Image references an unknown template");
    }

    for template in registry.templates() {
        if registry.image_count(&template.id) == 0 {
            tracing::warn!(template_id = %template.id, "Template has no images, it gets no feed card");
        }
        for (locale, body) in &template.locales {
            let missing = missing_parameters(body);
            if !missing.is_empty() {
                tracing::warn!(
                    template_id = %template.id,
                    %locale,
                    missing = ?missing,
                    "Base prompt references placeholders with no parameter entry"
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// One fully built, immutable catalog generation.
#[derive(Debug)]
pub struct CatalogSnapshot {
    pub registry: Registry,
    pub inspirations: Vec<InspirationCard>,
    pub loaded_at: Timestamp,
    /// Starts at 1 and increases by one on every successful reload.
    pub generation: u64,
}

impl CatalogSnapshot {
    /// Build a snapshot from raw catalog data, logging any data-quality issues.
    pub fn build(catalog: Catalog, generation: u64) -> Self {
        let registry = Registry::build(catalog.templates, catalog.images);
        report_catalog_issues(&registry);

        tracing::info!(
            generation,
            templates = registry.template_count(),
            images = registry.images().len(),
            inspirations = catalog.inspirations.len(),
            "Catalog snapshot built"
        );

        Self {
            registry,
            inspirations: catalog.inspirations,
            loaded_at: chrono::Utc::now(),
            generation,
        }
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Holds the current snapshot and swaps it on reload.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application. The lock only guards the pointer swap;
/// readers hold their own `Arc` for as long as they need it.
pub struct CatalogStore {
    paths: CatalogPaths,
    current: RwLock<Arc<CatalogSnapshot>>,
}

impl CatalogStore {
    /// Load the catalog from `paths` and publish it as generation 1.
    pub async fn open(paths: CatalogPaths) -> Result<Self, CatalogError> {
        let catalog = load_catalog(&paths).await?;
        Ok(Self::from_catalog(paths, catalog))
    }

    /// Publish an already-loaded catalog as generation 1.
    pub fn from_catalog(paths: CatalogPaths, catalog: Catalog) -> Self {
        Self {
            paths,
            current: RwLock::new(Arc::new(CatalogSnapshot::build(catalog, 1))),
        }
    }

    /// The snapshot currently visible to readers.
    pub async fn snapshot(&self) -> Arc<CatalogSnapshot> {
        Arc::clone(&*self.current.read().await)
    }

    /// Re-read the catalog files and swap in a new snapshot.
    ///
    /// On failure the previous snapshot stays published.
    pub async fn reload(&self) -> Result<Arc<CatalogSnapshot>, CatalogError> {
        let catalog = load_catalog(&self.paths).await?;

        let mut current = self.current.write().await;
        let next = Arc::new(CatalogSnapshot::build(catalog, current.generation + 1));
        *current = Arc::clone(&next);
        Ok(next)
    }

    pub fn paths(&self) -> &CatalogPaths {
        &self.paths
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn write(dir: &Path, name: &str, value: serde_json::Value) {
        std::fs::write(dir.join(name), serde_json::to_vec(&value).unwrap()).unwrap();
    }

    fn write_catalog(dir: &Path, template_ids: &[&str]) {
        let templates: Vec<_> = template_ids
            .iter()
            .map(|id| {
                json!({
                    "id": id,
                    "locales": { "en": { "category": "C", "base_prompt": "{x}", "parameters": [] } }
                })
            })
            .collect();
        write(dir, "nano_templates.json", json!(templates));
        write(
            dir,
            "nano_images.json",
            json!([{ "id": "i1", "template_id": template_ids[0], "asset": { "image_url": "/1.jpg" } }]),
        );
    }

    #[tokio::test]
    async fn missing_inspirations_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(dir.path(), &["template-a"]);

        let catalog = load_catalog(&CatalogPaths::in_dir(dir.path())).await.unwrap();

        assert_eq!(catalog.templates.len(), 1);
        assert_eq!(catalog.images.len(), 1);
        assert!(catalog.inspirations.is_empty());
    }

    #[tokio::test]
    async fn missing_templates_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_catalog(&CatalogPaths::in_dir(dir.path())).await.unwrap_err();
        assert_matches!(err, CatalogError::Io { .. });
    }

    #[tokio::test]
    async fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(dir.path(), &["template-a"]);
        std::fs::write(dir.path().join("inspirations.json"), b"{ not json").unwrap();

        let err = load_catalog(&CatalogPaths::in_dir(dir.path())).await.unwrap_err();
        assert_matches!(err, CatalogError::Parse { ref path, .. } if path.ends_with("inspirations.json"));
    }

    #[tokio::test]
    async fn malformed_records_are_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(dir.path(), &["template-a"]);
        write(
            dir.path(),
            "nano_templates.json",
            json!([
                { "id": "template-a", "locales": { "en": { "category": "C", "base_prompt": "{x}" } } },
                { "id": "template-loose",
                  "locales": { "en": { "parameters": [{ "name": "n", "type": "number" }] } } },
                { "locales": { "en": { "category": "no id" } } }
            ]),
        );
        write(
            dir.path(),
            "nano_images.json",
            json!([
                { "id": "i1", "template_id": "template-a", "asset": { "image_url": "/1.jpg" } },
                { "id": "i2", "template_id": "template-a" }
            ]),
        );

        let catalog = load_catalog(&CatalogPaths::in_dir(dir.path())).await.unwrap();

        let ids: Vec<_> = catalog.templates.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["template-a", "template-loose"]);
        assert_eq!(catalog.images.len(), 1);
        assert_eq!(catalog.images[0].id, "i1");
    }

    #[tokio::test]
    async fn non_array_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(dir.path(), &["template-a"]);
        write(dir.path(), "nano_images.json", json!({ "id": "i1" }));

        let err = load_catalog(&CatalogPaths::in_dir(dir.path())).await.unwrap_err();
        assert_matches!(err, CatalogError::Parse { ref path, .. } if path.ends_with("nano_images.json"));
    }

    #[tokio::test]
    async fn reload_swaps_snapshot_and_bumps_generation() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(dir.path(), &["template-a"]);
        let store = CatalogStore::open(CatalogPaths::in_dir(dir.path())).await.unwrap();

        let before = store.snapshot().await;
        assert_eq!(before.generation, 1);

        write_catalog(dir.path(), &["template-a", "template-b"]);
        let after = store.reload().await.unwrap();

        assert_eq!(after.generation, 2);
        assert_eq!(after.registry.template_count(), 2);
        assert_eq!(store.snapshot().await.generation, 2);
        // Readers holding the old snapshot keep a consistent view.
        assert_eq!(before.registry.template_count(), 1);
    }

    #[tokio::test]
    async fn failed_reload_keeps_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(dir.path(), &["template-a"]);
        let store = CatalogStore::open(CatalogPaths::in_dir(dir.path())).await.unwrap();

        std::fs::write(dir.path().join("nano_templates.json"), b"[{").unwrap();

        assert!(store.reload().await.is_err());
        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.generation, 1);
        assert!(snapshot.registry.template("template-a").is_some());
    }
}
