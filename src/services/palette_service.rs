//! Cached palette with a prebuilt quantizer.
//!
//! Handlers ask for a [`PaletteSnapshot`] on every request. Within the TTL
//! the cached snapshot is shared as-is. After it expires the source is read
//! again, and the KD-tree is only rebuilt if the palette actually changed.

use lab_quantize::{PaletteEntry, Quantizer};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};

use crate::error::PaletteSourceError;
use crate::models::ColorRecord;
use crate::services::PaletteSource;

/// An immutable view of one loaded palette
pub struct PaletteSnapshot {
    /// Records in source order
    pub colors: Vec<ColorRecord>,
    /// Quantizer over `colors`; `None` when the source returned no colors
    pub quantizer: Option<Arc<Quantizer>>,
    /// SHA-256 of the palette contents, hex encoded
    pub fingerprint: String,
    loaded_at: Instant,
}

impl PaletteSnapshot {
    fn build(colors: Vec<ColorRecord>, previous: Option<&PaletteSnapshot>) -> Self {
        let fingerprint = palette_fingerprint(&colors);

        let quantizer = match previous {
            Some(prev) if prev.fingerprint == fingerprint => {
                tracing::debug!(%fingerprint, "Palette unchanged, reusing index");
                prev.quantizer.clone()
            }
            _ => match Quantizer::new(colors.iter().map(PaletteEntry::from).collect()) {
                Ok(q) => {
                    tracing::info!(colors = colors.len(), %fingerprint, "Built palette index");
                    Some(Arc::new(q))
                }
                Err(e) => {
                    tracing::warn!(%e, "Palette source returned no colors");
                    None
                }
            },
        };

        Self {
            colors,
            quantizer,
            fingerprint,
            loaded_at: Instant::now(),
        }
    }

    fn is_fresh(&self, ttl: Duration) -> bool {
        self.loaded_at.elapsed() < ttl
    }

    /// Number of colors in the palette
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Compute the identity of a palette.
///
/// The key is a SHA256 hash of every record's name, r, g and b in order.
pub fn palette_fingerprint(colors: &[ColorRecord]) -> String {
    let mut hasher = Sha256::new();

    for color in colors {
        // Length prefix keeps ("ab", ..) and ("a", "b"..) apart
        hasher.update((color.name.len() as u64).to_le_bytes());
        hasher.update(color.name.as_bytes());
        hasher.update([color.r, color.g, color.b]);
    }

    hex::encode(hasher.finalize())
}

/// Palette loader with a TTL cache
pub struct PaletteService {
    source: PaletteSource,
    ttl: Duration,
    cache: RwLock<Option<Arc<PaletteSnapshot>>>,
    /// Held by the one request currently reading the source
    refresh: Mutex<()>,
}

impl PaletteService {
    pub fn new(source: PaletteSource, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            cache: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    pub fn source(&self) -> &PaletteSource {
        &self.source
    }

    /// Current palette, loading it from the source if the cache is stale
    ///
    /// Only one request reads the source at a time. While it does, other
    /// requests get the expired snapshot instead of waiting. If a reload
    /// fails while an older snapshot exists, the old snapshot is served and
    /// the error is logged.
    pub async fn snapshot(&self) -> Result<Arc<PaletteSnapshot>, PaletteSourceError> {
        let cached = self.cache.read().await.clone();
        if let Some(snapshot) = cached.as_ref().filter(|s| s.is_fresh(self.ttl)) {
            return Ok(snapshot.clone());
        }

        let _refresh = match (self.refresh.try_lock(), &cached) {
            (Ok(guard), _) => guard,
            (Err(_), Some(stale)) => {
                tracing::debug!("Palette reload in progress, serving cached palette");
                return Ok(stale.clone());
            }
            (Err(_), None) => self.refresh.lock().await,
        };

        // Another request may have refreshed while we waited for the lock
        let current = self.cache.read().await.clone();
        if let Some(snapshot) = current.as_ref().filter(|s| s.is_fresh(self.ttl)) {
            return Ok(snapshot.clone());
        }

        match self.source.fetch().await {
            Ok(colors) => {
                let snapshot = Arc::new(PaletteSnapshot::build(colors, current.as_deref()));
                *self.cache.write().await = Some(snapshot.clone());
                Ok(snapshot)
            }
            Err(e) => match current {
                Some(stale) => {
                    tracing::warn!(%e, "Palette reload failed, serving cached palette");
                    Ok(stale)
                }
                None => Err(e),
            },
        }
    }

    /// Drop the cached palette so the next request reloads it
    pub async fn invalidate(&self) {
        let mut cache = self.cache.write().await;
        *cache = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetLoader;
    use crate::models::PaletteSourceConfig;
    use std::path::Path;

    fn file_service(path: &Path, ttl: Duration) -> PaletteService {
        let source = PaletteSource::new(
            PaletteSourceConfig::File {
                path: path.to_path_buf(),
            },
            Arc::new(AssetLoader::default()),
        )
        .unwrap();
        PaletteService::new(source, ttl)
    }

    #[tokio::test]
    async fn test_snapshot_is_cached_within_ttl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        std::fs::write(&path, r#"[{"name":"Red","r":255,"g":0,"b":0}]"#).unwrap();

        let service = file_service(&path, Duration::from_secs(3600));
        let first = service.snapshot().await.unwrap();

        std::fs::write(&path, r#"[{"name":"Blue","r":0,"g":0,"b":255}]"#).unwrap();
        let second = service.snapshot().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.colors[0].name, "Red");
    }

    #[tokio::test]
    async fn test_expired_snapshot_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        std::fs::write(&path, r#"[{"name":"Red","r":255,"g":0,"b":0}]"#).unwrap();

        let service = file_service(&path, Duration::ZERO);
        let first = service.snapshot().await.unwrap();

        std::fs::write(&path, r#"[{"name":"Blue","r":0,"g":0,"b":255}]"#).unwrap();
        let second = service.snapshot().await.unwrap();

        assert_eq!(second.colors[0].name, "Blue");
        assert_ne!(first.fingerprint, second.fingerprint);
    }

    #[tokio::test]
    async fn test_unchanged_palette_reuses_quantizer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        std::fs::write(&path, r#"[{"name":"Red","r":255,"g":0,"b":0}]"#).unwrap();

        let service = file_service(&path, Duration::ZERO);
        let first = service.snapshot().await.unwrap();
        let second = service.snapshot().await.unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(
            first.quantizer.as_ref().unwrap(),
            second.quantizer.as_ref().unwrap()
        ));
    }

    #[tokio::test]
    async fn test_empty_palette_has_no_quantizer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        std::fs::write(&path, "[]").unwrap();

        let snapshot = file_service(&path, Duration::from_secs(60))
            .snapshot()
            .await
            .unwrap();
        assert!(snapshot.is_empty());
        assert!(snapshot.quantizer.is_none());
    }

    #[tokio::test]
    async fn test_failed_reload_serves_stale() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        std::fs::write(&path, r#"[{"name":"Red","r":255,"g":0,"b":0}]"#).unwrap();

        let service = file_service(&path, Duration::ZERO);
        service.snapshot().await.unwrap();

        std::fs::remove_file(&path).unwrap();
        let stale = service.snapshot().await.unwrap();
        assert_eq!(stale.colors[0].name, "Red");

        service.invalidate().await;
        assert!(service.snapshot().await.is_err());
    }

    fn red_blue() -> Vec<ColorRecord> {
        vec![
            ColorRecord::new("Red", 255, 0, 0),
            ColorRecord::new("Blue", 0, 0, 255),
        ]
    }

    #[test]
    fn test_fingerprint_identity() {
        let base = palette_fingerprint(&red_blue());
        assert_eq!(base, palette_fingerprint(&red_blue()));
        assert_eq!(base.len(), 64);

        let mut renamed = red_blue();
        renamed[0].name = "Crimson".to_string();
        assert_ne!(base, palette_fingerprint(&renamed));

        let mut recolored = red_blue();
        recolored[1].b = 254;
        assert_ne!(base, palette_fingerprint(&recolored));

        let mut reordered = red_blue();
        reordered.reverse();
        assert_ne!(base, palette_fingerprint(&reordered));
    }

    #[test]
    fn test_fingerprint_name_boundaries() {
        let a = vec![ColorRecord::new("ab", 1, 2, 3)];
        let b = vec![ColorRecord::new("a", 98, 1, 2), ColorRecord::new("", 3, 0, 0)];
        assert_ne!(palette_fingerprint(&a), palette_fingerprint(&b));
        assert_ne!(palette_fingerprint(&[]), palette_fingerprint(&a));
    }

    #[tokio::test]
    async fn test_changed_palette_rebuilds_quantizer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        std::fs::write(&path, r#"[{"name":"Red","r":255,"g":0,"b":0}]"#).unwrap();

        let service = file_service(&path, Duration::ZERO);
        let first = service.snapshot().await.unwrap();

        std::fs::write(&path, r#"[{"name":"Red","r":254,"g":0,"b":0}]"#).unwrap();
        let second = service.snapshot().await.unwrap();

        assert!(!Arc::ptr_eq(
            first.quantizer.as_ref().unwrap(),
            second.quantizer.as_ref().unwrap()
        ));
        let entry = &second.quantizer.as_ref().unwrap().index().entries()[0];
        assert_eq!(entry.color.r, 254);
    }

    #[tokio::test]
    async fn test_expired_snapshot_served_during_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        std::fs::write(&path, r#"[{"name":"Red","r":255,"g":0,"b":0}]"#).unwrap();

        let service = file_service(&path, Duration::ZERO);
        let first = service.snapshot().await.unwrap();
        std::fs::write(&path, r#"[{"name":"Blue","r":0,"g":0,"b":255}]"#).unwrap();

        // Simulate a slow reload in another request
        let reload = service.refresh.lock().await;
        let during = tokio::time::timeout(Duration::from_secs(1), service.snapshot())
            .await
            .expect("expired snapshot should be served without waiting")
            .unwrap();
        assert!(Arc::ptr_eq(&first, &during));
        drop(reload);

        let after = service.snapshot().await.unwrap();
        assert_eq!(after.colors[0].name, "Blue");
    }
}
