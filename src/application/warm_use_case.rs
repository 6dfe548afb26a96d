// ============================================================
// Layer 2 — WarmUseCase
// ============================================================
// Orchestrates a full cache-warm run:
//
//   Step 1: Build the label index        (Layer 4 - data)
//   Step 2: Persist manifest + summary   (Layer 6 - infra)
//   Step 3: Build the inference adapter  (Layer 5 - ml)
//   Step 4: Fill the bottleneck cache    (Layer 6 - infra)
//
// Warming ahead of training pays the inference cost once; every
// later epoch reads the cached vectors instead of re-running the
// frozen graph over the same images.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::application::index_use_case::{IndexConfig, IndexUseCase};
use crate::infra::bottleneck_store::BottleneckStore;
use crate::ml::adapter::HashProjectionAdapter;

// ─── Configuration ───────────────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarmConfig {
    pub image_dir:      PathBuf,
    pub cache_dir:      PathBuf,
    pub validation_pct: f64,
    pub testing_pct:    f64,
    pub feature_len:    usize,
    pub parallel:       bool,
}

// ─── WarmUseCase ─────────────────────────────────────────────────────────────
pub struct WarmUseCase {
    config: WarmConfig,
}

impl WarmUseCase {
    pub fn new(config: WarmConfig) -> Self {
        Self { config }
    }

    /// Execute the warm pipeline end to end. Returns the number of
    /// cache entries visited.
    pub fn execute(&self) -> Result<usize> {
        let cfg = &self.config;

        // ── Steps 1–2: Scan and persist via the index use case ────────────────
        let index = IndexUseCase::new(IndexConfig {
            image_dir:      cfg.image_dir.clone(),
            cache_dir:      cfg.cache_dir.clone(),
            validation_pct: cfg.validation_pct,
            testing_pct:    cfg.testing_pct,
        })
        .execute()?;

        // ── Step 3: Inference adapter ─────────────────────────────────────────
        let adapter = HashProjectionAdapter::new(cfg.feature_len);

        // ── Step 4: Fill the cache ────────────────────────────────────────────
        let store = BottleneckStore::new(&cfg.image_dir, &cfg.cache_dir);
        let visited = if cfg.parallel {
            tracing::info!("Warming cache in parallel");
            store.warm_parallel(&index, &adapter)?
        } else {
            store.warm(&index, &adapter)?
        };

        tracing::info!("Cache warm complete: {} entries", visited);
        Ok(visited)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_warm_creates_a_sidecar_per_image() {
        let images = tempdir().unwrap();
        let cache  = tempdir().unwrap();

        let dir = images.path().join("cats");
        fs::create_dir(&dir).unwrap();
        for i in 0..5 {
            fs::write(dir.join(format!("cat_{i:03}.jpg")), format!("img-{i}")).unwrap();
        }

        let use_case = WarmUseCase::new(WarmConfig {
            image_dir:      images.path().to_path_buf(),
            cache_dir:      cache.path().to_path_buf(),
            validation_pct: 10.0,
            testing_pct:    10.0,
            feature_len:    16,
            parallel:       false,
        });

        let visited = use_case.execute().unwrap();
        assert_eq!(visited, 5);

        let sidecars = fs::read_dir(cache.path().join("cats"))
            .unwrap()
            .filter(|e| {
                e.as_ref()
                    .unwrap()
                    .file_name()
                    .to_string_lossy()
                    .ends_with(".txt")
            })
            .count();
        assert_eq!(sidecars, 5);
    }
}
