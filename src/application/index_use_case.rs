// ============================================================
// Layer 2 — IndexUseCase
// ============================================================
// Orchestrates a scan-only run:
//
//   Step 1: Build the label index      (Layer 4 - data)
//   Step 2: Persist the JSON manifest  (Layer 6 - infra)
//   Step 3: Write the summary CSV      (Layer 6 - infra)

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::index::build_label_index;
use crate::domain::label_entry::LabelIndex;
use crate::infra::{index_store::IndexStore, report::SummaryWriter};

// ─── Configuration ───────────────────────────────────────────────────────────
// Everything a scan needs, passed explicitly — no module-level
// directory constants. Serialisable so the manifest records how
// it was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    pub image_dir:      PathBuf,
    pub cache_dir:      PathBuf,
    pub validation_pct: f64,
    pub testing_pct:    f64,
}

// ─── IndexUseCase ────────────────────────────────────────────────────────────
pub struct IndexUseCase {
    config: IndexConfig,
}

impl IndexUseCase {
    pub fn new(config: IndexConfig) -> Self {
        Self { config }
    }

    /// Scan, persist, summarise. Returns the built index so the
    /// warm use case (and tests) can reuse it directly.
    pub fn execute(&self) -> Result<LabelIndex> {
        let cfg = &self.config;

        // ── Step 1: Scan the image tree ───────────────────────────────────────
        tracing::info!("Scanning image tree '{}'", cfg.image_dir.display());
        let index = build_label_index(&cfg.image_dir, cfg.testing_pct, cfg.validation_pct)?;
        if index.is_empty() {
            tracing::warn!(
                "No labels with image files found under '{}'",
                cfg.image_dir.display()
            );
        }
        tracing::info!("Indexed {} labels", index.len());

        for (label_name, entry) in index.iter() {
            tracing::info!(
                "  {}: {} training / {} testing / {} validation",
                label_name,
                entry.training.len(),
                entry.testing.len(),
                entry.validation.len(),
            );
        }

        // ── Step 2: Persist the manifest and the scan parameters ──────────────
        let store = IndexStore::new(&cfg.cache_dir);
        store.save(&index)?;
        store.save_config(cfg)?;

        // ── Step 3: Partition summary CSV ─────────────────────────────────────
        SummaryWriter::new(&cfg.cache_dir)?.write(&index)?;

        Ok(index)
    }
}
