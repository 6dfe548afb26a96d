// ============================================================
// Layer 6 — Index Store
// ============================================================
// Persists the built LabelIndex as a JSON manifest next to the
// cache, so a later warm run (or a downstream trainer) can share
// one scan's (label, category, index) addressing instead of
// re-walking the image tree.
//
// Files:
//   <cache dir>/image_index.json — the index itself
//   <cache dir>/scan_config.json — the parameters that produced it
//
// The config is saved alongside because the percentages are part
// of the addressing: re-scanning with different thresholds moves
// files between categories and invalidates (category, index)
// positions recorded elsewhere.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::index_use_case::IndexConfig;
use crate::domain::label_entry::LabelIndex;

pub const INDEX_FILE_NAME: &str = "image_index.json";
pub const CONFIG_FILE_NAME: &str = "scan_config.json";

pub struct IndexStore {
    dir: PathBuf,
}

impl IndexStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn index_path(&self) -> PathBuf {
        self.dir.join(INDEX_FILE_NAME)
    }

    /// Write the manifest, creating the directory if needed.
    pub fn save(&self, index: &LabelIndex) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        let path = self.index_path();
        let json = serde_json::to_string_pretty(index)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write index manifest to '{}'", path.display()))?;

        tracing::debug!("Saved label index to '{}'", path.display());
        Ok(())
    }

    /// Load a previously saved manifest.
    pub fn load(&self) -> Result<LabelIndex> {
        let path = self.index_path();
        let json = fs::read_to_string(&path).with_context(|| {
            format!(
                "Cannot read index manifest '{}'. Run 'index' or 'warm' first.",
                path.display()
            )
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Record the scan parameters next to the manifest.
    pub fn save_config(&self, config: &IndexConfig) -> Result<()> {
        let path = self.dir.join(CONFIG_FILE_NAME);
        let json = serde_json::to_string_pretty(config)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write scan config to '{}'", path.display()))?;
        Ok(())
    }

    /// Load the scan parameters a saved manifest was built with.
    pub fn load_config(&self) -> Result<IndexConfig> {
        let path = self.dir.join(CONFIG_FILE_NAME);
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read scan config '{}'", path.display()))?;
        Ok(serde_json::from_str(&json)?)
    }
}
