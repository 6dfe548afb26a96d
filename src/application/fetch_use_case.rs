// ============================================================
// Layer 2 — FetchUseCase
// ============================================================
// Makes sure the pretrained model bundle is available locally,
// downloading and extracting it only when the frozen graph file
// is absent. Separated from `warm` so the (large) download can
// happen on a machine with network access and the cache warm on
// one without.

use std::path::PathBuf;

use anyhow::Result;

use crate::infra::model_fetcher::ModelFetcher;

// ─── Configuration ───────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub model_dir: PathBuf,
    pub url:       String,
}

// ─── FetchUseCase ────────────────────────────────────────────────────────────
pub struct FetchUseCase {
    config: FetchConfig,
}

impl FetchUseCase {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }

    /// Returns the path of the frozen graph file.
    pub fn execute(&self) -> Result<PathBuf> {
        let fetcher = ModelFetcher::new(&self.config.model_dir, &self.config.url);
        fetcher.ensure_model()
    }
}
