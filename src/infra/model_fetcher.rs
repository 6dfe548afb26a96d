// ============================================================
// Layer 6 — Model Fetcher
// ============================================================
// One-time download-and-extract of the pretrained model bundle.
//
// The bundle is a .tgz archive containing the frozen inference
// graph. The fetcher is consulted only when the graph file is
// absent locally:
//
//   model/
//     inception-2015-12-05.tgz        ← downloaded archive
//     classify_image_graph_def.pb     ← extracted frozen graph
//     ...
//
// Resolution order:
//   1. Graph file present          → return its path, no network
//   2. Archive present             → extract, return graph path
//   3. Neither                     → download archive, extract
//
// Downloads land in a temp file and are renamed into place, so
// an interrupted transfer never leaves a truncated archive
// behind to poison the next run.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use flate2::read::GzDecoder;
use tar::Archive;
use tempfile::NamedTempFile;

/// Pretrained Inception-v3 bundle (2048-float bottleneck layer).
pub const DEFAULT_MODEL_URL: &str =
    "http://download.tensorflow.org/models/image/imagenet/inception-2015-12-05.tgz";

/// Frozen graph filename inside the bundle.
pub const GRAPH_FILE_NAME: &str = "classify_image_graph_def.pb";

pub struct ModelFetcher {
    /// Directory the archive and its contents live in
    model_dir: PathBuf,

    /// Where to fetch the bundle from when it is missing
    url: String,
}

impl ModelFetcher {
    pub fn new(model_dir: impl Into<PathBuf>, url: impl Into<String>) -> Self {
        Self { model_dir: model_dir.into(), url: url.into() }
    }

    /// Path the frozen graph will have once the bundle is in place.
    pub fn graph_path(&self) -> PathBuf {
        self.model_dir.join(GRAPH_FILE_NAME)
    }

    /// Make sure the frozen graph exists locally, downloading and
    /// extracting the bundle if needed. Returns the graph path.
    pub fn ensure_model(&self) -> Result<PathBuf> {
        let graph = self.graph_path();
        if graph.exists() {
            tracing::info!("Model graph already present at '{}'", graph.display());
            return Ok(graph);
        }

        fs::create_dir_all(&self.model_dir)
            .with_context(|| format!("Cannot create model dir '{}'", self.model_dir.display()))?;

        let archive = self.archive_path();
        if archive.exists() {
            tracing::info!("Model archive already present at '{}'", archive.display());
        } else {
            self.download(&archive)?;
        }

        self.extract(&archive)?;

        if !graph.exists() {
            bail!(
                "Archive '{}' did not contain '{}'",
                archive.display(),
                GRAPH_FILE_NAME
            );
        }
        Ok(graph)
    }

    /// Local path of the archive: model dir + last URL segment.
    fn archive_path(&self) -> PathBuf {
        let filename = self
            .url
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("model.tgz");
        self.model_dir.join(filename)
    }

    fn download(&self, dest: &Path) -> Result<()> {
        tracing::info!("Model graph missing — downloading '{}'", self.url);

        let mut response = reqwest::blocking::get(&self.url)
            .with_context(|| format!("Cannot reach '{}'", self.url))?
            .error_for_status()
            .with_context(|| format!("Download of '{}' was refused", self.url))?;

        let mut tmp = NamedTempFile::new_in(&self.model_dir)
            .with_context(|| "Cannot create temp file for download")?;
        let bytes = response
            .copy_to(&mut tmp)
            .with_context(|| format!("Transfer of '{}' failed", self.url))?;
        tmp.persist(dest)
            .with_context(|| format!("Cannot move download into '{}'", dest.display()))?;

        tracing::info!("Download complete: '{}' ({} bytes)", dest.display(), bytes);
        Ok(())
    }

    fn extract(&self, archive: &Path) -> Result<()> {
        tracing::info!("Extracting '{}'", archive.display());

        let file = File::open(archive)
            .with_context(|| format!("Cannot open archive '{}'", archive.display()))?;
        let decoder = GzDecoder::new(file);
        Archive::new(decoder)
            .unpack(&self.model_dir)
            .with_context(|| format!("Cannot extract '{}'", archive.display()))?;
        Ok(())
    }
}
