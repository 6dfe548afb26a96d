// ============================================================
// Layer 3 — Typed Errors
// ============================================================
// Two error enums, one per failure domain:
//
//   IndexError — problems building or querying the label index.
//                MissingLabel / EmptyCategory indicate a caller
//                bug (addressing an index that was never built
//                that way); MissingDirectory and Io are
//                environmental.
//
//   CacheError — problems producing a bottleneck vector.
//                Inference failures carry the offending image
//                path and are never retried. CorruptEntry is
//                only returned after the single regeneration
//                attempt has also produced an unparsable file.
//
// Reference: Rust Book §9 (Error Handling)
//            thiserror crate documentation

use std::path::{Path, PathBuf};

use crate::domain::label_entry::Category;

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("Image directory '{0}' not found")]
    MissingDirectory(PathBuf),

    #[error("Label '{0}' does not exist in the index")]
    MissingLabel(String),

    #[error("Label '{label}' has no images in the {category} set")]
    EmptyCategory { label: String, category: Category },

    #[error("Cannot read directory '{path}': {source}")]
    Io { path: PathBuf, source: std::io::Error },
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error("Image file '{0}' does not exist")]
    MissingImage(PathBuf),

    // Returned only after the regeneration attempt: a freshly
    // written entry that still fails to parse means the adapter
    // produced something unrepresentable, not stale disk state.
    #[error("Bottleneck file '{path}' is corrupt after regeneration: {detail}")]
    CorruptEntry { path: PathBuf, detail: String },

    #[error("Inference failed on '{path}': {cause}")]
    Inference { path: PathBuf, cause: anyhow::Error },

    #[error("I/O error on '{path}': {source}")]
    Io { path: PathBuf, source: std::io::Error },
}

impl CacheError {
    /// Attach the path a filesystem operation was touching.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        CacheError::Io { path: path.as_ref().to_path_buf(), source }
    }
}
