// ============================================================
// Layer 6 — Bottleneck Store
// ============================================================
// Write-once / read-many memoization of feature vectors.
//
// One cache file per (label, category, index) triple:
//
//   bottlenecks/
//     Cats/
//       cat_000.jpg.txt   ← 2048 comma-separated floats
//       cat_001.jpg.txt
//     Dogs/
//       ...
//
// File format: plain text, comma-separated decimal floats,
// no header, no trailing metadata. The path is derived from
// the LabelIndex, so the same scan always addresses the same
// sidecar file.
//
// get_or_create contract:
//   - entry absent   → run the adapter, write the vector
//   - entry present  → parse it
//   - parse failure  → regenerate exactly once, then either
//                      return the fresh vector or propagate.
//                      Never loops.
//
// Entries are written to a temp file in the destination
// directory and renamed into place, so a reader can never
// observe a half-written vector. Concurrent writers may
// duplicate work; the last rename wins with identical content.
//
// Reference: Rust Book §9 (Error Handling)
//            tempfile crate documentation (NamedTempFile::persist)

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tempfile::NamedTempFile;

use crate::domain::errors::CacheError;
use crate::domain::label_entry::{Category, LabelIndex};
use crate::domain::traits::InferenceAdapter;

/// Progress is logged every this many cache entries during a warm pass.
const WARM_LOG_INTERVAL: usize = 100;

pub struct BottleneckStore {
    /// Root of the labelled image tree (read side)
    image_dir: PathBuf,

    /// Root of the cache tree (write side), mirroring the
    /// per-label subdirectory layout of the image tree
    bottleneck_dir: PathBuf,
}

impl BottleneckStore {
    pub fn new(image_dir: impl Into<PathBuf>, bottleneck_dir: impl Into<PathBuf>) -> Self {
        Self {
            image_dir:      image_dir.into(),
            bottleneck_dir: bottleneck_dir.into(),
        }
    }

    /// Fetch the feature vector for one (label, category, index)
    /// triple, computing and persisting it on a cache miss.
    pub fn get_or_create(
        &self,
        index:    &LabelIndex,
        label:    &str,
        category: Category,
        position: usize,
        adapter:  &dyn InferenceAdapter,
    ) -> Result<Vec<f32>, CacheError> {
        let path = index.bottleneck_path(&self.bottleneck_dir, label, category, position)?;

        // mkdir -p for the per-label subdirectory; a no-op when it exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| CacheError::io(parent, e))?;
        }

        if !path.exists() {
            self.create_entry(index, label, category, position, &path, adapter)?;
        }

        let text = fs::read_to_string(&path).map_err(|e| CacheError::io(&path, e))?;
        match parse_vector(&text) {
            Ok(values) => Ok(values),
            Err(detail) => {
                // Stale or truncated entry on disk. Regenerate once;
                // a failure after a fresh write is terminal.
                tracing::warn!(
                    "Invalid float in '{}' ({}), recreating bottleneck",
                    path.display(),
                    detail
                );
                self.create_entry(index, label, category, position, &path, adapter)?;

                let text = fs::read_to_string(&path).map_err(|e| CacheError::io(&path, e))?;
                parse_vector(&text)
                    .map_err(|detail| CacheError::CorruptEntry { path: path.clone(), detail })
            }
        }
    }

    /// Fill the cache for every (label, category, index) triple,
    /// sequentially, in index order. Returns how many entries were
    /// visited. The first failure stops the run.
    pub fn warm(
        &self,
        index:   &LabelIndex,
        adapter: &dyn InferenceAdapter,
    ) -> Result<usize, CacheError> {
        let mut visited = 0usize;

        for (label_name, entry) in index.iter() {
            for category in Category::ALL {
                for position in 0..entry.files(category).len() {
                    self.get_or_create(index, label_name, category, position, adapter)?;
                    visited += 1;
                    if visited % WARM_LOG_INTERVAL == 0 {
                        tracing::info!("{} bottleneck files ready", visited);
                    }
                }
            }
        }

        Ok(visited)
    }

    /// Parallel variant of `warm`. Cache entries are independent,
    /// so the triples are fanned out across the rayon pool; each
    /// key still follows the read-check-compute-write-once path
    /// of `get_or_create`, including the single corruption retry.
    pub fn warm_parallel(
        &self,
        index:   &LabelIndex,
        adapter: &dyn InferenceAdapter,
    ) -> Result<usize, CacheError> {
        let keys: Vec<(&String, Category, usize)> = index
            .iter()
            .flat_map(|(label_name, entry)| {
                Category::ALL.into_iter().flat_map(move |category| {
                    (0..entry.files(category).len())
                        .map(move |position| (label_name, category, position))
                })
            })
            .collect();

        let visited = AtomicUsize::new(0);

        keys.par_iter().try_for_each(|&(label_name, category, position)| {
            self.get_or_create(index, label_name, category, position, adapter)?;
            let done = visited.fetch_add(1, Ordering::Relaxed) + 1;
            if done % WARM_LOG_INTERVAL == 0 {
                tracing::info!("{} bottleneck files ready", done);
            }
            Ok::<(), CacheError>(())
        })?;

        Ok(keys.len())
    }

    /// Run the adapter on the source image and write the vector.
    fn create_entry(
        &self,
        index:    &LabelIndex,
        label:    &str,
        category: Category,
        position: usize,
        path:     &Path,
        adapter:  &dyn InferenceAdapter,
    ) -> Result<(), CacheError> {
        let image_path = index.image_path(&self.image_dir, label, category, position)?;
        if !image_path.exists() {
            return Err(CacheError::MissingImage(image_path));
        }

        tracing::info!("Creating bottleneck file '{}'", path.display());

        let image_bytes = fs::read(&image_path).map_err(|e| CacheError::io(&image_path, e))?;

        let values = adapter
            .infer(&image_bytes)
            .map_err(|cause| CacheError::Inference { path: image_path.clone(), cause })?;

        let line = join_vector(&values);

        // Temp file in the destination directory, then rename into
        // place — the entry appears on disk all at once or not at all
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| CacheError::io(dir, e))?;
        tmp.write_all(line.as_bytes())
            .map_err(|e| CacheError::io(tmp.path(), e))?;
        tmp.persist(path)
            .map_err(|e| CacheError::io(path, e.error))?;

        Ok(())
    }
}

/// Serialise a vector as comma-separated decimal floats.
fn join_vector(values: &[f32]) -> String {
    let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    parts.join(",")
}

/// Parse the cache file format back into floats. The error value
/// names the first offending token.
fn parse_vector(text: &str) -> Result<Vec<f32>, String> {
    text.split(',')
        .map(|token| {
            token
                .trim()
                .parse::<f32>()
                .map_err(|e| format!("'{token}': {e}"))
        })
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::label_entry::LabelEntry;
    use anyhow::bail;
    use std::fs::File;
    use std::sync::atomic::AtomicUsize;
    use tempfile::tempdir;

    /// Counts invocations; returns a small fixed-shape vector
    /// derived from the byte length so distinct images differ.
    struct CountingAdapter {
        calls: AtomicUsize,
    }

    impl CountingAdapter {
        fn new() -> Self {
            Self { calls: AtomicUsize::new(0) }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl InferenceAdapter for CountingAdapter {
        fn feature_len(&self) -> usize {
            4
        }

        fn infer(&self, image_bytes: &[u8]) -> anyhow::Result<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let n = image_bytes.len() as f32;
            Ok(vec![n, n + 0.5, -n, 0.25])
        }
    }

    /// Always fails, counting attempts.
    struct FailingAdapter {
        calls: AtomicUsize,
    }

    impl InferenceAdapter for FailingAdapter {
        fn feature_len(&self) -> usize {
            4
        }

        fn infer(&self, _image_bytes: &[u8]) -> anyhow::Result<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            bail!("backend unavailable")
        }
    }

    /// One label "cats" with three training images on disk.
    fn fixture() -> (tempfile::TempDir, tempfile::TempDir, LabelIndex) {
        let images = tempdir().unwrap();
        let cache  = tempdir().unwrap();

        let dir = images.path().join("cats");
        fs::create_dir(&dir).unwrap();
        for (name, content) in [("a.jpg", "aaaa"), ("b.jpg", "bb"), ("c.jpg", "cccccc")] {
            fs::write(dir.join(name), content).unwrap();
        }

        let mut index = LabelIndex::new();
        index.insert(
            "cats",
            LabelEntry {
                dir_name:   "cats".into(),
                training:   vec!["a.jpg".into(), "b.jpg".into(), "c.jpg".into()],
                testing:    vec![],
                validation: vec![],
            },
        );
        (images, cache, index)
    }

    #[test]
    fn test_second_call_is_a_cache_hit() {
        let (images, cache, index) = fixture();
        let store   = BottleneckStore::new(images.path(), cache.path());
        let adapter = CountingAdapter::new();

        let first  = store
            .get_or_create(&index, "cats", Category::Training, 0, &adapter)
            .unwrap();
        let second = store
            .get_or_create(&index, "cats", Category::Training, 0, &adapter)
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(adapter.calls(), 1);
    }

    #[test]
    fn test_cache_file_is_comma_separated_floats() {
        let (images, cache, index) = fixture();
        let store   = BottleneckStore::new(images.path(), cache.path());
        let adapter = CountingAdapter::new();

        let values = store
            .get_or_create(&index, "cats", Category::Training, 1, &adapter)
            .unwrap();

        let path = cache.path().join("cats").join("b.jpg.txt");
        let text = fs::read_to_string(path).unwrap();
        assert_eq!(parse_vector(&text).unwrap(), values);
        // "b.jpg" holds 2 bytes
        assert_eq!(values, vec![2.0, 2.5, -2.0, 0.25]);
    }

    #[test]
    fn test_corrupt_entry_is_regenerated_once() {
        let (images, cache, index) = fixture();
        let store   = BottleneckStore::new(images.path(), cache.path());
        let adapter = CountingAdapter::new();

        store
            .get_or_create(&index, "cats", Category::Training, 0, &adapter)
            .unwrap();
        assert_eq!(adapter.calls(), 1);

        // Scribble over the entry with non-numeric text
        let path = cache.path().join("cats").join("a.jpg.txt");
        fs::write(&path, "1.0,garbage,3.0").unwrap();

        let values = store
            .get_or_create(&index, "cats", Category::Training, 0, &adapter)
            .unwrap();
        assert_eq!(adapter.calls(), 2);
        assert_eq!(values, vec![4.0, 4.5, -4.0, 0.25]);
    }

    #[test]
    fn test_failing_adapter_propagates_with_image_path() {
        let (images, cache, index) = fixture();
        let store   = BottleneckStore::new(images.path(), cache.path());
        let adapter = FailingAdapter { calls: AtomicUsize::new(0) };

        let err = store
            .get_or_create(&index, "cats", Category::Training, 0, &adapter)
            .unwrap_err();

        assert!(matches!(err, CacheError::Inference { .. }));
        // One attempt, no retry of the inference call itself
        assert_eq!(adapter.calls.load(Ordering::SeqCst), 1);
        assert!(err.to_string().contains("a.jpg"));
    }

    #[test]
    fn test_missing_image_is_reported() {
        let (images, cache, mut index) = fixture();
        index.insert(
            "ghosts",
            LabelEntry {
                dir_name:   "ghosts".into(),
                training:   vec!["nope.jpg".into()],
                testing:    vec![],
                validation: vec![],
            },
        );
        let store   = BottleneckStore::new(images.path(), cache.path());
        let adapter = CountingAdapter::new();

        let err = store
            .get_or_create(&index, "ghosts", Category::Training, 0, &adapter)
            .unwrap_err();
        assert!(matches!(err, CacheError::MissingImage(_)));
    }

    #[test]
    fn test_warm_visits_every_triple() {
        let (images, cache, index) = fixture();
        let store   = BottleneckStore::new(images.path(), cache.path());
        let adapter = CountingAdapter::new();

        let visited = store.warm(&index, &adapter).unwrap();
        assert_eq!(visited, 3);
        assert_eq!(adapter.calls(), 3);

        for name in ["a.jpg.txt", "b.jpg.txt", "c.jpg.txt"] {
            assert!(cache.path().join("cats").join(name).exists());
        }

        // A second warm pass is all cache hits
        let visited = store.warm(&index, &adapter).unwrap();
        assert_eq!(visited, 3);
        assert_eq!(adapter.calls(), 3);
    }

    #[test]
    fn test_parallel_warm_matches_sequential() {
        let (images, cache, index) = fixture();
        let store   = BottleneckStore::new(images.path(), cache.path());
        let adapter = CountingAdapter::new();

        let visited = store.warm_parallel(&index, &adapter).unwrap();
        assert_eq!(visited, 3);
        assert_eq!(adapter.calls(), 3);

        let sequential = BottleneckStore::new(images.path(), cache.path());
        for position in 0..3 {
            // Values agree with what a sequential read returns
            let v = sequential
                .get_or_create(&index, "cats", Category::Training, position, &adapter)
                .unwrap();
            assert_eq!(v.len(), 4);
        }
        assert_eq!(adapter.calls(), 3);
    }

    #[test]
    fn test_no_temp_debris_after_writes() {
        let (images, cache, index) = fixture();
        let store   = BottleneckStore::new(images.path(), cache.path());
        let adapter = CountingAdapter::new();
        store.warm(&index, &adapter).unwrap();

        let leftovers: Vec<_> = fs::read_dir(cache.path().join("cats"))
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .filter(|name| !name.ends_with(".txt"))
            .collect();
        assert!(leftovers.is_empty(), "unexpected files: {leftovers:?}");
    }

    #[test]
    fn test_empty_cache_file_counts_as_corrupt() {
        let (images, cache, index) = fixture();
        let store   = BottleneckStore::new(images.path(), cache.path());
        let adapter = CountingAdapter::new();

        // Pre-seed an empty (truncated) entry
        let dir = cache.path().join("cats");
        fs::create_dir_all(&dir).unwrap();
        File::create(dir.join("a.jpg.txt")).unwrap();

        let values = store
            .get_or_create(&index, "cats", Category::Training, 0, &adapter)
            .unwrap();
        assert_eq!(values.len(), 4);
        assert_eq!(adapter.calls(), 1);
    }
}
