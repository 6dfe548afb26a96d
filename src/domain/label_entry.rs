// ============================================================
// Layer 3 — Label Index Domain Types
// ============================================================
// A LabelIndex is the result of scanning a labelled image tree:
//
//   images/
//     cats/    ← directory name becomes the label "cats"
//       cat_000.jpg
//       cat_001.jpg
//     dogs/
//       dog_000.jpg
//
// Each label's files are partitioned into training / testing /
// validation sets at scan time. The index is immutable after
// the scan, and every path lookup is a pure function of its
// contents:
//
//   (label, category, index) → images/<dir_name>/<base_name>
//
// The cache sidecar for the same triple is the same path rooted
// at the cache directory with ".txt" appended.
//
// Reference: Rust Book §5 (Structs and Methods)
//            Rust Book §8 (Collections)

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::errors::IndexError;

// ─── Category ────────────────────────────────────────────────────────────────
/// Which split a file was assigned to.
///
/// Modelled as an enum rather than a string key, so a lookup with
/// an unknown category cannot be expressed at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Training,
    Testing,
    Validation,
}

impl Category {
    /// All categories, in the order a cache-warm pass visits them.
    pub const ALL: [Category; 3] = [Category::Training, Category::Testing, Category::Validation];

    /// Lowercase name, matching the on-disk manifest keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Training   => "training",
            Category::Testing    => "testing",
            Category::Validation => "validation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── LabelEntry ──────────────────────────────────────────────────────────────
/// One class label and its partitioned file lists.
///
/// File lists hold base filenames only (no directory components),
/// sorted, so that positional indexing is stable across machines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEntry {
    /// The original subdirectory name — kept verbatim because the
    /// label name is normalised and no longer a valid path segment
    pub dir_name: String,

    pub training:   Vec<String>,
    pub testing:    Vec<String>,
    pub validation: Vec<String>,
}

impl LabelEntry {
    /// The file list for one category.
    pub fn files(&self, category: Category) -> &[String] {
        match category {
            Category::Training   => &self.training,
            Category::Testing    => &self.testing,
            Category::Validation => &self.validation,
        }
    }

    /// Total number of files across all three categories.
    pub fn total_files(&self) -> usize {
        self.training.len() + self.testing.len() + self.validation.len()
    }
}

// ─── LabelIndex ──────────────────────────────────────────────────────────────
/// Mapping from normalised label name to its LabelEntry.
///
/// Backed by a BTreeMap so iteration order is the label name order,
/// independent of insertion order or hash seeds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelIndex {
    labels: BTreeMap<String, LabelEntry>,
}

impl LabelIndex {
    pub fn new() -> Self {
        Self { labels: BTreeMap::new() }
    }

    pub fn insert(&mut self, label_name: impl Into<String>, entry: LabelEntry) {
        self.labels.insert(label_name.into(), entry);
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate labels in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &LabelEntry)> {
        self.labels.iter()
    }

    /// Checked lookup of a label.
    pub fn get(&self, label_name: &str) -> Result<&LabelEntry, IndexError> {
        self.labels
            .get(label_name)
            .ok_or_else(|| IndexError::MissingLabel(label_name.to_string()))
    }

    /// Resolve (label, category, index) to (dir_name, base_name).
    ///
    /// The index wraps modulo the category's file count, so callers
    /// can address with any non-negative index. An empty category
    /// is an error — there is nothing the index could wrap onto.
    pub fn resolve_file(
        &self,
        label_name: &str,
        category:   Category,
        index:      usize,
    ) -> Result<(&str, &str), IndexError> {
        let entry = self.get(label_name)?;
        let files = entry.files(category);

        if files.is_empty() {
            return Err(IndexError::EmptyCategory {
                label: label_name.to_string(),
                category,
            });
        }

        let base_name = &files[index % files.len()];
        Ok((&entry.dir_name, base_name))
    }

    /// Full path of the image behind (label, category, index),
    /// rooted at `image_dir`.
    pub fn image_path(
        &self,
        image_dir:  &Path,
        label_name: &str,
        category:   Category,
        index:      usize,
    ) -> Result<PathBuf, IndexError> {
        let (dir_name, base_name) = self.resolve_file(label_name, category, index)?;
        Ok(image_dir.join(dir_name).join(base_name))
    }

    /// Full path of the cache sidecar for the same triple, rooted at
    /// `bottleneck_dir`. Same resolution, with ".txt" appended to the
    /// image filename ("cat_000.jpg" → "cat_000.jpg.txt").
    pub fn bottleneck_path(
        &self,
        bottleneck_dir: &Path,
        label_name:     &str,
        category:       Category,
        index:          usize,
    ) -> Result<PathBuf, IndexError> {
        let (dir_name, base_name) = self.resolve_file(label_name, category, index)?;
        Ok(bottleneck_dir.join(dir_name).join(format!("{base_name}.txt")))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> LabelIndex {
        let mut index = LabelIndex::new();
        index.insert(
            "cats",
            LabelEntry {
                dir_name:   "Cats".to_string(),
                training:   vec!["a.jpg".into(), "b.jpg".into(), "c.jpg".into()],
                testing:    vec!["t.jpg".into()],
                validation: vec![],
            },
        );
        index
    }

    #[test]
    fn test_index_wraps_modulo_category_length() {
        let index = sample_index();
        // 3 training files → index 4 wraps to position 1
        let (_, base) = index.resolve_file("cats", Category::Training, 4).unwrap();
        assert_eq!(base, "b.jpg");
    }

    #[test]
    fn test_missing_label_is_an_error() {
        let index = sample_index();
        let err = index.resolve_file("zebras", Category::Training, 0).unwrap_err();
        assert!(matches!(err, IndexError::MissingLabel(l) if l == "zebras"));
    }

    #[test]
    fn test_empty_category_is_an_error() {
        let index = sample_index();
        let err = index.resolve_file("cats", Category::Validation, 0).unwrap_err();
        assert!(matches!(
            err,
            IndexError::EmptyCategory { category: Category::Validation, .. }
        ));
    }

    #[test]
    fn test_paths_use_dir_name_not_label_name() {
        let index = sample_index();
        let img = index
            .image_path(Path::new("images"), "cats", Category::Training, 0)
            .unwrap();
        // The directory component is the original "Cats", not the label key
        assert_eq!(img, PathBuf::from("images/Cats/a.jpg"));
    }

    #[test]
    fn test_bottleneck_path_appends_txt() {
        let index = sample_index();
        let side = index
            .bottleneck_path(Path::new("cache"), "cats", Category::Testing, 0)
            .unwrap();
        assert_eq!(side, PathBuf::from("cache/Cats/t.jpg.txt"));
    }

    #[test]
    fn test_iteration_is_name_ordered() {
        let mut index = sample_index();
        index.insert(
            "aardvarks",
            LabelEntry {
                dir_name:   "aardvarks".into(),
                training:   vec!["x.jpg".into()],
                testing:    vec![],
                validation: vec![],
            },
        );
        let names: Vec<&String> = index.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["aardvarks", "cats"]);
    }
}
