// ============================================================
// Layer 4 — Label Index Builder
// ============================================================
// Scans a root image directory and builds the LabelIndex:
//
//   root/
//     My_Dogs/          ← label "my dogs"
//       dog_000.jpg
//       dog_001.jpeg
//     cats/             ← label "cats"
//       ...
//
// Only the immediate subdirectories of the root are scanned —
// nesting below that is not part of the layout. Files are
// accepted by a fixed extension allow-list (the case variants
// of jpg/jpeg), everything else is ignored.
//
// Base filenames are sorted before partitioning so the
// positional (label, category, index) addressing is identical
// on every machine, regardless of directory enumeration order.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use std::fs;
use std::path::Path;

use crate::data::partition::{assign_category, MAX_IMAGES_PER_LABEL, MIN_IMAGES_PER_LABEL};
use crate::domain::errors::IndexError;
use crate::domain::label_entry::{Category, LabelEntry, LabelIndex};

/// Accepted image extensions, matched exactly (case-sensitive).
const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "JPG", "JPEG"];

/// Scan `image_dir` and partition every label's files.
///
/// # Arguments
/// * `image_dir`      - Root directory, one subdirectory per label
/// * `testing_pct`    - Percentage of files reserved for testing
/// * `validation_pct` - Percentage of files reserved for validation
///
/// Subdirectories with no accepted files are skipped with a warning.
/// A missing root is a hard error — there is nothing to index.
pub fn build_label_index(
    image_dir:      &Path,
    testing_pct:    f64,
    validation_pct: f64,
) -> Result<LabelIndex, IndexError> {
    if !image_dir.is_dir() {
        return Err(IndexError::MissingDirectory(image_dir.to_path_buf()));
    }

    // Collect and sort the label subdirectories by name so the
    // index is built in a stable order
    let mut sub_dirs: Vec<String> = Vec::new();
    for entry in read_dir(image_dir)? {
        let entry = entry.map_err(|e| io_err(image_dir, e))?;
        let path  = entry.path();
        if path.is_dir() {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                sub_dirs.push(name.to_string());
            }
        }
    }
    sub_dirs.sort();

    let mut index = LabelIndex::new();

    for dir_name in sub_dirs {
        let sub_dir = image_dir.join(&dir_name);
        tracing::info!("Looking for images in '{}'", dir_name);

        // ── Collect accepted files ────────────────────────────────────────────
        let mut file_list: Vec<String> = Vec::new();
        for entry in read_dir(&sub_dir)? {
            let entry = entry.map_err(|e| io_err(&sub_dir, e))?;
            let path  = entry.path();

            let accepted = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|ext| IMAGE_EXTENSIONS.contains(&ext))
                .unwrap_or(false);

            if accepted && path.is_file() {
                match path.file_name().and_then(|n| n.to_str()) {
                    Some(base_name) => file_list.push(base_name.to_string()),
                    None => tracing::warn!(
                        "Skipping non-UTF-8 filename in '{}'",
                        sub_dir.display()
                    ),
                }
            }
        }

        if file_list.is_empty() {
            tracing::warn!("No image files found in '{}'", dir_name);
            continue;
        }
        if file_list.len() < MIN_IMAGES_PER_LABEL {
            tracing::warn!(
                "Folder '{}' has less than {} images, which may cause issues",
                dir_name,
                MIN_IMAGES_PER_LABEL
            );
        } else if file_list.len() as u64 > MAX_IMAGES_PER_LABEL {
            tracing::warn!(
                "Folder '{}' has more than {} images — some will never be selected",
                dir_name,
                MAX_IMAGES_PER_LABEL
            );
        }

        // Stable positional addressing across machines
        file_list.sort();

        // ── Partition into the three sets ─────────────────────────────────────
        let mut training   = Vec::new();
        let mut testing    = Vec::new();
        let mut validation = Vec::new();

        for base_name in file_list {
            match assign_category(&base_name, validation_pct, testing_pct) {
                Category::Training   => training.push(base_name),
                Category::Testing    => testing.push(base_name),
                Category::Validation => validation.push(base_name),
            }
        }

        let label_name = normalize_label(&dir_name);
        index.insert(
            label_name,
            LabelEntry { dir_name, training, testing, validation },
        );
    }

    Ok(index)
}

/// Lowercase the directory name and collapse every run of
/// characters outside [a-z0-9] into a single space:
/// "My_Dogs-2" → "my dogs 2".
fn normalize_label(dir_name: &str) -> String {
    let mut out = String::with_capacity(dir_name.len());
    let mut in_separator = false;

    for c in dir_name.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            out.push(c);
            in_separator = false;
        } else if !in_separator {
            out.push(' ');
            in_separator = true;
        }
    }
    out
}

fn read_dir(dir: &Path) -> Result<fs::ReadDir, IndexError> {
    fs::read_dir(dir).map_err(|e| io_err(dir, e))
}

fn io_err(path: &Path, source: std::io::Error) -> IndexError {
    IndexError::Io { path: path.to_path_buf(), source }
}
