// ============================================================
// Layer 4 — Stable Hash Partitioner
// ============================================================
// Assigns each image file to training / testing / validation.
//
// The assignment is NOT random. It is a pure function of the
// filename, so the same file lands in the same set on every
// run and on every machine. This is what makes experiments
// reproducible: adding new images to a folder never moves an
// existing image between sets, which would silently leak
// training data into the validation results.
//
// Algorithm, per filename:
//   1. Strip any "_nohash_..." suffix. Files that differ only
//      in that suffix (e.g. "cat_nohash_1.jpg", "cat_nohash_2.jpg")
//      are near-duplicates of the same photo and must all land
//      in the same set.
//   2. SHA-1 the remaining name (160-bit digest).
//   3. Reduce modulo 2^27 and scale into [0, 100).
//   4. Compare against the validation% / testing% thresholds:
//        [0, validation%)                        → validation
//        [validation%, validation% + testing%)   → testing
//        the rest                                → training
//
// The 2^27 − 1 constant doubles as the per-label image limit:
// beyond it, distinct images can collide onto the same bucket
// and some would never be selected.
//
// Reference: Rust Book §8 (Slices)
//            sha1 crate documentation

use sha1::{Digest, Sha1};

use crate::domain::label_entry::Category;

/// Largest number of images a single label can usefully hold.
pub const MAX_IMAGES_PER_LABEL: u64 = (1 << 27) - 1;

/// Labels with fewer files than this are flagged as unreliable
/// (still indexed — small fixtures are common in early runs).
pub const MIN_IMAGES_PER_LABEL: usize = 20;

/// Deterministically assign one filename to a category.
///
/// # Arguments
/// * `file_name`      - Base filename, e.g. "cat_000.jpg"
/// * `validation_pct` - Percentage of files for validation, e.g. 10.0
/// * `testing_pct`    - Percentage of files for testing, e.g. 10.0
pub fn assign_category(file_name: &str, validation_pct: f64, testing_pct: f64) -> Category {
    // "_nohash_" and everything after it is ignored for hashing
    let stable_name = file_name.split("_nohash_").next().unwrap_or(file_name);

    let digest = Sha1::digest(stable_name.as_bytes());

    // Fold the digest into a u64. The shift discards high bits as
    // it goes, which is exactly a reduction mod 2^64 — and since
    // 2^27 divides 2^64, the final mod 2^27 is unchanged by it.
    let mut folded: u64 = 0;
    for &byte in digest.iter() {
        folded = (folded << 8) | u64::from(byte);
    }
    let bucket = folded % (MAX_IMAGES_PER_LABEL + 1);

    // Scale the bucket into a percentage in [0, 100]
    let percentage = bucket as f64 * (100.0 / MAX_IMAGES_PER_LABEL as f64);

    if percentage < validation_pct {
        Category::Validation
    } else if percentage < validation_pct + testing_pct {
        Category::Testing
    } else {
        Category::Training
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_is_deterministic() {
        let first  = assign_category("kitten_001.jpg", 10.0, 10.0);
        let second = assign_category("kitten_001.jpg", 10.0, 10.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_nohash_suffix_is_ignored() {
        // Both names hash as "whiskers"
        let with_suffix = assign_category("whiskers_nohash_42.jpg", 10.0, 10.0);
        let bare        = assign_category("whiskers", 10.0, 10.0);
        assert_eq!(with_suffix, bare);
    }

    #[test]
    fn test_zero_percentages_give_training() {
        for name in ["cat_000.jpg", "rover.jpg", "mittens.JPG"] {
            assert_eq!(assign_category(name, 0.0, 0.0), Category::Training);
        }
    }

    // Fixed expectations for known filenames at 10% / 10%.
    // "whiskers" hashes to percentage ≈ 32.77, "mittens.JPG"
    // to ≈ 18.73, "cat_002.jpg" to ≈ 3.46.
    #[test]
    fn test_known_assignments() {
        assert_eq!(assign_category("rover.jpg",   10.0, 10.0), Category::Training);
        assert_eq!(assign_category("mittens.JPG", 10.0, 10.0), Category::Testing);
        assert_eq!(assign_category("cat_002.jpg", 10.0, 10.0), Category::Validation);
    }

    #[test]
    fn test_thresholds_move_the_same_file_between_sets() {
        // "whiskers" sits at ≈ 32.77%: below a 35% validation
        // threshold, inside a [10, 35) testing band, and in
        // training when both bands end before it.
        assert_eq!(assign_category("whiskers", 35.0, 10.0), Category::Validation);
        assert_eq!(assign_category("whiskers", 10.0, 25.0), Category::Testing);
        assert_eq!(assign_category("whiskers", 10.0, 10.0), Category::Training);
    }
}
