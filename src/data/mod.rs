// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the raw image tree on disk and the
// cache-addressable LabelIndex.
//
// The pipeline flows in this order:
//
//   labelled image tree
//       │
//       ▼
//   index (builder)    → scans subdirectories, filters by
//       │                extension, sorts filenames
//       ▼
//   partition          → stable SHA-1 hash assigns each file
//       │                to training / testing / validation
//       ▼
//   LabelIndex         → immutable, addressable by
//                        (label, category, index)
//
// Each module is responsible for exactly one step.
//
// Reference: Rust Book §7 (Modules)

/// Scans the image tree and builds the LabelIndex
pub mod index;

/// Deterministic hash-based train/test/validation assignment
pub mod partition;
