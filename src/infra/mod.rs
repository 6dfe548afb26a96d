// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting persistence concerns:
//
//   bottleneck_store.rs — The feature-vector cache itself.
//                         One comma-separated text sidecar per
//                         (label, category, index) triple,
//                         computed on miss, parsed on hit,
//                         regenerated once on corruption.
//
//   model_fetcher.rs    — Download-and-extract of the pretrained
//                         model bundle, consulted only when the
//                         frozen graph is absent locally.
//
//   index_store.rs      — JSON manifest of the label index, so
//                         later runs share one scan's addressing.
//
//   report.rs           — CSV snapshot of per-label partition
//                         sizes for offline analysis.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Feature-vector cache (get-or-create, warm passes)
pub mod bottleneck_store;

/// Pretrained model bundle download and extraction
pub mod model_fetcher;

/// Label index JSON persistence
pub mod index_store;

/// Partition summary CSV writer
pub mod report;
