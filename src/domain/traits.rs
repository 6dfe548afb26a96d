// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// By programming against traits instead of concrete types,
// we can swap implementations without changing the code
// that uses them:
//   - HashProjectionAdapter implements InferenceAdapter
//   - A frozen-graph runtime (TensorFlow, ONNX, ...) could
//     also implement InferenceAdapter
//   - The cache layer only sees InferenceAdapter and works
//     with both without any changes
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

// ─── InferenceAdapter ─────────────────────────────────────────────────────────
/// A frozen model, reduced to the one operation the cache needs:
/// raw image bytes in, fixed-length feature vector out.
///
/// `Sync` because a parallel cache-warm pass shares one adapter
/// across worker threads.
///
/// Implementations:
///   - HashProjectionAdapter → deterministic stand-in backend
///   - (future) a real frozen-graph runtime
pub trait InferenceAdapter: Sync {
    /// Length of every vector `infer` returns.
    fn feature_len(&self) -> usize;

    /// Map raw image bytes to a feature vector of `feature_len()`
    /// floats. Must be a pure function of the bytes.
    fn infer(&self, image_bytes: &[u8]) -> Result<Vec<f32>>;
}
