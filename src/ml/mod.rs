// ============================================================
// Layer 5 — ML Layer
// ============================================================
// Implementations of the InferenceAdapter trait. The cache and
// application layers only ever see the trait, so a real frozen
// graph runtime drops in here without touching them.

/// Deterministic stand-in inference backend
pub mod adapter;

/// Bottleneck width of the Inception-v3 pool_3 layer — the
/// feature length a real backend for the default bundle produces.
pub const DEFAULT_FEATURE_LEN: usize = 2048;
