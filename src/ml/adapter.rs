// ============================================================
// Layer 5 — Hash Projection Adapter
// ============================================================
// A deterministic stand-in for a frozen-graph runtime: projects
// the raw image bytes onto a pseudo-feature vector by seeding a
// xorshift generator with the SHA-1 of the bytes.
//
// The output carries no visual meaning — it exists so the whole
// index → cache → sidecar pipeline can be exercised end to end
// (and inspected on disk) without a TensorFlow installation.
// Swapping in a real backend is a one-line change at the
// call site, since both sides implement InferenceAdapter.
//
// Properties the cache relies on and this backend preserves:
//   - pure function of the input bytes
//   - fixed output length
//   - every value is a finite float

use anyhow::{bail, Result};
use sha1::{Digest, Sha1};

use crate::domain::traits::InferenceAdapter;

pub struct HashProjectionAdapter {
    feature_len: usize,
}

impl HashProjectionAdapter {
    pub fn new(feature_len: usize) -> Self {
        Self { feature_len }
    }
}

impl InferenceAdapter for HashProjectionAdapter {
    fn feature_len(&self) -> usize {
        self.feature_len
    }

    fn infer(&self, image_bytes: &[u8]) -> Result<Vec<f32>> {
        if image_bytes.is_empty() {
            bail!("empty image data");
        }

        // Seed from the digest's first 8 bytes; force non-zero
        // because xorshift has a fixed point at 0
        let digest = Sha1::digest(image_bytes);
        let mut state: u64 = 1;
        for &byte in &digest[..8] {
            state = (state << 8) | u64::from(byte);
        }
        state |= 1;

        let values = (0..self.feature_len)
            .map(|_| {
                // xorshift64*
                state ^= state >> 12;
                state ^= state << 25;
                state ^= state >> 27;
                let sample = state.wrapping_mul(0x2545_F491_4F6C_DD1D);
                // Top 24 bits → uniform float in [0, 1)
                (sample >> 40) as f32 / (1u32 << 24) as f32
            })
            .collect();

        Ok(values)
    }
}
