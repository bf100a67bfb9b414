//! Uniform draws on top of the raw generator stream threaded through the pipeline.
//!
//! Every stage pulls from the same caller-owned generator in a fixed order, so a
//! given seed always reproduces the same city.

use rand_chacha::rand_core::Rng;

/// Uniform value in `[0, 1)` with 53 bits of precision.
pub(super) fn unit_f64<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    (rng.next_u64() >> 11) as f64 * (1.0 / (1_u64 << 53) as f64)
}

/// Uniform value in `[-magnitude, magnitude)`.
pub(super) fn symmetric_offset<R: Rng + ?Sized>(rng: &mut R, magnitude: f64) -> f64 {
    (unit_f64(rng) * 2.0 - 1.0) * magnitude
}

pub(super) fn chance<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    unit_f64(rng) < probability
}

/// Seed for the noise sampler, drawn from the pipeline stream.
pub(super) fn noise_seed<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    i32::from_ne_bytes(rng.next_u32().to_ne_bytes())
}
