//! Deterministic hashing to unit values
//!
//! Procedural placement must produce the same result for the same input on
//! every run and every platform, so it is driven by integer mixing rather
//! than a stateful RNG or floating point trigonometry.

/// Mix a 64-bit value (SplitMix64 finalizer)
#[inline]
pub fn mix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Pseudo-random value in `[0, 1)` derived from `seed` and `salt`
///
/// Different salts give independent values for the same seed.
#[inline]
pub fn hash_unit(seed: i64, salt: u32) -> f32 {
    let salted = (seed as u64) ^ mix64(salt as u64);
    // Top 24 bits fit an f32 mantissa exactly
    (mix64(salted) >> 40) as f32 / (1u32 << 24) as f32
}
