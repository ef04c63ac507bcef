//! Xorshift32 random stream.
//!
//! Every random decision in the engine (palette picks, coin flips, absorb
//! skips) draws from an explicit `&mut u32` state so a run is reproducible
//! from its seed. A zero state is a fixed point and must never be used.

/// Fallback state used when a derived seed collapses to zero.
const NONZERO_FALLBACK: u32 = 0x2545_F491;

/// Xorshift32 random number generator
#[inline]
pub fn xorshift32(state: &mut u32) -> u32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}

/// Fair coin. Uses the top bit, the low bits of xorshift32 are weaker.
#[inline]
pub fn coin(state: &mut u32) -> bool {
    xorshift32(state) >> 31 == 1
}

/// Uniform-ish value in `0..bound` (`bound` must be non-zero).
#[inline]
pub fn roll_below(state: &mut u32, bound: u32) -> u32 {
    debug_assert!(bound > 0);
    xorshift32(state) % bound
}

/// Derive an independent non-zero stream from `seed` and a `salt`
/// (worker band index, test run number, ...).
pub fn mix_seed(seed: u32, salt: u32) -> u32 {
    let mut state = seed ^ salt.wrapping_add(1).wrapping_mul(0x9E37_79B9);
    if state == 0 {
        state = NONZERO_FALLBACK;
    }
    // Two rounds decorrelate neighbouring salts.
    xorshift32(&mut state);
    xorshift32(&mut state);
    state
}
