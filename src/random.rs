//! Random sampling helpers.
//!
//! The operators never own a random engine; callers pass one in. These
//! helpers provide the partial Fisher–Yates shuffle the operators share,
//! plus a seeded engine constructor for reproducible runs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a deterministic random engine from a seed.
///
/// # Examples
///
/// ```
/// use gapp::random::create_rng;
/// use rand::Rng;
///
/// let mut a = create_rng(7);
/// let mut b = create_rng(7);
/// assert_eq!(a.random::<u64>(), b.random::<u64>());
/// ```
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Returns the identity permutation `[0, 1, ..., n - 1]`.
pub fn identity_indices(n: usize) -> Vec<usize> {
    (0..n).collect()
}

/// Partial Fisher–Yates shuffle over the first `count` positions.
///
/// Afterwards `indices[..count]` holds a uniformly random ordered sample,
/// drawn without replacement, of the original contents. Only `count`
/// random draws are made.
///
/// # Panics
/// Panics if `count` exceeds `indices.len()`.
pub fn partial_shuffle<R: Rng + ?Sized>(indices: &mut [usize], count: usize, rng: &mut R) {
    let n = indices.len();
    assert!(count <= n, "cannot sample {count} of {n} positions");

    for i in 0..count {
        let j = rng.random_range(i..n);
        indices.swap(i, j);
    }
}
