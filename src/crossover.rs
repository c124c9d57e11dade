//! Crossover operators.
//!
//! Both operators take two parents of equal gene length and return two
//! offspring. Parents are never modified. Offspring carry their parents'
//! fitness values (`a` for the first child, `b` for the second), which
//! are stale and must be re-evaluated by the caller.
//!
//! - [`k_points`]: swap alternating segments between `k` random cut points
//! - [`blx_alpha`]: BLX-α blend for real-valued genes
//!
//! # References
//!
//! - De Jong (1975), *An Analysis of the Behavior of a Class of Genetic
//!   Adaptive Systems* (multi-point crossover)
//! - Eshelman & Schaffer (1993), "Real-Coded Genetic Algorithms and
//!   Interval-Schemata" (BLX-α)

use crate::error::{Error, Result};
use crate::random::{identity_indices, partial_shuffle};
use crate::types::Individual;
use num_traits::{Float, NumCast, One, Zero};
use rand::distr::{Distribution, StandardUniform};
use rand::Rng;
use std::ops::{Add, Mul, Sub};

/// Numeric capabilities BLX-α needs from a gene type.
///
/// Implemented for every [`num_traits::Float`], so `f32` and `f64` work
/// out of the box.
pub trait BlendGene:
    Copy + PartialOrd + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self>
{
    /// Additive identity.
    fn zero() -> Self;

    /// Multiplicative identity.
    fn one() -> Self;

    /// Absolute value.
    fn abs(self) -> Self;

    /// Returns `true` for values that are neither infinite nor NaN.
    fn is_finite(self) -> bool;

    /// Converts a spread parameter into the gene type, if representable.
    fn from_f64(value: f64) -> Option<Self>;
}

impl<T: Float> BlendGene for T {
    fn zero() -> Self {
        <T as Zero>::zero()
    }

    fn one() -> Self {
        <T as One>::one()
    }

    fn abs(self) -> Self {
        Float::abs(self)
    }

    fn is_finite(self) -> bool {
        Float::is_finite(self)
    }

    fn from_f64(value: f64) -> Option<Self> {
        <T as NumCast>::from(value)
    }
}

/// Crossover strategy.
///
/// Dispatches to [`k_points`] or [`blx_alpha`]. Because BLX-α only makes
/// sense for real-valued genes, [`Crossover::apply`] requires a
/// [`BlendGene`]; use [`Crossover::apply_discrete`] for other gene types.
///
/// # Examples
///
/// ```
/// use gapp::{Crossover, Individual};
/// use gapp::random::create_rng;
///
/// let a = Individual::new(vec![0.0, 0.0, 0.0], 1.0);
/// let b = Individual::new(vec![1.0, 1.0, 1.0], 2.0);
/// let mut rng = create_rng(42);
///
/// let (c1, c2) = Crossover::KPoints(2).apply(&a, &b, &mut rng).unwrap();
/// assert_eq!(c1.len(), 3);
/// assert_eq!(c2.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crossover {
    /// k-point crossover with the given number of cut points.
    KPoints(usize),

    /// BLX-α with the given spread. 0.5 is the usual choice.
    BlxAlpha(f64),
}

impl Default for Crossover {
    fn default() -> Self {
        Crossover::BlxAlpha(0.5)
    }
}

impl Crossover {
    /// Recombines `a` and `b` into two offspring.
    pub fn apply<G, F, R>(
        &self,
        a: &Individual<G, F>,
        b: &Individual<G, F>,
        rng: &mut R,
    ) -> Result<(Individual<G, F>, Individual<G, F>)>
    where
        G: BlendGene,
        F: Clone,
        R: Rng + ?Sized,
        StandardUniform: Distribution<G>,
    {
        match self {
            Crossover::KPoints(k) => k_points(a, b, *k, rng),
            Crossover::BlxAlpha(alpha) => blx_alpha(a, b, *alpha, rng),
        }
    }

    /// Recombines `a` and `b` whose genes are not real numbers.
    ///
    /// Only [`Crossover::KPoints`] applies to such genes.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] for [`Crossover::BlxAlpha`], plus the
    /// errors of [`k_points`].
    pub fn apply_discrete<G, F, R>(
        &self,
        a: &Individual<G, F>,
        b: &Individual<G, F>,
        rng: &mut R,
    ) -> Result<(Individual<G, F>, Individual<G, F>)>
    where
        G: Clone,
        F: Clone,
        R: Rng + ?Sized,
    {
        match self {
            Crossover::KPoints(k) => k_points(a, b, *k, rng),
            Crossover::BlxAlpha(_) => Err(Error::invalid(
                "BLX-alpha crossover requires real-valued genes",
            )),
        }
    }
}

/// k-point crossover.
///
/// Picks `k` distinct cut points in `0..L` uniformly, sorts them, and
/// swaps every other segment between the two children (see
/// [`swap_segments`]). With `k = 1` this is one-point crossover: the
/// suffix after the cut is exchanged.
///
/// # Errors
///
/// [`Error::InvalidArgument`] if the parents' gene lengths differ, if `k`
/// is 0, or if `k` exceeds the gene length.
///
/// # Complexity
/// O(L + k log k)
pub fn k_points<G, F, R>(
    a: &Individual<G, F>,
    b: &Individual<G, F>,
    k: usize,
    rng: &mut R,
) -> Result<(Individual<G, F>, Individual<G, F>)>
where
    G: Clone,
    F: Clone,
    R: Rng + ?Sized,
{
    check_equal_length(a, b)?;
    let len = a.len();
    if k == 0 {
        return Err(Error::invalid("k must be at least 1"));
    }
    if k > len {
        return Err(Error::invalid(format!(
            "k ({k}) exceeds gene length ({len})"
        )));
    }

    let mut indices = identity_indices(len);
    partial_shuffle(&mut indices, k, rng);
    let cuts = &mut indices[..k];
    cuts.sort_unstable();

    let mut child_a = a.clone();
    let mut child_b = b.clone();
    swap_segments(&mut child_a.gene, &mut child_b.gene, cuts)?;

    Ok((child_a, child_b))
}

/// Swaps alternating segments of `x` and `y` in place.
///
/// With sorted cut points `c0 <= c1 <= ...`, segments `[c0, c1)`,
/// `[c2, c3)`, ... are exchanged. If the number of cuts is odd, the tail
/// `[c_last, len)` is exchanged as well.
///
/// # Errors
///
/// [`Error::InvalidArgument`] if the slices differ in length, or if the
/// cuts are unsorted or out of range.
///
/// # Examples
///
/// ```
/// use gapp::swap_segments;
///
/// let mut x = vec![1, 2, 3, 4, 5, 6];
/// let mut y = vec![10, 20, 30, 40, 50, 60];
/// swap_segments(&mut x, &mut y, &[1, 4]).unwrap();
/// assert_eq!(x, vec![1, 20, 30, 40, 5, 6]);
/// assert_eq!(y, vec![10, 2, 3, 4, 50, 60]);
/// ```
pub fn swap_segments<G>(x: &mut [G], y: &mut [G], cuts: &[usize]) -> Result<()> {
    let len = x.len();
    if y.len() != len {
        return Err(Error::invalid(format!(
            "gene lengths differ ({len} vs {})",
            y.len()
        )));
    }
    if cuts.windows(2).any(|w| w[0] > w[1]) {
        return Err(Error::invalid("cut points must be sorted ascending"));
    }
    if let Some(&last) = cuts.last() {
        if last > len {
            return Err(Error::invalid(format!(
                "cut point ({last}) exceeds gene length ({len})"
            )));
        }
    }

    for pair in cuts.chunks(2) {
        let start = pair[0];
        let end = pair.get(1).copied().unwrap_or(len);
        x[start..end].swap_with_slice(&mut y[start..end]);
    }
    Ok(())
}

/// BLX-α (blend) crossover.
///
/// For each position `i`, with `d = |a_i - b_i|`, both children draw a
/// value independently and uniformly from
/// `[min(a_i, b_i) - alpha * d, max(a_i, b_i) + alpha * d]`.
/// `alpha = 0` keeps children within the parents' range.
///
/// # Errors
///
/// [`Error::InvalidArgument`] if the parents' gene lengths differ, if
/// `alpha` is negative, not finite, or not representable in `G`, or if a
/// widened interval around finite parents overflows `G`.
///
/// # Examples
///
/// ```
/// use gapp::{blx_alpha, Individual};
/// use gapp::random::create_rng;
///
/// let a = Individual::new(vec![0.0_f64, 10.0], 0.0);
/// let b = Individual::new(vec![1.0_f64, 20.0], 0.0);
/// let (c1, _c2) = blx_alpha(&a, &b, 0.0, &mut create_rng(1)).unwrap();
/// assert!((0.0..=1.0).contains(&c1.gene[0]));
/// assert!((10.0..=20.0).contains(&c1.gene[1]));
/// ```
pub fn blx_alpha<G, F, R>(
    a: &Individual<G, F>,
    b: &Individual<G, F>,
    alpha: f64,
    rng: &mut R,
) -> Result<(Individual<G, F>, Individual<G, F>)>
where
    G: BlendGene,
    F: Clone,
    R: Rng + ?Sized,
    StandardUniform: Distribution<G>,
{
    check_equal_length(a, b)?;
    if !alpha.is_finite() || alpha < 0.0 {
        return Err(Error::invalid(format!(
            "alpha must be finite and non-negative, got {alpha}"
        )));
    }
    let spread = G::from_f64(alpha).ok_or_else(|| {
        Error::invalid(format!("alpha ({alpha}) is not representable as a gene value"))
    })?;

    let mut bounds = Vec::with_capacity(a.len());
    for (i, (&x, &y)) in a.gene.iter().zip(&b.gene).enumerate() {
        let (lo, hi) = if x < y { (x, y) } else { (y, x) };
        // With zero spread the interval is the parents' own, even when
        // their distance overflows.
        let extension = if spread == G::zero() {
            G::zero()
        } else {
            (x - y).abs() * spread
        };
        let r_min = lo - extension;
        let r_max = hi + extension;
        if lo.is_finite() && hi.is_finite() && !(r_min.is_finite() && r_max.is_finite()) {
            return Err(Error::invalid(format!(
                "blend interval at position {i} overflows the gene type"
            )));
        }
        bounds.push((r_min, r_max));
    }

    let mut child_a = a.clone();
    let mut child_b = b.clone();

    for (i, &(r_min, r_max)) in bounds.iter().enumerate() {
        child_a.gene[i] = sample_between(r_min, r_max, rng.random::<G>());
        child_b.gene[i] = sample_between(r_min, r_max, rng.random::<G>());
    }

    Ok((child_a, child_b))
}

/// Maps `u` in `[0, 1)` onto `[lo, hi]`.
///
/// Uses the width form when `hi - lo` is representable and the convex
/// combination otherwise, so finite bounds never yield NaN.
fn sample_between<G: BlendGene>(lo: G, hi: G, u: G) -> G {
    let width = hi - lo;
    if width.is_finite() {
        lo + width * u
    } else {
        lo * (G::one() - u) + hi * u
    }
}

fn check_equal_length<G, F>(a: &Individual<G, F>, b: &Individual<G, F>) -> Result<()> {
    if a.len() != b.len() {
        return Err(Error::invalid(format!(
            "gene lengths differ ({} vs {})",
            a.len(),
            b.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn parents() -> (Individual<i32, f64>, Individual<i32, f64>) {
        (
            Individual::new(vec![1, 2, 3, 4, 5, 6], 1.0),
            Individual::new(vec![10, 20, 30, 40, 50, 60], 2.0),
        )
    }

    /// Every position holds one parent's gene in one child and the other
    /// parent's gene in the other child.
    fn is_positionwise_exchange(
        a: &[i32],
        b: &[i32],
        c1: &[i32],
        c2: &[i32],
    ) -> bool {
        (0..a.len()).all(|i| {
            (c1[i] == a[i] && c2[i] == b[i]) || (c1[i] == b[i] && c2[i] == a[i])
        })
    }

    /// Number of positions where the child switches source parent.
    fn switches(a: &[i32], child: &[i32]) -> usize {
        let from_a: Vec<bool> = a.iter().zip(child).map(|(x, y)| x == y).collect();
        from_a.windows(2).filter(|w| w[0] != w[1]).count()
    }

    // ---- Segment swapping ----

    #[test]
    fn test_swap_segments_two_cuts() {
        let (a, b) = parents();
        let (mut x, mut y) = (a.gene.clone(), b.gene.clone());
        swap_segments(&mut x, &mut y, &[1, 4]).unwrap();
        assert_eq!(x, vec![1, 20, 30, 40, 5, 6]);
        assert_eq!(y, vec![10, 2, 3, 4, 50, 60]);
    }

    #[test]
    fn test_swap_segments_one_cut_swaps_suffix() {
        let (a, b) = parents();
        let (mut x, mut y) = (a.gene.clone(), b.gene.clone());
        swap_segments(&mut x, &mut y, &[4]).unwrap();
        assert_eq!(x, vec![1, 2, 3, 4, 50, 60]);
        assert_eq!(y, vec![10, 20, 30, 40, 5, 6]);
    }

    #[test]
    fn test_swap_segments_three_cuts_swaps_tail() {
        let (a, b) = parents();
        let (mut x, mut y) = (a.gene.clone(), b.gene.clone());
        swap_segments(&mut x, &mut y, &[0, 2, 5]).unwrap();
        assert_eq!(x, vec![10, 20, 3, 4, 5, 60]);
        assert_eq!(y, vec![1, 2, 30, 40, 50, 6]);
    }

    #[test]
    fn test_swap_segments_cut_at_zero_swaps_everything() {
        let (a, b) = parents();
        let (mut x, mut y) = (a.gene.clone(), b.gene.clone());
        swap_segments(&mut x, &mut y, &[0]).unwrap();
        assert_eq!(x, b.gene);
        assert_eq!(y, a.gene);
    }

    #[test]
    fn test_swap_segments_rejects_bad_cuts() {
        let mut x = vec![1, 2, 3];
        let mut y = vec![4, 5, 6];
        assert!(swap_segments(&mut x, &mut y, &[2, 1]).is_err());
        assert!(swap_segments(&mut x, &mut y, &[4]).is_err());
        assert!(swap_segments(&mut x, &mut y[..2], &[1]).is_err());
        assert_eq!(x, vec![1, 2, 3]);
    }

    // ---- k-point ----

    #[test]
    fn test_k_points_exchanges_positionwise() {
        let (a, b) = parents();
        let mut rng = create_rng(42);
        for k in 1..=6 {
            for _ in 0..50 {
                let (c1, c2) = k_points(&a, &b, k, &mut rng).unwrap();
                assert_eq!(c1.len(), 6);
                assert_eq!(c2.len(), 6);
                assert!(is_positionwise_exchange(&a.gene, &b.gene, &c1.gene, &c2.gene));
            }
        }
    }

    #[test]
    fn test_k_points_one_point_keeps_prefix() {
        let (a, b) = parents();
        let mut rng = create_rng(7);
        for _ in 0..50 {
            let (c1, _) = k_points(&a, &b, 1, &mut rng).unwrap();
            // One cut: a prefix from `a`, then the rest from `b`.
            assert!(switches(&a.gene, &c1.gene) <= 1);
            if c1.gene[0] != a.gene[0] {
                assert_eq!(c1.gene, b.gene);
            }
        }
    }

    #[test]
    fn test_k_points_switch_count_bounded_by_k() {
        let (a, b) = parents();
        let mut rng = create_rng(9);
        for k in 1..=5 {
            for _ in 0..50 {
                let (c1, _) = k_points(&a, &b, k, &mut rng).unwrap();
                assert!(switches(&a.gene, &c1.gene) <= k);
            }
        }
    }

    #[test]
    fn test_k_points_copies_parent_fitness() {
        let (a, b) = parents();
        let (c1, c2) = k_points(&a, &b, 2, &mut create_rng(1)).unwrap();
        assert_eq!(c1.fitness, 1.0);
        assert_eq!(c2.fitness, 2.0);
    }

    #[test]
    fn test_k_points_single_gene() {
        let a = Individual::new(vec![1], 0.0);
        let b = Individual::new(vec![2], 0.0);
        let (c1, c2) = k_points(&a, &b, 1, &mut create_rng(3)).unwrap();
        // The only cut is at 0, so the whole gene moves.
        assert_eq!(c1.gene, vec![2]);
        assert_eq!(c2.gene, vec![1]);
    }

    #[test]
    fn test_k_points_invalid_arguments() {
        let (a, b) = parents();
        let short = Individual::new(vec![1, 2, 3], 0.0);
        let mut rng = create_rng(42);

        assert!(matches!(
            k_points(&a, &b, 0, &mut rng),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            k_points(&a, &b, 7, &mut rng),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            k_points(&a, &short, 1, &mut rng),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_k_points_every_position_cut() {
        let (a, b) = parents();
        let all_cuts: Vec<usize> = (0..a.len()).collect();
        let (mut x, mut y) = (a.gene.clone(), b.gene.clone());
        swap_segments(&mut x, &mut y, &all_cuts).unwrap();

        let mut rng = create_rng(4);
        for _ in 0..20 {
            let (c1, c2) = k_points(&a, &b, a.len(), &mut rng).unwrap();
            assert_eq!(c1.gene, x);
            assert_eq!(c2.gene, y);
        }
        // Cuts 0..6 swap [0,1), [2,3), [4,5).
        assert_eq!(x, vec![10, 2, 30, 4, 50, 6]);
    }

    #[test]
    fn test_k_points_invalid_call_leaves_rng_untouched() {
        let (a, b) = parents();
        let mut rng = create_rng(42);
        let mut untouched = rng.clone();

        assert!(k_points(&a, &b, 0, &mut rng).is_err());
        assert!(k_points(&a, &b, 7, &mut rng).is_err());
        assert_eq!(rng.random::<u64>(), untouched.random::<u64>());
    }

    // ---- BLX-alpha ----

    #[test]
    fn test_blx_alpha_within_bounds() {
        let a = Individual::new(vec![0.0_f64, -3.0, 5.0, 2.0], 0.0);
        let b = Individual::new(vec![1.0, 3.0, 5.0, -2.0], 0.0);
        let alpha = 0.5;
        let mut rng = create_rng(42);

        for _ in 0..200 {
            let (c1, c2) = blx_alpha(&a, &b, alpha, &mut rng).unwrap();
            for i in 0..4 {
                let (x, y) = (a.gene[i], b.gene[i]);
                let d = (x - y).abs();
                let lo = x.min(y) - alpha * d;
                let hi = x.max(y) + alpha * d;
                for g in [c1.gene[i], c2.gene[i]] {
                    assert!(lo <= g && g <= hi, "gene {g} outside [{lo}, {hi}]");
                }
            }
        }
    }

    #[test]
    fn test_blx_alpha_zero_stays_between_parents() {
        let a = Individual::new(vec![2.0_f32, 8.0], 0.0_f32);
        let b = Individual::new(vec![4.0_f32, 1.0], 0.0_f32);
        let mut rng = create_rng(5);
        for _ in 0..200 {
            let (c1, c2) = blx_alpha(&a, &b, 0.0, &mut rng).unwrap();
            for c in [&c1, &c2] {
                assert!((2.0..=4.0).contains(&c.gene[0]));
                assert!((1.0..=8.0).contains(&c.gene[1]));
            }
        }
    }

    #[test]
    fn test_blx_alpha_identical_parents() {
        let a = Individual::new(vec![1.5, -2.5], 0.0);
        let (c1, c2) = blx_alpha(&a, &a, 0.5, &mut create_rng(1)).unwrap();
        assert_eq!(c1.gene, a.gene);
        assert_eq!(c2.gene, a.gene);
    }

    #[test]
    fn test_blx_alpha_explores_beyond_parents() {
        let a = Individual::new(vec![0.0], 0.0);
        let b = Individual::new(vec![1.0], 0.0);
        let mut rng = create_rng(42);
        let mut outside = 0;
        for _ in 0..1000 {
            let (c1, c2) = blx_alpha(&a, &b, 0.5, &mut rng).unwrap();
            outside += [c1.gene[0], c2.gene[0]]
                .iter()
                .filter(|&&g| !(0.0..=1.0).contains(&g))
                .count();
        }
        // Half the interval lies outside the parents.
        assert!(outside > 800, "only {outside} of 2000 genes explored outside");
    }

    #[test]
    fn test_blx_alpha_children_draw_independently() {
        let a = Individual::new(vec![0.0; 8], 0.0);
        let b = Individual::new(vec![1.0; 8], 0.0);
        let (c1, c2) = blx_alpha(&a, &b, 0.5, &mut create_rng(3)).unwrap();
        assert_ne!(c1.gene, c2.gene);
    }

    #[test]
    fn test_blx_alpha_extreme_finite_parents() {
        let a = Individual::new(vec![-1e308_f64, f64::MAX], 0.0);
        let b = Individual::new(vec![1e308_f64, -f64::MAX], 0.0);
        let mut rng = create_rng(42);

        for _ in 0..200 {
            let (c1, c2) = blx_alpha(&a, &b, 0.0, &mut rng).unwrap();
            for c in [&c1, &c2] {
                assert!(c.gene.iter().all(|g| g.is_finite()), "{:?}", c.gene);
                assert!((-1e308..=1e308).contains(&c.gene[0]));
            }
        }

        // Widening past the largest float cannot be represented.
        assert!(matches!(
            blx_alpha(&a, &b, 0.5, &mut rng),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_blx_alpha_overflow_leaves_rng_untouched() {
        let a = Individual::new(vec![0.0_f64, -1e308], 0.0);
        let b = Individual::new(vec![1.0_f64, 1e308], 0.0);
        let mut rng = create_rng(42);
        let mut untouched = rng.clone();

        assert!(blx_alpha(&a, &b, 1.0, &mut rng).is_err());
        assert_eq!(rng.random::<u64>(), untouched.random::<u64>());
    }

    #[test]
    fn test_blx_alpha_invalid_arguments() {
        let a = Individual::new(vec![0.0, 1.0], 0.0);
        let b = Individual::new(vec![0.0], 0.0);
        let mut rng = create_rng(42);

        assert!(matches!(
            blx_alpha(&a, &b, 0.5, &mut rng),
            Err(Error::InvalidArgument(_))
        ));
        assert!(blx_alpha(&a, &a, -0.1, &mut rng).is_err());
        assert!(blx_alpha(&a, &a, f64::NAN, &mut rng).is_err());
        assert!(blx_alpha(&a, &a, f64::INFINITY, &mut rng).is_err());
    }

    // ---- Strategy enum ----

    #[test]
    fn test_default_crossover() {
        assert_eq!(Crossover::default(), Crossover::BlxAlpha(0.5));
    }

    #[test]
    fn test_crossover_dispatch() {
        let a = Individual::new(vec![0.0_f64, 0.0, 0.0, 0.0], 1.0);
        let b = Individual::new(vec![1.0, 1.0, 1.0, 1.0], 2.0);

        let via_enum = Crossover::KPoints(2)
            .apply(&a, &b, &mut create_rng(8))
            .unwrap();
        let direct = k_points(&a, &b, 2, &mut create_rng(8)).unwrap();
        assert_eq!(via_enum, direct);

        let via_enum = Crossover::BlxAlpha(0.3)
            .apply(&a, &b, &mut create_rng(8))
            .unwrap();
        let direct = blx_alpha(&a, &b, 0.3, &mut create_rng(8)).unwrap();
        assert_eq!(via_enum, direct);
    }

    #[test]
    fn test_crossover_discrete_genes() {
        let (a, b) = parents();

        let via_enum = Crossover::KPoints(3)
            .apply_discrete(&a, &b, &mut create_rng(8))
            .unwrap();
        let direct = k_points(&a, &b, 3, &mut create_rng(8)).unwrap();
        assert_eq!(via_enum, direct);

        assert!(matches!(
            Crossover::BlxAlpha(0.5).apply_discrete(&a, &b, &mut create_rng(8)),
            Err(Error::InvalidArgument(_))
        ));
    }
}
