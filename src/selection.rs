//! Selection operators.
//!
//! Selection reduces or resamples a population. Three schemes are
//! provided, each with a different selection pressure:
//!
//! - [`tournament`]: best of a random group, repeated with replacement
//! - [`select_random_k`]: uniform sample without replacement, no pressure
//! - [`select_best_k`]: the `k` best individuals (truncation)
//!
//! [`Selection`] wraps the three as a strategy value.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use crate::error::{Error, Result};
use crate::random::{identity_indices, partial_shuffle};
use crate::types::{Individual, Population, ProblemType};
use rand::Rng;

/// Selection strategy.
///
/// # Examples
///
/// ```
/// use gapp::{Individual, ProblemType, Selection};
/// use gapp::random::create_rng;
///
/// let population: Vec<Individual<f64, f64>> = (0..10)
///     .map(|i| Individual::new(vec![i as f64], i as f64))
///     .collect();
/// let mut rng = create_rng(42);
///
/// let parents = Selection::Tournament(3)
///     .select(&population, 4, ProblemType::Maximize, &mut rng)
///     .unwrap();
/// assert_eq!(parents.len(), 4);
///
/// let elites = Selection::BestK
///     .select(&population, 2, ProblemType::Maximize, &mut rng)
///     .unwrap();
/// assert!(elites.iter().all(|ind| ind.fitness >= 8.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Tournament selection with the given group size.
    ///
    /// - size 1: no pressure (uniform with replacement)
    /// - size 2-5: typical range
    /// - size = population: always returns the global best
    ///
    /// # Complexity
    /// O(n + size) per selected individual
    Tournament(usize),

    /// Uniform sampling without replacement.
    ///
    /// # Complexity
    /// O(n) per call
    RandomK,

    /// Truncation: the `k` best individuals, in no particular order.
    ///
    /// # Complexity
    /// O(n) expected per call
    BestK,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Checks that `select_size` individuals can be selected from a
    /// population of `population_len` with this strategy.
    pub fn validate(&self, population_len: usize, select_size: usize) -> Result<()> {
        match self {
            Selection::Tournament(size) => check_tournament(population_len, *size),
            Selection::RandomK | Selection::BestK => {
                check_select_size(population_len, select_size)
            }
        }
    }

    /// Selects `select_size` individuals from `population`.
    ///
    /// `problem_type` is ignored by [`Selection::RandomK`].
    pub fn select<G, F, R>(
        &self,
        population: &[Individual<G, F>],
        select_size: usize,
        problem_type: ProblemType,
        rng: &mut R,
    ) -> Result<Population<G, F>>
    where
        G: Clone,
        F: PartialOrd + Clone,
        R: Rng + ?Sized,
    {
        match self {
            Selection::Tournament(size) => {
                tournament(population, select_size, *size, problem_type, rng)
            }
            Selection::RandomK => select_random_k(population, select_size, rng),
            Selection::BestK => select_best_k(population, select_size, problem_type),
        }
    }
}

/// Tournament selection.
///
/// Runs `select_size` independent tournaments. Each one samples
/// `tournament_size` distinct individuals uniformly and keeps the best
/// under `problem_type`; ties go to the first one sampled. The same
/// individual may win several tournaments.
///
/// # Errors
///
/// [`Error::InvalidArgument`] if the population is empty, or if
/// `tournament_size` is 0 or larger than the population.
///
/// # Examples
///
/// ```
/// use gapp::{tournament, Individual, ProblemType};
/// use gapp::random::create_rng;
///
/// let population = vec![
///     Individual::new(vec![0u8], 3.0),
///     Individual::new(vec![1u8], 1.0),
///     Individual::new(vec![2u8], 2.0),
/// ];
/// let mut rng = create_rng(42);
///
/// // The whole population competes, so the minimum always wins.
/// let selected = tournament(&population, 5, 3, ProblemType::Minimize, &mut rng).unwrap();
/// assert!(selected.iter().all(|ind| ind.fitness == 1.0));
/// ```
pub fn tournament<G, F, R>(
    population: &[Individual<G, F>],
    select_size: usize,
    tournament_size: usize,
    problem_type: ProblemType,
    rng: &mut R,
) -> Result<Population<G, F>>
where
    G: Clone,
    F: PartialOrd + Clone,
    R: Rng + ?Sized,
{
    check_tournament(population.len(), tournament_size)?;

    let mut indices = Vec::with_capacity(population.len());
    let selected = (0..select_size)
        .map(|_| {
            let winner = run_tournament(
                population,
                &mut indices,
                tournament_size,
                problem_type,
                rng,
            );
            population[winner].clone()
        })
        .collect();

    Ok(selected)
}

/// Runs a single tournament and returns the winner.
///
/// Equivalent to [`tournament`] with `select_size = 1`.
///
/// # Errors
///
/// Same as [`tournament`].
pub fn tournament_winner<G, F, R>(
    population: &[Individual<G, F>],
    tournament_size: usize,
    problem_type: ProblemType,
    rng: &mut R,
) -> Result<Individual<G, F>>
where
    G: Clone,
    F: PartialOrd + Clone,
    R: Rng + ?Sized,
{
    check_tournament(population.len(), tournament_size)?;

    let mut indices = Vec::with_capacity(population.len());
    let winner = run_tournament(population, &mut indices, tournament_size, problem_type, rng);
    Ok(population[winner].clone())
}

/// Random-k selection: `select_size` individuals, uniformly, without
/// replacement.
///
/// Every subset of size `select_size` is equally likely, and so is every
/// ordering of it.
///
/// # Errors
///
/// [`Error::InvalidArgument`] if the population is empty or `select_size`
/// exceeds its size.
pub fn select_random_k<G, F, R>(
    population: &[Individual<G, F>],
    select_size: usize,
    rng: &mut R,
) -> Result<Population<G, F>>
where
    G: Clone,
    F: Clone,
    R: Rng + ?Sized,
{
    check_select_size(population.len(), select_size)?;

    let mut indices = identity_indices(population.len());
    partial_shuffle(&mut indices, select_size, rng);

    Ok(indices[..select_size]
        .iter()
        .map(|&i| population[i].clone())
        .collect())
}

/// Best-k selection: the `select_size` best individuals under
/// `problem_type`.
///
/// The result is a partition, not a sort: its order is unspecified. When
/// several individuals tie at the cut-off fitness, which of them are
/// returned is also unspecified and may differ between calls that use a
/// different population order. NaN fitness ranks below every number.
///
/// # Errors
///
/// [`Error::InvalidArgument`] if the population is empty or `select_size`
/// exceeds its size.
///
/// # Examples
///
/// ```
/// use gapp::{select_best_k, Individual, ProblemType};
///
/// let population: Vec<Individual<u8, i32>> = [5, 1, 9, 3, 7]
///     .iter()
///     .map(|&f| Individual::new(vec![], f))
///     .collect();
///
/// let mut best: Vec<i32> = select_best_k(&population, 2, ProblemType::Maximize)
///     .unwrap()
///     .into_iter()
///     .map(|ind| ind.fitness)
///     .collect();
/// best.sort();
/// assert_eq!(best, vec![7, 9]);
/// ```
pub fn select_best_k<G, F>(
    population: &[Individual<G, F>],
    select_size: usize,
    problem_type: ProblemType,
) -> Result<Population<G, F>>
where
    G: Clone,
    F: PartialOrd + Clone,
{
    check_select_size(population.len(), select_size)?;

    if select_size == 0 {
        return Ok(Vec::new());
    }

    // Partition indices rather than individuals so genes are never moved.
    let mut indices = identity_indices(population.len());
    if select_size < population.len() {
        indices.select_nth_unstable_by(select_size - 1, |&a, &b| {
            problem_type.better_first(&population[a].fitness, &population[b].fitness)
        });
    }

    Ok(indices[..select_size]
        .iter()
        .map(|&i| population[i].clone())
        .collect())
}

/// Samples `tournament_size` distinct individuals and returns the index of
/// the best. `indices` is scratch space, reset to the identity on entry.
fn run_tournament<G, F, R>(
    population: &[Individual<G, F>],
    indices: &mut Vec<usize>,
    tournament_size: usize,
    problem_type: ProblemType,
    rng: &mut R,
) -> usize
where
    F: PartialOrd,
    R: Rng + ?Sized,
{
    indices.clear();
    indices.extend(0..population.len());
    partial_shuffle(indices, tournament_size, rng);

    let mut best = indices[0];
    for &candidate in &indices[1..tournament_size] {
        if problem_type.is_better(&population[candidate].fitness, &population[best].fitness) {
            best = candidate;
        }
    }
    best
}

fn check_tournament(population_len: usize, tournament_size: usize) -> Result<()> {
    if population_len == 0 {
        return Err(Error::invalid("cannot select from an empty population"));
    }
    if tournament_size == 0 {
        return Err(Error::invalid("tournament_size must be at least 1"));
    }
    if tournament_size > population_len {
        return Err(Error::invalid(format!(
            "tournament_size ({tournament_size}) exceeds population size ({population_len})"
        )));
    }
    Ok(())
}

fn check_select_size(population_len: usize, select_size: usize) -> Result<()> {
    if population_len == 0 {
        return Err(Error::invalid("cannot select from an empty population"));
    }
    if select_size > population_len {
        return Err(Error::invalid(format!(
            "select_size ({select_size}) exceeds population size ({population_len})"
        )));
    }
    Ok(())
}
