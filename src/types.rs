//! Core data types shared by the selection and crossover operators.
//!
//! [`Individual`] pairs a gene vector with its fitness, and
//! [`ProblemType`] decides which direction of fitness counts as better.

use std::cmp::Ordering;

/// Optimization direction.
///
/// A pure policy flag: it only decides how fitness values are ordered.
///
/// # Examples
///
/// ```
/// use gapp::ProblemType;
///
/// assert!(ProblemType::Maximize.is_better(&3.0, &1.0));
/// assert!(ProblemType::Minimize.is_better(&1.0, &3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProblemType {
    /// Higher fitness is better.
    #[default]
    Maximize,
    /// Lower fitness is better.
    Minimize,
}

impl ProblemType {
    /// Returns `true` if fitness `a` is strictly better than `b`.
    ///
    /// A value that is not comparable with itself (NaN) ranks below every
    /// comparable value in both directions.
    pub fn is_better<F: PartialOrd>(self, a: &F, b: &F) -> bool {
        self.better_first(a, b) == Ordering::Less
    }

    /// Orders two fitness values so that the better one comes first.
    ///
    /// This is a total order even for floats: NaN sorts last, and two
    /// NaNs compare equal.
    pub(crate) fn better_first<F: PartialOrd>(self, a: &F, b: &F) -> Ordering {
        match (a.partial_cmp(a).is_some(), b.partial_cmp(b).is_some()) {
            (true, true) => {
                let ord = a.partial_cmp(b).unwrap_or(Ordering::Equal);
                match self {
                    ProblemType::Maximize => ord.reverse(),
                    ProblemType::Minimize => ord,
                }
            }
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => Ordering::Equal,
        }
    }
}

/// A candidate solution: a gene vector and its fitness.
///
/// Operators never modify an `Individual` they are given; they clone the
/// ones they return.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual<G, F> {
    /// Gene sequence. Its length is preserved by every operator.
    pub gene: Vec<G>,

    /// Fitness score. Stale on crossover offspring until re-evaluated.
    pub fitness: F,
}

impl<G, F> Individual<G, F> {
    /// Creates an individual from a gene vector and a fitness value.
    pub fn new(gene: Vec<G>, fitness: F) -> Self {
        Self { gene, fitness }
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.gene.len()
    }

    /// Returns `true` if the gene vector is empty.
    pub fn is_empty(&self) -> bool {
        self.gene.is_empty()
    }
}

/// An ordered collection of individuals.
///
/// Operators borrow populations as `&[Individual<G, F>]` and return a new
/// `Population`.
pub type Population<G, F> = Vec<Individual<G, F>>;
