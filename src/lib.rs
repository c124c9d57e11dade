//! Selection and crossover operators for evolutionary optimization.
//!
//! Provides the operator toolbox a genetic-algorithm driver needs between
//! evaluations. The driver owns the generational loop, fitness
//! evaluation, mutation, and termination; this crate only resamples
//! populations and recombines parents.
//!
//! - **Selection**: [`tournament`], [`select_random_k`], [`select_best_k`]
//! - **Crossover**: [`k_points`], [`blx_alpha`]
//!
//! All operators are pure functions over borrowed inputs. Randomness comes
//! from a caller-supplied [`rand::Rng`], so a seeded engine makes every
//! call reproducible. Invalid arguments are reported as
//! [`Error::InvalidArgument`] before any random draw.
//!
//! # Example
//!
//! ```
//! use gapp::{blx_alpha, select_best_k, tournament, Individual, ProblemType};
//! use gapp::random::create_rng;
//!
//! let mut rng = create_rng(42);
//! let population: Vec<Individual<f64, f64>> = (0..20)
//!     .map(|i| Individual::new(vec![i as f64, -(i as f64)], (i * i) as f64))
//!     .collect();
//!
//! let elites = select_best_k(&population, 2, ProblemType::Minimize)?;
//! let parents = tournament(&population, 2, 3, ProblemType::Minimize, &mut rng)?;
//! let (child_a, child_b) = blx_alpha(&parents[0], &parents[1], 0.5, &mut rng)?;
//!
//! assert_eq!(elites.len(), 2);
//! assert_eq!(child_a.len(), 2);
//! assert_eq!(child_b.len(), 2);
//! # Ok::<(), gapp::Error>(())
//! ```

pub mod crossover;
mod error;
pub mod random;
pub mod selection;
mod types;

pub use crossover::{blx_alpha, k_points, swap_segments, BlendGene, Crossover};
pub use error::{Error, Result};
pub use selection::{select_best_k, select_random_k, tournament, tournament_winner, Selection};
pub use types::{Individual, Population, ProblemType};
