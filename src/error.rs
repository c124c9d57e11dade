//! Error type shared by all operators.
//!
//! Every operator validates its arguments before touching the random
//! source, so a returned error never leaves the engine half-advanced.

use thiserror::Error;

/// Errors returned by selection and crossover operators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An argument violates the operator's input contract.
    ///
    /// Covers empty populations, requested sizes larger than the
    /// population, out-of-range tournament or cut-point counts, and
    /// parents with mismatched gene lengths.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_message() {
        let err = Error::invalid("select_size (5) exceeds population size (3)");
        assert_eq!(
            err.to_string(),
            "invalid argument: select_size (5) exceeds population size (3)"
        );
    }
}
