//! Error types for the integer layer

use thiserror::Error;

/// Result type alias for integer-layer operations
pub type SmtResult<T> = std::result::Result<T, SmtError>;

/// Errors raised while building or reading back an integer model
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SmtError {
    /// `int_var` called with `lb > ub`
    #[error("empty domain [{lb}, {ub}]")]
    EmptyDomain { lb: i64, ub: i64 },

    /// An `IntVar` that was not declared in this session
    #[error("unknown variable: {0}")]
    UnknownVariable(String),

    /// `model()` without a preceding satisfiable `check()`
    #[error("no model available: the last check was not satisfiable")]
    NoModel,

    /// The SAT assignment does not decode to an integer
    #[error("failed to extract model: {0}")]
    ModelError(String),
}
