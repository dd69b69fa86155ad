//! Errors raised while building a model or solving it with an external solver
use std::io;

use thiserror::Error;

/// A model that cannot be written to a solver
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Names must start with an ASCII letter and contain only ASCII alphanumerics or `_`
    #[error("invalid name `{0}`: names must start with a letter and contain only letters, digits or '_'")]
    InvalidName(String),
    /// The name is a keyword of the .lp format
    #[error("`{0}` is a reserved word of the .lp format")]
    ReservedName(String),
    /// Two variables share a name
    #[error("variable `{0}` is declared twice")]
    DuplicateVariable(String),
    /// Two constraints share a name
    #[error("constraint `{0}` is declared twice")]
    DuplicateConstraint(String),
    /// An expression uses a variable that was never declared
    #[error("{context} references undeclared variable `{variable}`")]
    UnknownVariable {
        /// constraint name, or "objective"
        context: String,
        /// the offending variable name
        variable: String,
    },
    /// NaN or infinite coefficient or right-hand side
    #[error("{context} contains a non-finite number")]
    NonFiniteCoefficient {
        /// constraint name, or "objective"
        context: String,
    },
    /// An expression without any term
    #[error("{context} has no terms")]
    EmptyExpression {
        /// constraint name, or "objective"
        context: String,
    },
    /// `build` was called before setting the objective
    #[error("the model has no objective")]
    MissingObjective,
}

/// Failure to obtain an optimal solution
#[derive(Error, Debug)]
pub enum SolveError {
    /// The solver name is unknown, or its executable is not installed
    #[error("solver `{name}` is not available")]
    SolverNotFound {
        /// solver name or command that could not be found
        name: String,
    },
    /// No solver of an auto solver chain is installed
    #[error("no solver available")]
    NoSolverAvailable,
    /// No assignment satisfies every constraint
    #[error("the problem is infeasible")]
    Infeasible,
    /// The objective can grow without limit
    #[error("the problem is unbounded")]
    Unbounded,
    /// The solver stopped without proving optimality, infeasibility or unboundedness
    #[error("the solver did not solve the problem")]
    NotSolved,
    /// The solver process exited with a failure status
    #[error("{command} exited with {status}: {stderr}")]
    SolverFailed {
        /// executable that was run
        command: String,
        /// exit status as reported by the OS
        status: String,
        /// captured standard error
        stderr: String,
    },
    /// The solution file could not be understood
    #[error("incorrect solution format: {0}")]
    SolutionFormat(String),
    /// The solver did not report a value for a model variable
    #[error("no value reported for variable `{0}`")]
    MissingValue(String),
    /// Temporary files or the solver process could not be handled
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The model was rejected before being sent to the solver
    #[error(transparent)]
    Model(#[from] ModelError),
}
