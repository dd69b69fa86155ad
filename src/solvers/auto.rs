//! Auto solvers find which of their child solvers is installed on
//! the user's computer and use it. [AllSolvers] tries all the supported solvers.

use tracing::debug;

use crate::error::SolveError;
use crate::model::Model;
use crate::solvers::{CbcSolver, GlpkSolver, Solution};

use super::SolverTrait;

/// A solver that tries `SOLVER`, then `NEXT` when `SOLVER` is not installed
#[derive(Debug, Clone)]
pub struct AutoSolver<SOLVER, NEXT>(SOLVER, NEXT);

/// The tail of a list of solvers. This one has no children and never finds any solver.
#[derive(Debug, Clone, Default)]
pub struct NoSolver;

/// An [AutoSolver] that tries, in order: Cbc and Glpk
pub type AllSolvers = AutoSolver<CbcSolver, AutoSolver<GlpkSolver, NoSolver>>;

impl SolverTrait for NoSolver {
    fn run(&self, _problem: &Model) -> Result<Solution, SolveError> {
        Err(SolveError::NoSolverAvailable)
    }
}

impl<A: Default, B: Default> Default for AutoSolver<A, B> {
    fn default() -> Self {
        AutoSolver(A::default(), B::default())
    }
}

impl<SOLVER: Default, NEXT: Default> AutoSolver<SOLVER, NEXT> {
    /// Instantiate an AutoSolver with all its default solvers
    pub fn new() -> Self {
        Self::default()
    }
}

impl<SOLVER, NEXT> AutoSolver<SOLVER, NEXT> {
    /// Try `solver`, then `next`
    pub fn chain(solver: SOLVER, next: NEXT) -> Self {
        AutoSolver(solver, next)
    }

    /// The first solver and the rest of the list
    pub fn into_parts(self) -> (SOLVER, NEXT) {
        (self.0, self.1)
    }

    /// Put `solver` in front of the list
    pub fn with_solver<NewSolver>(self, solver: NewSolver) -> AutoSolver<NewSolver, Self> {
        AutoSolver(solver, self)
    }
}

impl<S: SolverTrait, T: SolverTrait> SolverTrait for AutoSolver<S, T> {
    fn run(&self, problem: &Model) -> Result<Solution, SolveError> {
        match self.0.run(problem) {
            Err(SolveError::SolverNotFound { name }) => {
                debug!(component = "auto_solver", skipped = %name, "Solver not installed, trying the next one");
                self.1.run(problem)
            }
            other => other,
        }
    }
}
