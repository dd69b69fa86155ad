//! Get a solver from its name, the way a user would spell it on the command line
use std::str::FromStr;

use tracing::debug;

use crate::error::SolveError;
use crate::model::Model;
use crate::solvers::{AllSolvers, AutoSolver, CbcSolver, GlpkSolver, Solution, SolverTrait, WithMaxSeconds};

/// Any of the supported solvers
#[derive(Debug, Clone)]
pub enum AnySolver {
    /// glpsol
    Glpk(GlpkSolver),
    /// cbc
    Cbc(CbcSolver),
    /// cbc, falling back to glpsol
    Auto(AllSolvers),
}

impl AnySolver {
    /// Limit the run time, when the solver supports it
    pub fn with_max_seconds(self, seconds: u32) -> AnySolver {
        match self {
            AnySolver::Glpk(s) => AnySolver::Glpk(s.with_max_seconds(seconds)),
            AnySolver::Cbc(s) => AnySolver::Cbc(s.with_max_seconds(seconds)),
            AnySolver::Auto(s) => {
                let (cbc, rest) = s.into_parts();
                let (glpk, tail) = rest.into_parts();
                AnySolver::Auto(AutoSolver::chain(
                    cbc.with_max_seconds(seconds),
                    AutoSolver::chain(glpk.with_max_seconds(seconds), tail),
                ))
            }
        }
    }
}

impl SolverTrait for AnySolver {
    fn run(&self, problem: &Model) -> Result<Solution, SolveError> {
        match self {
            AnySolver::Glpk(s) => s.run(problem),
            AnySolver::Cbc(s) => s.run(problem),
            AnySolver::Auto(s) => s.run(problem),
        }
    }
}

impl FromStr for AnySolver {
    type Err = SolveError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        SolverFactory::create(name)
    }
}

/// Maps solver names to solvers
pub struct SolverFactory;

impl SolverFactory {
    /// `glpk` (or `glpsol`), `cbc` or `auto`, case-insensitive.
    /// Any other name fails with [SolveError::SolverNotFound].
    pub fn create(name: &str) -> Result<AnySolver, SolveError> {
        let solver = match name.to_ascii_lowercase().as_str() {
            "glpk" | "glpsol" => AnySolver::Glpk(GlpkSolver::new()),
            "cbc" => AnySolver::Cbc(CbcSolver::new()),
            "auto" => AnySolver::Auto(AllSolvers::new()),
            _ => {
                return Err(SolveError::SolverNotFound {
                    name: name.to_string(),
                })
            }
        };
        debug!(component = "factory", solver = name, "Solver selected");
        Ok(solver)
    }

    /// Like [SolverFactory::create], running `command` instead of the default executable.
    /// The command is ignored for `auto`.
    pub fn with_command(name: &str, command: &str) -> Result<AnySolver, SolveError> {
        Ok(match Self::create(name)? {
            AnySolver::Glpk(s) => AnySolver::Glpk(s.command_name(command.to_string())),
            AnySolver::Cbc(s) => AnySolver::Cbc(s.command_name(command.to_string())),
            auto @ AnySolver::Auto(_) => auto,
        })
    }
}
