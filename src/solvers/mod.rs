//! This module provides the interface to the external solvers.
//!
//! The solvers need to be installed on your system: `glpsol` for [GlpkSolver]
//! (usually packaged as `glpk-utils` or `glpk`) and `cbc` for [CbcSolver].
//! Use [SolverFactory] to get a solver from its name.

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::SolveError;
use crate::model::Model;

pub use self::auto::*;
pub use self::cbc::*;
pub use self::factory::*;
pub use self::glpk::*;

pub mod auto;
pub mod cbc;
pub mod factory;
pub mod glpk;

/// Outcome reported by the solver
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Status {
    /// proven optimal
    Optimal,
    /// feasible, optimality not proven (time limit...)
    SubOptimal,
    /// no feasible assignment
    Infeasible,
    /// the objective has no finite optimum
    Unbounded,
    /// the solver gave no verdict
    NotSolved,
}

/// What a solver returns: a status, an objective value and the value of each variable
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// solver status
    pub status: Status,
    /// objective value, when reported
    pub objective: Option<f64>,
    /// variable name -> value
    pub results: HashMap<String, f64>,
}

impl Solution {
    /// Create a solution
    pub fn new(status: Status, objective: Option<f64>, results: HashMap<String, f64>) -> Solution {
        Solution {
            status,
            objective,
            results,
        }
    }

    /// Value assigned to a variable
    pub fn value(&self, variable: &str) -> Option<f64> {
        self.results.get(variable).copied()
    }

    /// Turn a non-optimal status into the matching error
    pub fn into_result(self) -> Result<Solution, SolveError> {
        match self.status {
            Status::Optimal | Status::SubOptimal => Ok(self),
            Status::Infeasible => Err(SolveError::Infeasible),
            Status::Unbounded => Err(SolveError::Unbounded),
            Status::NotSolved => Err(SolveError::NotSolved),
        }
    }
}

/// A solver able to solve a model
pub trait SolverTrait {
    /// Run the solver on the model and return the solution it reports,
    /// whatever its status
    fn run(&self, problem: &Model) -> Result<Solution, SolveError>;
}

/// Solvers whose results are read back from a solution file
pub trait SolverWithSolutionParsing {
    /// Open and parse the solution file
    fn read_solution(&self, solution_file: &Path, problem: Option<&Model>) -> Result<Solution, SolveError> {
        let f = File::open(solution_file).map_err(|e| {
            SolveError::SolutionFormat(format!("cannot open {}: {}", solution_file.display(), e))
        })?;
        self.read_specific_solution(&f, problem)
    }

    /// Parse the solver-specific solution format
    fn read_specific_solution(&self, f: &File, problem: Option<&Model>) -> Result<Solution, SolveError>;
}

/// A solver that can be given a maximum run time
pub trait WithMaxSeconds<T> {
    /// Currently configured limit
    fn max_seconds(&self) -> Option<u32>;
    /// Return a copy of the solver with the given limit
    fn with_max_seconds(&self, seconds: u32) -> T;
}

/// An external program that reads a .lp file and writes a solution file
pub trait SolverProgram {
    /// Human readable solver name, used in logs
    fn name(&self) -> &str;
    /// Executable name or path
    fn command_name(&self) -> &str;
    /// Command line arguments
    fn arguments(&self, lp_file: &Path, solution_file: &Path) -> Vec<OsString>;
    /// Where to write the solution. A temporary file is used when `None`
    fn preferred_temp_solution_file(&self) -> Option<&Path> {
        None
    }
    /// Some solvers report the status more reliably on stdout than in the solution file
    fn parse_stdout_status(&self, _stdout: &[u8]) -> Option<Status> {
        None
    }
}

impl<T: SolverWithSolutionParsing + SolverProgram> SolverTrait for T {
    fn run(&self, problem: &Model) -> Result<Solution, SolveError> {
        let solver_name = self.name();
        let command_name = self.command_name();
        let file_model = problem.to_tmp_file()?;

        let mut temp_solution = None;
        let solution_file: PathBuf = match self.preferred_temp_solution_file() {
            Some(p) => p.to_path_buf(),
            None => {
                let path = NamedTempFile::new()?.into_temp_path();
                let buf = path.to_path_buf();
                temp_solution = Some(path);
                buf
            }
        };

        let arguments = self.arguments(file_model.path(), &solution_file);
        debug!(
            component = "solver",
            operation = "spawn",
            solver = solver_name,
            command = command_name,
            lp_file = %file_model.path().display(),
            solution_file = %solution_file.display(),
            "Running external solver"
        );

        let output = match Command::new(command_name).args(&arguments).output() {
            Ok(output) => output,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(solver = solver_name, command = command_name, error = %e, "Solver executable not found");
                return Err(SolveError::SolverNotFound {
                    name: command_name.to_string(),
                });
            }
            Err(e) => return Err(SolveError::Io(e)),
        };

        if !output.status.success() {
            if temp_solution.is_none() {
                let _ = fs::remove_file(&solution_file);
            }
            return Err(SolveError::SolverFailed {
                command: command_name.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout_status = self.parse_stdout_status(&output.stdout);
        let read = self.read_solution(&solution_file, Some(problem));
        // Temporary solution files are removed when `temp_solution` drops
        if temp_solution.is_none() {
            let _ = fs::remove_file(&solution_file);
        }
        let mut solution = read?;
        if let Some(status) = stdout_status {
            solution.status = status;
        }
        debug!(
            component = "solver",
            operation = "read_solution",
            solver = solver_name,
            status = ?solution.status,
            objective = ?solution.objective,
            "Solution read"
        );
        Ok(solution)
    }
}

pub(crate) fn buf_contains(haystack: &[u8], needle: &str) -> bool {
    let needle = needle.as_bytes();
    haystack
        .windows(needle.len())
        .any(|window| window == needle)
}
