//! The COIN-OR branch and cut solver
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::SolveError;
use crate::model::Model;
use crate::solvers::{Solution, SolverProgram, SolverWithSolutionParsing, Status, WithMaxSeconds};

/// Runs `cbc <model> solve solution <solution>`
#[derive(Debug, Clone)]
pub struct CbcSolver {
    name: String,
    command_name: String,
    temp_solution_file: Option<PathBuf>,
    seconds: Option<u32>,
}

impl Default for CbcSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CbcSolver {
    /// create a solver instance
    pub fn new() -> CbcSolver {
        CbcSolver {
            name: "Cbc".to_string(),
            command_name: "cbc".to_string(),
            temp_solution_file: None,
            seconds: None,
        }
    }

    /// set the name of the cbc executable to use
    pub fn command_name(&self, command_name: String) -> CbcSolver {
        CbcSolver {
            command_name,
            ..self.clone()
        }
    }

    /// write the solution to this file instead of a temporary one
    pub fn with_temp_solution_file(&self, temp_solution_file: String) -> CbcSolver {
        CbcSolver {
            temp_solution_file: Some(temp_solution_file.into()),
            ..self.clone()
        }
    }
}

// "Optimal - objective value 69000.00000000"
fn parse_objective(first_line: &str) -> Option<f64> {
    let (_, rest) = first_line.split_once("objective value")?;
    rest.split_whitespace().next()?.parse().ok()
}

impl SolverWithSolutionParsing for CbcSolver {
    fn read_specific_solution(&self, f: &File, problem: Option<&Model>) -> Result<Solution, SolveError> {
        let mut vars_value: HashMap<String, f64> = HashMap::new();

        // CBC only lists the variables with a non-zero value
        if let Some(p) = problem {
            for var in p.variables() {
                vars_value.insert(var.name().to_string(), 0.0);
            }
        }

        let mut file = BufReader::new(f);
        let mut buffer = String::new();
        file.read_line(&mut buffer)?;

        let status = match buffer.split_whitespace().next() {
            Some("Optimal") => Status::Optimal,
            // Infeasible status is either "Infeasible" or "Integer infeasible"
            Some("Infeasible") | Some("Integer") => Status::Infeasible,
            Some("Unbounded") => Status::Unbounded,
            // "Stopped" can be "on time", "on iterations", "on difficulties" or "on ctrl-c"
            Some("Stopped") => Status::SubOptimal,
            Some(_) => Status::NotSolved,
            None => return Err(SolveError::SolutionFormat("empty solution file".to_string())),
        };
        let objective = parse_objective(&buffer);

        for line in file.lines() {
            let l = line?;
            let mut result_line: Vec<_> = l.split_whitespace().collect();
            if result_line.is_empty() {
                continue;
            }
            // "**" flags values that violate their bounds
            if result_line[0] == "**" {
                result_line.remove(0);
            }
            if result_line.len() == 4 {
                let value = result_line[2]
                    .parse::<f64>()
                    .map_err(|e| SolveError::SolutionFormat(format!("{}: {}", result_line[2], e)))?;
                vars_value.insert(result_line[1].to_string(), value);
            } else {
                return Err(SolveError::SolutionFormat(format!("unexpected line {:?}", l)));
            }
        }
        Ok(Solution::new(status, objective, vars_value))
    }
}

impl WithMaxSeconds<CbcSolver> for CbcSolver {
    fn max_seconds(&self) -> Option<u32> {
        self.seconds
    }
    fn with_max_seconds(&self, seconds: u32) -> CbcSolver {
        CbcSolver {
            seconds: Some(seconds),
            ..self.clone()
        }
    }
}

impl SolverProgram for CbcSolver {
    fn name(&self) -> &str {
        &self.name
    }

    fn command_name(&self) -> &str {
        &self.command_name
    }

    fn arguments(&self, lp_file: &Path, solution_file: &Path) -> Vec<OsString> {
        let mut args = vec![lp_file.as_os_str().to_owned()];
        if let Some(s) = self.max_seconds() {
            args.push("seconds".into());
            args.push(s.to_string().into());
        }
        args.extend_from_slice(&["solve".into(), "solution".into(), solution_file.into()]);
        args
    }

    fn preferred_temp_solution_file(&self) -> Option<&Path> {
        self.temp_solution_file.as_deref()
    }
}
