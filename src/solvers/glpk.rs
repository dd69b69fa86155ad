//! The GNU Linear Programming Kit, through its `glpsol` command line tool
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::SolveError;
use crate::model::Model;
use crate::solvers::{
    buf_contains, Solution, SolverProgram, SolverWithSolutionParsing, Status, WithMaxSeconds,
};

/// Runs `glpsol --lp <model> -o <solution>` and parses its printable report
#[derive(Debug, Clone)]
pub struct GlpkSolver {
    name: String,
    command_name: String,
    temp_solution_file: Option<PathBuf>,
    seconds: Option<u32>,
}

impl Default for GlpkSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl GlpkSolver {
    /// create a solver instance
    pub fn new() -> GlpkSolver {
        GlpkSolver {
            name: "Glpk".to_string(),
            command_name: "glpsol".to_string(),
            temp_solution_file: None,
            seconds: None,
        }
    }

    /// set the name of the glpsol executable to use
    pub fn command_name(&self, command_name: String) -> GlpkSolver {
        GlpkSolver {
            command_name,
            ..self.clone()
        }
    }

    /// write the solution to this file instead of a temporary one
    pub fn with_temp_solution_file(&self, temp_solution_file: String) -> GlpkSolver {
        GlpkSolver {
            temp_solution_file: Some(temp_solution_file.into()),
            ..self.clone()
        }
    }
}

fn parse_status(status: &str) -> Result<Status, SolveError> {
    Ok(match status {
        "OPTIMAL" | "INTEGER OPTIMAL" => Status::Optimal,
        "FEASIBLE" | "INTEGER NON-OPTIMAL" => Status::SubOptimal,
        "INFEASIBLE (FINAL)" | "INTEGER EMPTY" | "EMPTY" => Status::Infeasible,
        "UNBOUNDED" | "INTEGER UNDEFINED" => Status::Unbounded,
        "UNDEFINED" | "INFEASIBLE (INTERMEDIATE)" => Status::NotSolved,
        other => {
            return Err(SolveError::SolutionFormat(format!(
                "unknown solution status {:?}",
                other
            )))
        }
    })
}

fn header_value<'l>(line: &'l str, key: &str) -> Option<&'l str> {
    line.strip_prefix(key).map(str::trim)
}

fn parse_size(value: &str, what: &str) -> Result<usize, SolveError> {
    value
        .split_whitespace()
        .next()
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| SolveError::SolutionFormat(format!("invalid {} count", what)))
}

// LP reports always give a status after the name (B, NL, NU, NF, NS).
// MIP reports mark integer columns with `*` and leave continuous ones unmarked.
fn column_activity(fields: &[String]) -> Option<&str> {
    let marker = fields.get(2)?;
    let idx = match marker.as_str() {
        "*" | "B" | "NL" | "NU" | "NF" | "NS" => 3,
        _ => 2,
    };
    fields.get(idx).map(String::as_str)
}

// "obj = 69000 (MAXimum)"
fn parse_objective(value: &str) -> Option<f64> {
    let (_, rhs) = value.split_once('=')?;
    rhs.split_whitespace().next()?.parse().ok()
}

impl SolverWithSolutionParsing for GlpkSolver {
    fn read_specific_solution(&self, f: &File, _problem: Option<&Model>) -> Result<Solution, SolveError> {
        let mut lines = BufReader::new(f).lines();

        let mut rows = None;
        let mut cols = None;
        let mut status = None;
        let mut objective = None;
        // Header, up to the first blank line
        for line in lines.by_ref() {
            let line = line?;
            if line.trim().is_empty() {
                break;
            }
            if let Some(v) = header_value(&line, "Rows:") {
                rows = Some(parse_size(v, "row")?);
            } else if let Some(v) = header_value(&line, "Columns:") {
                cols = Some(parse_size(v, "column")?);
            } else if let Some(v) = header_value(&line, "Status:") {
                status = Some(parse_status(v)?);
            } else if let Some(v) = header_value(&line, "Objective:") {
                objective = parse_objective(v);
            }
        }
        let status = status.ok_or_else(|| SolveError::SolutionFormat("no solution status found".to_string()))?;
        let rows = rows.ok_or_else(|| SolveError::SolutionFormat("no row count found".to_string()))?;
        let cols = cols.ok_or_else(|| SolveError::SolutionFormat("no column count found".to_string()))?;

        // Skip the row table: title, dashes, one entry per row (possibly wrapped), blank line
        let mut found_columns = false;
        for line in lines.by_ref() {
            let line = line?;
            if line.contains("Column name") {
                found_columns = true;
                break;
            }
        }
        if !found_columns {
            return Err(SolveError::SolutionFormat(format!(
                "column table missing after {} rows",
                rows
            )));
        }
        match lines.next() {
            Some(Ok(dashes)) if dashes.starts_with("---") => {}
            _ => return Err(SolveError::SolutionFormat("column table has no separator".to_string())),
        }

        let mut results = HashMap::with_capacity(cols);
        for _ in 0..cols {
            let mut fields: Vec<String> = match lines.next() {
                Some(line) => line?.split_whitespace().map(str::to_string).collect(),
                None => {
                    return Err(SolveError::SolutionFormat(
                        "not all columns are present".to_string(),
                    ))
                }
            };
            // Names longer than the column width push the values onto the next line
            if fields.len() == 2 {
                if let Some(line) = lines.next() {
                    fields.extend(line?.split_whitespace().map(str::to_string));
                }
            }
            let activity = column_activity(&fields).ok_or_else(|| {
                SolveError::SolutionFormat("column specification has too few fields".to_string())
            })?;
            let value = activity
                .parse::<f64>()
                .map_err(|e| SolveError::SolutionFormat(format!("{}: {}", activity, e)))?;
            results.insert(fields[1].clone(), value);
        }
        Ok(Solution::new(status, objective, results))
    }
}

impl WithMaxSeconds<GlpkSolver> for GlpkSolver {
    fn max_seconds(&self) -> Option<u32> {
        self.seconds
    }
    fn with_max_seconds(&self, seconds: u32) -> GlpkSolver {
        GlpkSolver {
            seconds: Some(seconds),
            ..self.clone()
        }
    }
}

impl SolverProgram for GlpkSolver {
    fn name(&self) -> &str {
        &self.name
    }

    fn command_name(&self) -> &str {
        &self.command_name
    }

    fn arguments(&self, lp_file: &Path, solution_file: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["--lp".into(), lp_file.into()];
        if let Some(s) = self.max_seconds() {
            args.push("--tmlim".into());
            args.push(s.to_string().into());
        }
        args.push("-o".into());
        args.push(solution_file.into());
        args
    }

    fn preferred_temp_solution_file(&self) -> Option<&Path> {
        self.temp_solution_file.as_deref()
    }

    fn parse_stdout_status(&self, stdout: &[u8]) -> Option<Status> {
        if buf_contains(stdout, "PROBLEM HAS NO PRIMAL FEASIBLE SOLUTION")
            || buf_contains(stdout, "PROBLEM HAS NO INTEGER FEASIBLE SOLUTION")
        {
            Some(Status::Infeasible)
        } else if buf_contains(stdout, "PROBLEM HAS UNBOUNDED SOLUTION") {
            Some(Status::Unbounded)
        } else {
            None
        }
    }
}
