use std::path::PathBuf;

use lp_dispatch::error::SolveError;
use lp_dispatch::production;
use lp_dispatch::solvers::{CbcSolver, GlpkSolver, Solution, SolverWithSolutionParsing, Status};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("solution_files")
        .join(name)
}

#[test]
fn glpk_optimal() {
    let Solution {
        status,
        objective,
        results: mut variables,
    } = GlpkSolver::new()
        .read_solution(&fixture("glpk_optimal.sol"), None)
        .unwrap();
    assert_eq!(status, Status::Optimal);
    assert_eq!(objective, Some(69000.));
    assert_eq!(variables.remove("x"), Some(15.));
    assert_eq!(variables.remove("y"), Some(30.));
    assert!(variables.is_empty());
}

#[test]
fn glpk_infeasible() {
    let Solution { status, .. } = GlpkSolver::new()
        .read_solution(&fixture("glpk_infeasible.sol"), None)
        .unwrap();
    assert_eq!(status, Status::Infeasible);
}

#[test]
fn glpk_unbounded() {
    let Solution { status, results, .. } = GlpkSolver::new()
        .read_solution(&fixture("glpk_unbounded.sol"), None)
        .unwrap();
    assert_eq!(status, Status::Unbounded);
    assert_eq!(results.len(), 2);
}

#[test]
fn glpk_integer_with_wrapped_names() {
    let Solution {
        status, results, ..
    } = GlpkSolver::new()
        .read_solution(&fixture("glpk_integer_long_names.sol"), None)
        .unwrap();
    assert_eq!(status, Status::Optimal);
    assert_eq!(results.get("a_rather_long_variable_name"), Some(&1.));
    assert_eq!(results.get("b"), Some(&3.));
    assert_eq!(results.get("c"), Some(&0.));
}

#[test]
fn glpk_mixed_integer_reads_continuous_activity() {
    let Solution {
        status,
        objective,
        results,
    } = GlpkSolver::new()
        .read_solution(&fixture("glpk_mixed_integer.sol"), None)
        .unwrap();
    assert_eq!(status, Status::Optimal);
    assert_eq!(objective, Some(10.5));
    assert_eq!(results.get("n"), Some(&3.));
    assert_eq!(results.get("y"), Some(&2.5));
    assert_eq!(results.get("z"), Some(&-4.));
    assert_eq!(results.get("a_long_continuous_name"), Some(&1.5));
}

#[test]
fn glpk_missing_file() {
    let err = GlpkSolver::new()
        .read_solution(&fixture("does_not_exist.sol"), None)
        .unwrap_err();
    assert!(matches!(err, SolveError::SolutionFormat(_)));
}

#[test]
fn glpk_truncated_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("truncated.sol");
    let full = std::fs::read_to_string(fixture("glpk_optimal.sol")).unwrap();
    let cut: String = full.lines().take(16).map(|l| format!("{}\n", l)).collect();
    std::fs::write(&path, cut).unwrap();
    let err = GlpkSolver::new().read_solution(&path, None).unwrap_err();
    assert!(matches!(err, SolveError::SolutionFormat(_)));
}

#[test]
fn cbc_optimal() {
    let Solution {
        status,
        objective,
        results,
    } = CbcSolver::new()
        .read_solution(&fixture("cbc_optimal.sol"), None)
        .unwrap();
    assert_eq!(status, Status::Optimal);
    assert_eq!(objective, Some(69000.));
    assert_eq!(results.get("x"), Some(&15.));
    assert_eq!(results.get("y"), Some(&30.));
}

#[test]
fn cbc_fills_missing_variables_with_zero() {
    let model = production::build().unwrap();
    let Solution { status, results, .. } = CbcSolver::new()
        .read_solution(&fixture("cbc_infeasible.sol"), Some(&model))
        .unwrap();
    assert_eq!(status, Status::Infeasible);
    assert_eq!(results.get("x"), Some(&5.));
    assert_eq!(results.get("y"), Some(&0.));
}

#[test]
fn cbc_integer_infeasible() {
    let Solution { status, .. } = CbcSolver::new()
        .read_solution(&fixture("cbc_integer_infeasible.sol"), None)
        .unwrap();
    assert_eq!(status, Status::Infeasible);
}

#[test]
fn cbc_unbounded() {
    let Solution { status, results, .. } = CbcSolver::new()
        .read_solution(&fixture("cbc_unbounded.sol"), None)
        .unwrap();
    assert_eq!(status, Status::Unbounded);
    assert!(results.is_empty());
}

#[test]
fn report_from_parsed_solution() {
    let model = production::build().unwrap();
    let solution = GlpkSolver::new()
        .read_solution(&fixture("glpk_optimal.sol"), Some(&model))
        .unwrap();
    let mut out = Vec::new();
    production::report(&model, &solution, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "Resultado: 15.0\nResultado: 30.0\n");
}
