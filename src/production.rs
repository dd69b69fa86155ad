//! The production planning problem: how many units of `x` and `y` to make
//! to maximize profit, given a shared capacity and a limit on each product.
//!
//! ```text
//! max  1000x + 1800y
//! s.t. 20x + 30y <= 1200
//!      x <= 40
//!      y <= 30
//!      x, y >= 0
//! ```
use std::io::Write;

use tracing::info;

use crate::error::{ModelError, SolveError};
use crate::model::{Domain, LinearExpr, Model, ModelBuilder, Relation, Sense};
use crate::solvers::{Solution, SolverFactory, SolverTrait};

/// Solver used when none is given
pub const DEFAULT_SOLVER: &str = "glpk";

/// Problem data. The default is the plan solved by the command line tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductionPlan {
    /// profit per unit of x
    pub profit_x: f64,
    /// profit per unit of y
    pub profit_y: f64,
    /// capacity used by one unit of x
    pub usage_x: f64,
    /// capacity used by one unit of y
    pub usage_y: f64,
    /// available capacity
    pub capacity: f64,
    /// most units of x that can be made
    pub x_max: f64,
    /// most units of y that can be made
    pub y_max: f64,
}

impl Default for ProductionPlan {
    fn default() -> Self {
        ProductionPlan {
            profit_x: 1000.,
            profit_y: 1800.,
            usage_x: 20.,
            usage_y: 30.,
            capacity: 1200.,
            x_max: 40.,
            y_max: 30.,
        }
    }
}

/// Build the model of the default plan
pub fn build() -> Result<Model, ModelError> {
    build_model(&ProductionPlan::default())
}

/// Build the model of the given plan
pub fn build_model(plan: &ProductionPlan) -> Result<Model, ModelError> {
    ModelBuilder::new("production")
        .variable("x", Domain::NonNegativeReals)
        .variable("y", Domain::NonNegativeReals)
        .constraint(
            "const1",
            LinearExpr::new().term("x", plan.usage_x).term("y", plan.usage_y),
            Relation::LessOrEqual,
            plan.capacity,
        )
        .constraint(
            "const2",
            LinearExpr::new().term("x", 1.),
            Relation::LessOrEqual,
            plan.x_max,
        )
        .constraint(
            "const3",
            LinearExpr::new().term("y", 1.),
            Relation::LessOrEqual,
            plan.y_max,
        )
        .objective(
            LinearExpr::new().term("x", plan.profit_x).term("y", plan.profit_y),
            Sense::Maximize,
        )
        .build()
}

/// Solve with the default solver, `glpk`
pub fn solve(model: &Model) -> Result<Solution, SolveError> {
    solve_with(model, &SolverFactory::create(DEFAULT_SOLVER)?)
}

/// Solve with any solver. Infeasible, unbounded or unsolved outcomes are errors,
/// and every model variable is guaranteed to have a value in the returned solution.
pub fn solve_with<S: SolverTrait>(model: &Model, solver: &S) -> Result<Solution, SolveError> {
    let solution = solver.run(model)?.into_result()?;
    for var in model.variables() {
        if solution.value(var.name()).is_none() {
            return Err(SolveError::MissingValue(var.name().to_string()));
        }
    }
    let objective = model.objective().expr.evaluate(|name| solution.value(name));
    info!(
        component = "production",
        operation = "solve",
        status = ?solution.status,
        reported_objective = ?solution.objective,
        objective = ?objective,
        "Model solved"
    );
    Ok(solution)
}

/// Write `Resultado: <value>` for each variable, in declaration order
pub fn report<W: Write>(model: &Model, solution: &Solution, out: &mut W) -> Result<(), SolveError> {
    for var in model.variables() {
        let value = solution
            .value(var.name())
            .ok_or_else(|| SolveError::MissingValue(var.name().to_string()))?;
        writeln!(out, "Resultado: {:?}", value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::solvers::Status;

    fn solution(status: Status, values: &[(&str, f64)]) -> Solution {
        let results: HashMap<_, _> = values.iter().map(|(n, v)| (n.to_string(), *v)).collect();
        Solution::new(status, None, results)
    }

    struct Fixed(Solution);

    impl SolverTrait for Fixed {
        fn run(&self, _problem: &Model) -> Result<Solution, SolveError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn default_model_shape() {
        let model = build().unwrap();
        let names: Vec<_> = model.variables().iter().map(|v| v.name()).collect();
        assert_eq!(names, ["x", "y"]);
        assert_eq!(model.constraints().len(), 3);
        assert_eq!(model.objective().sense, Sense::Maximize);
        assert!(model.variables().iter().all(|v| v.lower_bound() == 0.));
    }

    #[test]
    fn report_prints_one_line_per_variable() {
        let model = build().unwrap();
        let mut out = Vec::new();
        report(&model, &solution(Status::Optimal, &[("y", 30.), ("x", 15.)]), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Resultado: 15.0\nResultado: 30.0\n");
    }

    #[test]
    fn report_fails_on_missing_value() {
        let model = build().unwrap();
        let err = report(&model, &solution(Status::Optimal, &[("x", 15.)]), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, SolveError::MissingValue(name) if name == "y"));
    }

    #[test]
    fn statuses_become_errors() {
        let model = build().unwrap();
        let err = solve_with(&model, &Fixed(solution(Status::Infeasible, &[]))).unwrap_err();
        assert!(matches!(err, SolveError::Infeasible));
        let err = solve_with(&model, &Fixed(solution(Status::Unbounded, &[]))).unwrap_err();
        assert!(matches!(err, SolveError::Unbounded));
        let err = solve_with(&model, &Fixed(solution(Status::NotSolved, &[]))).unwrap_err();
        assert!(matches!(err, SolveError::NotSolved));
    }

    #[test]
    fn optimal_solution_must_cover_every_variable() {
        let model = build().unwrap();
        let err = solve_with(&model, &Fixed(solution(Status::Optimal, &[("x", 15.)]))).unwrap_err();
        assert!(matches!(err, SolveError::MissingValue(name) if name == "y"));
        let ok = solve_with(&model, &Fixed(solution(Status::Optimal, &[("x", 15.), ("y", 30.)]))).unwrap();
        assert_eq!(ok.value("x"), Some(15.));
    }
}
