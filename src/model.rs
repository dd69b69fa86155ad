//! Plain-data representation of a linear program
use std::collections::HashSet;

use crate::error::ModelError;

/// Set of values a variable may take
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Domain {
    /// any real number
    Reals,
    /// x >= 0
    NonNegativeReals,
    /// x <= 0
    NonPositiveReals,
    /// any integer
    Integers,
    /// integers >= 0
    NonNegativeIntegers,
    /// 0 or 1
    Binary,
}

/// A variable to optimize
#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    name: String,
    domain: Domain,
}

impl Variable {
    /// The name should be unique in the model. It is checked by [ModelBuilder::build]
    pub fn new(name: impl Into<String>, domain: Domain) -> Self {
        Variable {
            name: name.into(),
            domain,
        }
    }

    /// Variable name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Variable domain
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Whether the variable is forced to take only integer values
    pub fn is_integer(&self) -> bool {
        matches!(
            self.domain,
            Domain::Integers | Domain::NonNegativeIntegers | Domain::Binary
        )
    }

    /// -INFINITY if there is no lower bound
    pub fn lower_bound(&self) -> f64 {
        match self.domain {
            Domain::Reals | Domain::NonPositiveReals | Domain::Integers => f64::NEG_INFINITY,
            Domain::NonNegativeReals | Domain::NonNegativeIntegers | Domain::Binary => 0.,
        }
    }

    /// INFINITY if there is no upper bound
    pub fn upper_bound(&self) -> f64 {
        match self.domain {
            Domain::NonPositiveReals => 0.,
            Domain::Binary => 1.,
            _ => f64::INFINITY,
        }
    }
}

/// A linear combination of variables, `sum(coef * var)`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(String, f64)>,
}

impl LinearExpr {
    /// The empty expression
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `coefficient * variable`. Coefficients of a repeated variable are summed.
    pub fn term(mut self, variable: impl Into<String>, coefficient: f64) -> Self {
        let variable = variable.into();
        match self.terms.iter_mut().find(|(name, _)| *name == variable) {
            Some((_, coef)) => *coef += coefficient,
            None => self.terms.push((variable, coefficient)),
        }
        self
    }

    /// Terms in insertion order
    pub fn terms(&self) -> &[(String, f64)] {
        &self.terms
    }

    /// Evaluate the expression for the given variable values
    pub fn evaluate(&self, value_of: impl Fn(&str) -> Option<f64>) -> Option<f64> {
        self.terms
            .iter()
            .map(|(name, coef)| value_of(name).map(|v| coef * v))
            .sum()
    }
}

/// Relation between the left-hand side and the right-hand side of a constraint
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Relation {
    /// <=
    LessOrEqual,
    /// =
    Equal,
    /// >=
    GreaterOrEqual,
}

/// A constraint expressing a relation between an expression and a constant
#[derive(Clone, Debug, PartialEq)]
pub struct Constraint {
    /// Name of the row in the solver output
    pub name: String,
    /// left hand side of the constraint
    pub lhs: LinearExpr,
    /// '<=' '=' or '>='
    pub relation: Relation,
    /// Right-hand side of the constraint
    pub rhs: f64,
}

/// Optimization sense
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Sense {
    /// min
    Minimize,
    /// max
    Maximize,
}

/// Target function and whether to maximize or minimize it
#[derive(Clone, Debug, PartialEq)]
pub struct Objective {
    /// the function to optimize
    pub expr: LinearExpr,
    /// min or max
    pub sense: Sense,
}

/// A validated linear program. Build one with [ModelBuilder].
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    name: String,
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    objective: Objective,
}

impl Model {
    /// Model name, used in the .lp header and temporary file names
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Variables in declaration order
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Look up a variable by name
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Constraints in declaration order
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// The single objective of the model
    pub fn objective(&self) -> &Objective {
        &self.objective
    }
}

/// Collects variables, constraints and the objective, and checks them in [ModelBuilder::build]
///
/// ```
/// use lp_dispatch::model::{Domain, LinearExpr, ModelBuilder, Relation, Sense};
///
/// let model = ModelBuilder::new("example")
///     .variable("x", Domain::NonNegativeReals)
///     .constraint("cap", LinearExpr::new().term("x", 2.), Relation::LessOrEqual, 10.)
///     .objective(LinearExpr::new().term("x", 1.), Sense::Maximize)
///     .build()
///     .unwrap();
/// assert_eq!(model.constraints().len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct ModelBuilder {
    name: String,
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    objective: Option<Objective>,
}

impl ModelBuilder {
    /// Start an empty model
    pub fn new(name: impl Into<String>) -> Self {
        ModelBuilder {
            name: name.into(),
            variables: vec![],
            constraints: vec![],
            objective: None,
        }
    }

    /// Declare a variable
    pub fn variable(mut self, name: impl Into<String>, domain: Domain) -> Self {
        self.variables.push(Variable::new(name, domain));
        self
    }

    /// Add a named constraint
    pub fn constraint(
        mut self,
        name: impl Into<String>,
        lhs: LinearExpr,
        relation: Relation,
        rhs: f64,
    ) -> Self {
        self.constraints.push(Constraint {
            name: name.into(),
            lhs,
            relation,
            rhs,
        });
        self
    }

    /// Add a constraint named `c<index>`
    pub fn unnamed_constraint(self, lhs: LinearExpr, relation: Relation, rhs: f64) -> Self {
        let name = format!("c{}", self.constraints.len());
        self.constraint(name, lhs, relation, rhs)
    }

    /// Set the objective, replacing any previous one
    pub fn objective(mut self, expr: LinearExpr, sense: Sense) -> Self {
        self.objective = Some(Objective { expr, sense });
        self
    }

    /// Validate and return the model
    pub fn build(self) -> Result<Model, ModelError> {
        check_name(&self.name)?;
        let mut declared = HashSet::new();
        for var in &self.variables {
            check_name(&var.name)?;
            if !declared.insert(var.name.as_str()) {
                return Err(ModelError::DuplicateVariable(var.name.clone()));
            }
        }

        let mut constraint_names = HashSet::new();
        for constraint in &self.constraints {
            check_name(&constraint.name)?;
            if !constraint_names.insert(constraint.name.as_str()) {
                return Err(ModelError::DuplicateConstraint(constraint.name.clone()));
            }
            check_expr(&constraint.lhs, &declared, &constraint.name)?;
            if !constraint.rhs.is_finite() {
                return Err(ModelError::NonFiniteCoefficient {
                    context: constraint.name.clone(),
                });
            }
        }

        let objective = self.objective.ok_or(ModelError::MissingObjective)?;
        check_expr(&objective.expr, &declared, "objective")?;

        Ok(Model {
            name: self.name,
            variables: self.variables,
            constraints: self.constraints,
            objective,
        })
    }
}

// Words the .lp readers of glpsol and cbc take as keywords or numbers
const RESERVED_NAMES: &[&str] = &[
    "bin", "binaries", "binary", "bound", "bounds", "end", "free", "gen", "general", "generals",
    "inf", "infinity", "max", "maximize", "maximum", "maximise", "min", "minimize", "minimum",
    "minimise", "st", "subject", "such",
];

fn check_name(name: &str) -> Result<(), ModelError> {
    let mut chars = name.chars();
    let valid = chars.next().map_or(false, |c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(ModelError::InvalidName(name.to_string()));
    }
    if RESERVED_NAMES.iter().any(|w| w.eq_ignore_ascii_case(name)) {
        return Err(ModelError::ReservedName(name.to_string()));
    }
    Ok(())
}

fn check_expr(expr: &LinearExpr, declared: &HashSet<&str>, context: &str) -> Result<(), ModelError> {
    if expr.terms.is_empty() {
        return Err(ModelError::EmptyExpression {
            context: context.to_string(),
        });
    }
    for (variable, coef) in &expr.terms {
        if !declared.contains(variable.as_str()) {
            return Err(ModelError::UnknownVariable {
                context: context.to_string(),
                variable: variable.clone(),
            });
        }
        if !coef.is_finite() {
            return Err(ModelError::NonFiniteCoefficient {
                context: context.to_string(),
            });
        }
    }
    Ok(())
}
