//! Dump models in the .lp file format read by glpsol and cbc
//!
use std::fmt;
use std::fmt::Formatter;
use std::io::prelude::*;
use std::io::Result;

use tempfile::NamedTempFile;

use crate::model::{Constraint, LinearExpr, Model, Relation, Sense};

/// Types that can be written in the .lp format.
/// The caller ensures that variable names follow the solver's requirements,
/// [crate::model::ModelBuilder::build] checks them for models.
pub trait WriteToLpFileFormat {
    /// Write the object to the given formatter in the .lp format
    fn to_lp_file_format(&self, f: &mut fmt::Formatter) -> fmt::Result;
}

impl WriteToLpFileFormat for LinearExpr {
    fn to_lp_file_format(&self, f: &mut Formatter) -> fmt::Result {
        for (idx, (name, coef)) in self.terms().iter().enumerate() {
            let abs = coef.abs();
            match (idx, coef.is_sign_negative()) {
                (0, false) => {}
                (0, true) => write!(f, "- ")?,
                (_, false) => write!(f, " + ")?,
                (_, true) => write!(f, " - ")?,
            }
            if abs != 1. {
                write!(f, "{} ", abs)?;
            }
            write!(f, "{}", name)?;
        }
        Ok(())
    }
}

impl WriteToLpFileFormat for Constraint {
    fn to_lp_file_format(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: ", self.name)?;
        self.lhs.to_lp_file_format(f)?;
        write!(
            f,
            " {} {}",
            match self.relation {
                Relation::Equal => "=",
                Relation::LessOrEqual => "<=",
                Relation::GreaterOrEqual => ">=",
            },
            self.rhs
        )
    }
}

impl WriteToLpFileFormat for Model {
    fn to_lp_file_format(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "\\ {}\n\n", self.name())?;
        objective_lp_file_block(self, f)?;
        write_constraints_lp_file_block(self, f)?;
        write_bounds_lp_file_block(self, f)?;
        write!(f, "\nEnd\n")?;
        Ok(())
    }
}

impl Model {
    /// Return an object whose [fmt::Display] implementation is the model in the .lp format
    pub fn display_lp(&self) -> DisplayedLp<'_, Self> {
        DisplayedLp(self)
    }

    /// Write the model to a temporary file, deleted when the returned handle is dropped
    pub fn to_tmp_file(&self) -> Result<NamedTempFile> {
        let mut f = tempfile::Builder::new()
            .prefix(self.name())
            .suffix(".lp")
            .tempfile()?;
        write!(f, "{}", self.display_lp())?;
        f.flush()?;
        Ok(f)
    }
}

/// A value whose `Display` implementation outputs valid .lp syntax
pub struct DisplayedLp<'a, P>(&'a P);

impl<'a, P: WriteToLpFileFormat> fmt::Display for DisplayedLp<'a, P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.to_lp_file_format(f)
    }
}

fn objective_lp_file_block(model: &Model, f: &mut Formatter) -> fmt::Result {
    let obj_type = match model.objective().sense {
        Sense::Maximize => "Maximize\n  ",
        Sense::Minimize => "Minimize\n  ",
    };
    write!(f, "{}obj: ", obj_type)?;
    model.objective().expr.to_lp_file_format(f)?;
    Ok(())
}

fn write_constraints_lp_file_block(model: &Model, f: &mut Formatter) -> fmt::Result {
    if model.constraints().is_empty() {
        return writeln!(f);
    }
    write!(f, "\n\nSubject To\n")?;
    for constraint in model.constraints() {
        write!(f, "  ")?;
        constraint.to_lp_file_format(f)?;
        writeln!(f)?;
    }
    Ok(())
}

fn write_bounds_lp_file_block(model: &Model, f: &mut Formatter) -> fmt::Result {
    let mut integers = vec![];
    write!(f, "\nBounds\n")?;
    for variable in model.variables() {
        let low = variable.lower_bound();
        let up = variable.upper_bound();
        write!(f, "  ")?;
        if low.is_infinite() && up.is_infinite() {
            writeln!(f, "{} free", variable.name())?;
        } else if low.is_infinite() {
            // a lone upper bound keeps the default lower bound of 0
            writeln!(f, "-inf <= {} <= {}", variable.name(), up)?;
        } else if up.is_infinite() {
            writeln!(f, "{} <= {}", low, variable.name())?;
        } else {
            writeln!(f, "{} <= {} <= {}", low, variable.name(), up)?;
        }
        if variable.is_integer() {
            integers.push(variable.name());
        }
    }
    if !integers.is_empty() {
        writeln!(f, "\nGenerals")?;
        for name in integers {
            writeln!(f, "  {}", name)?;
        }
    }
    Ok(())
}
