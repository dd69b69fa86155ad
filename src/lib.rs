#![deny(missing_docs)]
//! A library to build linear programs as plain data, write them in the .lp file format
//! and call external solvers to solve them.

pub mod error;
pub mod lp_format;
pub mod model;
pub mod production;
pub mod solvers;
