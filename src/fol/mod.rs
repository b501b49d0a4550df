//! First-order logic: clause conversion and resolution refutation.

mod cnf;
mod resolution;

pub use cnf::{
    distribute, drop_universals, eliminate_implications, push_negations, rename_bound_variables,
    standardize_apart, to_cnf, to_cnf_all, CnfError,
};
pub use resolution::{
    resolve, Refutation, RefutationStep, RefutationTrace, ResolutionError, ResolvedStep,
};
