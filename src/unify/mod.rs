//! Unification: predicate matching for rule firing, plus a general
//! unifier over nested expressions.

pub mod general;
mod substitution;
mod unify;

pub use substitution::Substitution;
pub use unify::{unify, unify_with, UnifyError, UnifyResult};
