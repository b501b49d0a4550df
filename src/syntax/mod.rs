//! Syntax types: flat predicate expressions, literals, clauses and formulas.

mod clause;
mod formula;
mod literal;
mod predicate;
mod term;

pub use clause::Clause;
pub use formula::Formula;
pub use literal::Literal;
pub use predicate::Predicate;
pub use term::{Arg, Constant, Var};
