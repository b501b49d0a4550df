//! symlogic: textbook symbolic-AI algorithms
//!
//! The core is a forward-chaining engine over flat predicate expressions:
//! a predicate unifier, a substitution applier, a fixed-point driver and a
//! proof-tree reconstructor. Alongside it live CNF conversion with
//! resolution refutation, truth-table entailment, alpha-beta search,
//! simulated annealing for N-queens and a general unifier with
//! occurs-check.

pub mod chaining;
pub mod fol;
pub mod parser;
pub mod propositional;
pub mod samples;
pub mod search;
pub mod syntax;
pub mod unify;

#[cfg(test)]
mod tests;
