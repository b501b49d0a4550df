//! Semantic tests for the reasoning core.
//!
//! These check properties the engine must keep, not only surface output:
//! matching is one-way and consistent, chaining reaches a fixed point
//! that is closed under the rules, and proof trees only cite steps that
//! actually fired.
use crate::chaining::{forward_chain, ChainingConfig, KnowledgeBase, ProofTree};
use crate::syntax::{Arg, Literal, Predicate, Var};
use crate::unify::{unify, unify_with, Substitution, UnifyError, UnifyResult};

/// Parse a ground fact.
fn fact(source: &str) -> Predicate {
    Predicate::parse_fact(source).unwrap()
}

/// Parse a rule template.
fn pattern(source: &str) -> Predicate {
    Predicate::parse_template(source).unwrap()
}

/// Knowledge base built from fact strings and `(head, body, label)` rules.
fn kb_from(facts: &[&str], rules: &[(&str, &[&str], &str)]) -> KnowledgeBase {
    let mut kb = KnowledgeBase::new();
    for f in facts {
        kb.add_fact(f).unwrap();
    }
    for (head, body, label) in rules {
        kb.add_rule(head, body, *label).unwrap();
    }
    kb
}

mod chaining_semantics;
mod proof_semantics;
mod proptests;
mod substitution_semantics;
mod unification_semantics;
