//! Clauses: disjunctions of literals in conjunctive normal form.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use super::literal::Literal;
use super::term::Var;
use crate::unify::Substitution;

/// A clause is a disjunction of literals.
///
/// In CNF, a knowledge base is a conjunction of clauses. Each clause represents
/// a disjunction: `L1 ∨ L2 ∨ ... ∨ Ln`.
///
/// Examples:
/// - Unit clause: `food(Apple)`
/// - Binary: `¬food(x) ∨ likes(John, x)`
/// - Empty clause: `⊥` (contradiction)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clause {
    pub literals: Vec<Literal>,
}

impl Clause {
    /// Create a clause from a vector of literals.
    pub fn new(literals: Vec<Literal>) -> Self {
        Clause { literals }
    }

    /// Create the empty clause (represents contradiction/false).
    pub fn empty() -> Self {
        Clause {
            literals: Vec::new(),
        }
    }

    pub fn unit(literal: Literal) -> Self {
        Clause::new(vec![literal])
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Check if this is a unit clause (exactly one literal).
    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    /// Collect all variables in this clause.
    pub fn variables(&self) -> BTreeSet<&Var> {
        self.literals.iter().flat_map(|l| l.variables()).collect()
    }

    pub fn is_ground(&self) -> bool {
        self.literals.iter().all(|l| l.atom.is_ground())
    }

    /// Apply a substitution to every literal of this clause.
    pub fn apply_subst(&self, subst: &Substitution) -> Clause {
        Clause {
            literals: self
                .literals
                .iter()
                .map(|l| subst.apply_to_literal(l))
                .collect(),
        }
    }

    /// Remove repeated literals, keeping the first occurrence.
    pub fn deduplicated(&self) -> Clause {
        let mut literals: Vec<Literal> = Vec::with_capacity(self.literals.len());
        for lit in &self.literals {
            if !literals.contains(lit) {
                literals.push(lit.clone());
            }
        }
        Clause { literals }
    }

    /// A clause containing a literal and its complement is always true.
    pub fn is_tautology(&self) -> bool {
        self.literals
            .iter()
            .enumerate()
            .any(|(i, a)| self.literals[i + 1..].iter().any(|b| a.is_complementary(b)))
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.literals.is_empty() {
            return write!(f, "⊥");
        }
        for (i, lit) in self.literals.iter().enumerate() {
            if i > 0 {
                write!(f, " ∨ ")?;
            }
            write!(f, "{}", lit)?;
        }
        Ok(())
    }
}
