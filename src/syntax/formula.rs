//! Formula syntax for first-order logic, built programmatically.

use std::fmt;

use super::predicate::Predicate;
use super::term::{Arg, Var};

/// A first-order formula.
///
/// Only universal quantification is supported; the knowledge bases this
/// crate converts to clauses are written with `∀` alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formula {
    Atom(Predicate),
    Not(Box<Formula>),
    And(Box<Formula>, Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
    Implies(Box<Formula>, Box<Formula>),
    Iff(Box<Formula>, Box<Formula>),
    Forall(Var, Box<Formula>),
}

impl Formula {
    pub fn atom(name: impl Into<String>, args: Vec<Arg>) -> Self {
        Formula::Atom(Predicate::new(name, args))
    }

    pub fn negation(inner: Formula) -> Self {
        Formula::Not(Box::new(inner))
    }

    pub fn and(left: Formula, right: Formula) -> Self {
        Formula::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Formula, right: Formula) -> Self {
        Formula::Or(Box::new(left), Box::new(right))
    }

    pub fn implies(left: Formula, right: Formula) -> Self {
        Formula::Implies(Box::new(left), Box::new(right))
    }

    pub fn iff(left: Formula, right: Formula) -> Self {
        Formula::Iff(Box::new(left), Box::new(right))
    }

    pub fn forall(var: impl Into<String>, body: Formula) -> Self {
        Formula::Forall(Var::new(var), Box::new(body))
    }

    /// Quantify over several variables, outermost first.
    pub fn forall_many(vars: &[&str], body: Formula) -> Self {
        vars.iter()
            .rev()
            .fold(body, |acc, v| Formula::forall(*v, acc))
    }

    /// Fold a non-empty list into a right-nested conjunction.
    pub fn conjunction(mut parts: Vec<Formula>) -> Option<Self> {
        let last = parts.pop()?;
        Some(parts.into_iter().rev().fold(last, |acc, f| Formula::and(f, acc)))
    }

    fn precedence(&self) -> u8 {
        match self {
            Formula::Iff(..) => 1,
            Formula::Implies(..) => 2,
            Formula::Or(..) => 3,
            Formula::And(..) => 4,
            Formula::Not(_) | Formula::Forall(..) => 5,
            Formula::Atom(_) => 6,
        }
    }

    fn fmt_child(&self, child: &Formula, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if child.precedence() <= self.precedence() && child.precedence() < 5 {
            write!(f, "({})", child)
        } else {
            write!(f, "{}", child)
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Atom(p) => write!(f, "{}", p),
            Formula::Not(inner) => {
                write!(f, "¬")?;
                self.fmt_child(inner, f)
            }
            Formula::And(l, r) => {
                self.fmt_child(l, f)?;
                write!(f, " ∧ ")?;
                self.fmt_child(r, f)
            }
            Formula::Or(l, r) => {
                self.fmt_child(l, f)?;
                write!(f, " ∨ ")?;
                self.fmt_child(r, f)
            }
            Formula::Implies(l, r) => {
                self.fmt_child(l, f)?;
                write!(f, " → ")?;
                self.fmt_child(r, f)
            }
            Formula::Iff(l, r) => {
                self.fmt_child(l, f)?;
                write!(f, " ↔ ")?;
                self.fmt_child(r, f)
            }
            Formula::Forall(v, body) => {
                write!(f, "∀{}: ", v)?;
                write!(f, "{}", body)
            }
        }
    }
}
