//! Literals: signed predicates in first-order logic.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use super::predicate::Predicate;
use super::term::{Arg, Var};

/// A literal is a signed atom.
///
/// - Positive literal: `food(Apple)` means "food(Apple) is true"
/// - Negative literal: `¬food(Apple)` means "food(Apple) is false"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Literal {
    /// True if positive, false if negated
    pub positive: bool,
    /// The underlying atom
    pub atom: Predicate,
}

impl Literal {
    /// Create a positive literal.
    pub fn positive(atom: Predicate) -> Self {
        Literal {
            positive: true,
            atom,
        }
    }

    /// Create a negative literal.
    pub fn negative(atom: Predicate) -> Self {
        Literal {
            positive: false,
            atom,
        }
    }

    /// Create a positive literal from predicate name and args.
    pub fn pos(predicate: impl Into<String>, args: Vec<Arg>) -> Self {
        Literal::positive(Predicate::new(predicate, args))
    }

    /// Create a negative literal from predicate name and args.
    pub fn neg(predicate: impl Into<String>, args: Vec<Arg>) -> Self {
        Literal::negative(Predicate::new(predicate, args))
    }

    /// Return the negation of this literal.
    pub fn negated(&self) -> Literal {
        Literal {
            positive: !self.positive,
            atom: self.atom.clone(),
        }
    }

    /// Two literals are complementary if they have the same atom but opposite signs.
    pub fn is_complementary(&self, other: &Literal) -> bool {
        self.positive != other.positive && self.atom == other.atom
    }

    pub fn variables(&self) -> BTreeSet<&Var> {
        self.atom.variables()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.positive {
            write!(f, "¬")?;
        }
        write!(f, "{}", self.atom)
    }
}
