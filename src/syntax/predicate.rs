//! Predicate expressions: a name applied to a flat argument list.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use super::term::{Arg, Var};
use crate::parser::{parse_fact, parse_template, ParseError};

/// A predicate expression such as `Sells(Robert, x, A)`.
///
/// Name and arity are fixed once built. A ground predicate is a fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Predicate {
    pub name: String,
    pub args: Vec<Arg>,
}

impl Predicate {
    pub fn new(name: impl Into<String>, args: Vec<Arg>) -> Self {
        Predicate {
            name: name.into(),
            args,
        }
    }

    /// Create a 0-ary predicate (proposition).
    pub fn prop(name: impl Into<String>) -> Self {
        Predicate::new(name, Vec::new())
    }

    /// Parse a ground fact. Every argument is tagged as a constant.
    pub fn parse_fact(source: &str) -> Result<Self, ParseError> {
        parse_fact(source)
    }

    /// Parse a rule template. Lowercase-initial arguments become variables.
    pub fn parse_template(source: &str) -> Result<Self, ParseError> {
        parse_template(source)
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// Collect the variables of this predicate.
    pub fn variables(&self) -> BTreeSet<&Var> {
        self.args.iter().filter_map(Arg::as_var).collect()
    }

    /// A predicate with no variables.
    pub fn is_ground(&self) -> bool {
        !self.args.iter().any(Arg::is_var)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}
