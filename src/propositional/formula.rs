//! Propositional formulas and their evaluation under a model.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use thiserror::Error;

use crate::parser::{parse_proposition, ParseError};

/// An assignment of truth values to symbols.
pub type Model = BTreeMap<String, bool>;

/// Evaluation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("symbol {0} has no value in the model")]
    Unassigned(String),
    #[error("{0} symbols is too many to enumerate")]
    TooManySymbols(usize),
    #[error("symbol {0} is listed more than once")]
    DuplicateSymbol(String),
}

/// A propositional formula.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Prop {
    Symbol(String),
    Not(Box<Prop>),
    And(Box<Prop>, Box<Prop>),
    Or(Box<Prop>, Box<Prop>),
    Implies(Box<Prop>, Box<Prop>),
    Iff(Box<Prop>, Box<Prop>),
}

impl Prop {
    pub fn symbol(name: impl Into<String>) -> Self {
        Prop::Symbol(name.into())
    }

    pub fn negation(inner: Prop) -> Self {
        Prop::Not(Box::new(inner))
    }

    pub fn and(left: Prop, right: Prop) -> Self {
        Prop::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Prop, right: Prop) -> Self {
        Prop::Or(Box::new(left), Box::new(right))
    }

    pub fn implies(left: Prop, right: Prop) -> Self {
        Prop::Implies(Box::new(left), Box::new(right))
    }

    pub fn iff(left: Prop, right: Prop) -> Self {
        Prop::Iff(Box::new(left), Box::new(right))
    }

    /// Parse ASCII (`~ ^ v -> <->`) or Unicode connectives.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        parse_proposition(source)
    }

    /// Truth value under `model`. Every symbol must be assigned.
    pub fn eval(&self, model: &Model) -> Result<bool, EvalError> {
        Ok(match self {
            Prop::Symbol(s) => *model
                .get(s)
                .ok_or_else(|| EvalError::Unassigned(s.clone()))?,
            Prop::Not(p) => !p.eval(model)?,
            Prop::And(l, r) => l.eval(model)? && r.eval(model)?,
            Prop::Or(l, r) => l.eval(model)? || r.eval(model)?,
            Prop::Implies(l, r) => !l.eval(model)? || r.eval(model)?,
            Prop::Iff(l, r) => l.eval(model)? == r.eval(model)?,
        })
    }

    /// Symbols mentioned in the formula, sorted.
    pub fn symbols(&self) -> BTreeSet<&str> {
        let mut out = BTreeSet::new();
        self.collect_symbols(&mut out);
        out
    }

    fn collect_symbols<'a>(&'a self, out: &mut BTreeSet<&'a str>) {
        match self {
            Prop::Symbol(s) => {
                out.insert(s.as_str());
            }
            Prop::Not(p) => p.collect_symbols(out),
            Prop::And(l, r) | Prop::Or(l, r) | Prop::Implies(l, r) | Prop::Iff(l, r) => {
                l.collect_symbols(out);
                r.collect_symbols(out);
            }
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Prop::Iff(..) => 1,
            Prop::Implies(..) => 2,
            Prop::Or(..) => 3,
            Prop::And(..) => 4,
            Prop::Not(_) => 5,
            Prop::Symbol(_) => 6,
        }
    }

    fn fmt_binary(
        &self,
        f: &mut fmt::Formatter<'_>,
        left: &Prop,
        op: &str,
        right: &Prop,
        right_assoc: bool,
    ) -> fmt::Result {
        let prec = self.precedence();
        let (left_paren, right_paren) = if right_assoc {
            (left.precedence() <= prec, right.precedence() < prec)
        } else {
            (left.precedence() < prec, right.precedence() <= prec)
        };
        wrap(f, left, left_paren)?;
        write!(f, " {} ", op)?;
        wrap(f, right, right_paren)
    }
}

fn wrap(f: &mut fmt::Formatter<'_>, p: &Prop, paren: bool) -> fmt::Result {
    if paren {
        write!(f, "({})", p)
    } else {
        write!(f, "{}", p)
    }
}

impl fmt::Display for Prop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prop::Symbol(s) => write!(f, "{}", s),
            Prop::Not(p) => {
                write!(f, "~")?;
                wrap(f, p, p.precedence() < 5)
            }
            Prop::And(l, r) => self.fmt_binary(f, l, "^", r, false),
            Prop::Or(l, r) => self.fmt_binary(f, l, "v", r, false),
            Prop::Implies(l, r) => self.fmt_binary(f, l, "->", r, true),
            Prop::Iff(l, r) => self.fmt_binary(f, l, "<->", r, false),
        }
    }
}
