//! Flat arguments: variables and constants, tagged explicitly.

use std::fmt;

use serde::Serialize;

/// A variable: a placeholder bound during matching.
///
/// In the textual syntax variables start with a lowercase letter (`x`, `p`,
/// `q1`), but once parsed the tag alone decides how an argument is treated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Var {
    name: String,
}

impl Var {
    pub fn new(name: impl Into<String>) -> Self {
        Var { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A constant: a fixed individual such as `Robert` or `t1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Constant {
    name: String,
}

impl Constant {
    pub fn new(name: impl Into<String>) -> Self {
        Constant { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A predicate argument.
///
/// Arguments are never compound: a predicate expression is a name applied
/// to a flat list of variables and constants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arg {
    Var(Var),
    Const(Constant),
}

impl Arg {
    /// Create a variable argument.
    pub fn var(name: impl Into<String>) -> Self {
        Arg::Var(Var::new(name))
    }

    /// Create a constant argument.
    pub fn constant(name: impl Into<String>) -> Self {
        Arg::Const(Constant::new(name))
    }

    /// Classify a bare token with the casing convention: a lowercase first
    /// letter makes a variable, anything else a constant.
    pub fn from_token(token: &str) -> Self {
        if token.chars().next().is_some_and(|c| c.is_lowercase()) {
            Arg::var(token)
        } else {
            Arg::constant(token)
        }
    }

    pub fn is_var(&self) -> bool {
        matches!(self, Arg::Var(_))
    }

    pub fn as_var(&self) -> Option<&Var> {
        match self {
            Arg::Var(v) => Some(v),
            Arg::Const(_) => None,
        }
    }

    /// The textual name, regardless of tag.
    pub fn name(&self) -> &str {
        match self {
            Arg::Var(v) => v.name(),
            Arg::Const(c) => c.name(),
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Var(v) => write!(f, "{}", v),
            Arg::Const(c) => write!(f, "{}", c),
        }
    }
}

impl From<Var> for Arg {
    fn from(var: Var) -> Self {
        Arg::Var(var)
    }
}

impl From<Constant> for Arg {
    fn from(constant: Constant) -> Self {
        Arg::Const(constant)
    }
}
