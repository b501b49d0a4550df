//! Substitution: mapping variables to arguments.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::syntax::{Arg, Literal, Predicate, Var};

/// A substitution mapping variables to arguments.
///
/// σ = {x₁ → a₁, ..., xₙ → aₙ}. A variable is usually bound to a constant;
/// a binding to another variable is followed when the substitution is
/// applied. Bindings are kept sorted so traces print deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Substitution {
    bindings: BTreeMap<Var, Arg>,
}

impl Substitution {
    /// Create an empty substitution (identity).
    pub fn empty() -> Self {
        Substitution {
            bindings: BTreeMap::new(),
        }
    }

    /// Create a substitution with a single binding.
    pub fn singleton(var: Var, arg: Arg) -> Self {
        let mut subst = Substitution::empty();
        subst.bind(var, arg);
        subst
    }

    /// Add a binding, replacing any earlier one for the same variable.
    pub fn bind(&mut self, var: Var, arg: Arg) {
        self.bindings.insert(var, arg);
    }

    /// Look up the direct binding of a variable.
    pub fn lookup(&self, var: &Var) -> Option<&Arg> {
        self.bindings.get(var)
    }

    /// Follow variable-to-variable bindings to the final value.
    ///
    /// Returns the last variable in the chain when it is unbound.
    pub fn resolve(&self, var: &Var) -> Arg {
        let mut current = Arg::Var(var.clone());
        let mut seen: BTreeSet<&Var> = BTreeSet::new();
        while let Arg::Var(v) = &current {
            match self.bindings.get_key_value(v) {
                Some((key, next)) if seen.insert(key) => current = next.clone(),
                _ => break,
            }
        }
        current
    }

    /// Apply this substitution to an argument.
    pub fn apply_to_arg(&self, arg: &Arg) -> Arg {
        match arg {
            Arg::Var(v) => self.resolve(v),
            Arg::Const(_) => arg.clone(),
        }
    }

    /// Apply this substitution to a predicate, argument by argument.
    pub fn apply_to_predicate(&self, predicate: &Predicate) -> Predicate {
        Predicate {
            name: predicate.name.clone(),
            args: predicate.args.iter().map(|a| self.apply_to_arg(a)).collect(),
        }
    }

    /// Apply this substitution to a literal, keeping its sign.
    pub fn apply_to_literal(&self, literal: &Literal) -> Literal {
        Literal {
            positive: literal.positive,
            atom: self.apply_to_predicate(&literal.atom),
        }
    }

    /// Iterate over the bindings in variable order.
    pub fn bindings(&self) -> impl Iterator<Item = (&Var, &Arg)> {
        self.bindings.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }
}

impl FromIterator<(Var, Arg)> for Substitution {
    fn from_iter<I: IntoIterator<Item = (Var, Arg)>>(iter: I) -> Self {
        Substitution {
            bindings: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (var, arg)) in self.bindings.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", var, arg)?;
        }
        write!(f, "}}")
    }
}

impl Serialize for Substitution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.bindings.len()))?;
        for (var, arg) in &self.bindings {
            map.serialize_entry(var.name(), &arg.to_string())?;
        }
        map.end()
    }
}
