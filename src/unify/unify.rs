//! Predicate-level matching of a template against a ground fact.

use std::fmt;

use super::Substitution;
use crate::syntax::{Arg, Constant, Predicate, Var};

/// Result of a unification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnifyResult {
    /// Unification succeeded with the given substitution.
    Success(Substitution),
    /// Unification failed.
    Failure(UnifyError),
}

impl UnifyResult {
    pub fn is_success(&self) -> bool {
        matches!(self, UnifyResult::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, UnifyResult::Failure(_))
    }

    /// The substitution on success, discarding the failure reason.
    pub fn ok(self) -> Option<Substitution> {
        match self {
            UnifyResult::Success(s) => Some(s),
            UnifyResult::Failure(_) => None,
        }
    }
}

/// Reasons why matching can fail.
///
/// These are expected negative outcomes that prune a candidate binding,
/// not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnifyError {
    /// Predicate names differ.
    NameClash { expected: String, found: String },
    /// Same name, different number of arguments.
    ArityMismatch {
        predicate: String,
        expected: usize,
        found: usize,
    },
    /// A constant in the pattern differs from the fact's argument.
    ConstantClash { expected: Constant, found: Arg },
    /// A variable already bound to one value meets another.
    InconsistentBinding { var: Var, bound: Arg, found: Arg },
    /// The fact side still carries a variable.
    NonGroundFact { var: Var },
}

impl fmt::Display for UnifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnifyError::NameClash { expected, found } => {
                write!(f, "predicate {} does not match {}", expected, found)
            }
            UnifyError::ArityMismatch {
                predicate,
                expected,
                found,
            } => write!(
                f,
                "{} expects {} arguments, found {}",
                predicate, expected, found
            ),
            UnifyError::ConstantClash { expected, found } => {
                write!(f, "constant {} does not match {}", expected, found)
            }
            UnifyError::InconsistentBinding { var, bound, found } => {
                write!(f, "{} is bound to {}, cannot rebind to {}", var, bound, found)
            }
            UnifyError::NonGroundFact { var } => {
                write!(f, "fact argument {} is not ground", var)
            }
        }
    }
}

/// Match a pattern predicate against a ground fact.
///
/// Returns the minimal substitution mapping the pattern's variables to the
/// fact's constants.
pub fn unify(pattern: &Predicate, fact: &Predicate) -> UnifyResult {
    unify_with(pattern, fact, &Substitution::empty())
}

/// Match a pattern against a fact, extending an existing substitution.
///
/// Every variable already bound in `subst` must meet the same value in the
/// fact; new bindings are added to a copy of `subst`.
pub fn unify_with(pattern: &Predicate, fact: &Predicate, subst: &Substitution) -> UnifyResult {
    if pattern.name != fact.name {
        return UnifyResult::Failure(UnifyError::NameClash {
            expected: pattern.name.clone(),
            found: fact.name.clone(),
        });
    }
    if pattern.args.len() != fact.args.len() {
        return UnifyResult::Failure(UnifyError::ArityMismatch {
            predicate: pattern.name.clone(),
            expected: pattern.args.len(),
            found: fact.args.len(),
        });
    }

    let mut result = subst.clone();
    for (pa, fa) in pattern.args.iter().zip(&fact.args) {
        if let Arg::Var(v) = fa {
            return UnifyResult::Failure(UnifyError::NonGroundFact { var: v.clone() });
        }
        match pa {
            Arg::Var(var) => match result.resolve(var) {
                Arg::Var(root) => result.bind(root, fa.clone()),
                bound if &bound == fa => {}
                bound => {
                    return UnifyResult::Failure(UnifyError::InconsistentBinding {
                        var: var.clone(),
                        bound,
                        found: fa.clone(),
                    })
                }
            },
            Arg::Const(c) => {
                if pa != fa {
                    return UnifyResult::Failure(UnifyError::ConstantClash {
                        expected: c.clone(),
                        found: fa.clone(),
                    });
                }
            }
        }
    }

    UnifyResult::Success(result)
}
