//! Conversion from first-order formulas to clausal normal form.
//!
//! The textbook pipeline, one step per function:
//! 1. eliminate `→` and `↔`
//! 2. give every `∀` its own variable name
//! 3. push negations inward to the atoms
//! 4. drop universal quantifiers (all variables are implicitly universal)
//! 5. distribute `∨` over `∧` and read off the clauses
//!
//! Existential quantifiers are not part of [`Formula`], so there is no
//! Skolemization step. A negation in front of `∀` would introduce one and
//! is rejected.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;
use tracing::debug;

use crate::syntax::{Arg, Clause, Formula, Literal, Predicate, Var};
use crate::unify::Substitution;

/// Error during CNF conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CnfError {
    #[error("negated universal over {0} would need Skolemization")]
    NegatedUniversal(Var),
    #[error("unexpected connective after normalization: {0}")]
    NotNormalized(String),
}

/// Rewrite `A → B` as `¬A ∨ B` and `A ↔ B` as `(¬A ∨ B) ∧ (¬B ∨ A)`.
pub fn eliminate_implications(formula: &Formula) -> Formula {
    match formula {
        Formula::Atom(_) => formula.clone(),
        Formula::Not(inner) => Formula::negation(eliminate_implications(inner)),
        Formula::And(l, r) => Formula::and(eliminate_implications(l), eliminate_implications(r)),
        Formula::Or(l, r) => Formula::or(eliminate_implications(l), eliminate_implications(r)),
        Formula::Implies(l, r) => Formula::or(
            Formula::negation(eliminate_implications(l)),
            eliminate_implications(r),
        ),
        Formula::Iff(l, r) => {
            let l = eliminate_implications(l);
            let r = eliminate_implications(r);
            Formula::and(
                Formula::or(Formula::negation(l.clone()), r.clone()),
                Formula::or(Formula::negation(r), l),
            )
        }
        Formula::Forall(v, body) => {
            Formula::Forall(v.clone(), Box::new(eliminate_implications(body)))
        }
    }
}

/// Give every `∀` its own variable name.
///
/// The first binder of a name keeps it. A binder whose name is already
/// bound elsewhere in the formula, or occurs free, gets the smallest unused
/// numeric suffix, and its body follows the new name. After this step
/// dropping the quantifiers cannot merge two distinct variables.
pub fn rename_bound_variables(formula: &Formula) -> Formula {
    let mut taken = BTreeSet::new();
    let mut claimed = BTreeSet::new();
    collect_variable_names(formula, &mut Vec::new(), &mut taken, &mut claimed);
    rename_in_scope(formula, &BTreeMap::new(), &mut taken, &mut claimed)
}

/// Every variable name goes into `all`; names that occur free also go into
/// `free`.
fn collect_variable_names(
    formula: &Formula,
    bound: &mut Vec<Var>,
    all: &mut BTreeSet<String>,
    free: &mut BTreeSet<String>,
) {
    match formula {
        Formula::Atom(p) => {
            for arg in &p.args {
                if let Arg::Var(v) = arg {
                    all.insert(v.name().to_string());
                    if !bound.contains(v) {
                        free.insert(v.name().to_string());
                    }
                }
            }
        }
        Formula::Not(inner) => collect_variable_names(inner, bound, all, free),
        Formula::And(l, r) | Formula::Or(l, r) | Formula::Implies(l, r) | Formula::Iff(l, r) => {
            collect_variable_names(l, bound, all, free);
            collect_variable_names(r, bound, all, free);
        }
        Formula::Forall(v, body) => {
            all.insert(v.name().to_string());
            bound.push(v.clone());
            collect_variable_names(body, bound, all, free);
            bound.pop();
        }
    }
}

fn rename_in_scope(
    formula: &Formula,
    scope: &BTreeMap<Var, Var>,
    taken: &mut BTreeSet<String>,
    claimed: &mut BTreeSet<String>,
) -> Formula {
    match formula {
        Formula::Atom(p) => Formula::Atom(Predicate::new(
            p.name.clone(),
            p.args
                .iter()
                .map(|arg| match arg {
                    Arg::Var(v) => scope.get(v).map_or_else(|| arg.clone(), |r| Arg::Var(r.clone())),
                    Arg::Const(_) => arg.clone(),
                })
                .collect(),
        )),
        Formula::Not(inner) => Formula::negation(rename_in_scope(inner, scope, taken, claimed)),
        Formula::And(l, r) => Formula::and(
            rename_in_scope(l, scope, taken, claimed),
            rename_in_scope(r, scope, taken, claimed),
        ),
        Formula::Or(l, r) => Formula::or(
            rename_in_scope(l, scope, taken, claimed),
            rename_in_scope(r, scope, taken, claimed),
        ),
        Formula::Implies(l, r) => Formula::implies(
            rename_in_scope(l, scope, taken, claimed),
            rename_in_scope(r, scope, taken, claimed),
        ),
        Formula::Iff(l, r) => Formula::iff(
            rename_in_scope(l, scope, taken, claimed),
            rename_in_scope(r, scope, taken, claimed),
        ),
        Formula::Forall(v, body) => {
            let binder = if claimed.insert(v.name().to_string()) {
                v.clone()
            } else {
                let fresh = fresh_name(v.name(), taken);
                taken.insert(fresh.clone());
                claimed.insert(fresh.clone());
                Var::new(fresh)
            };
            let mut inner = scope.clone();
            inner.insert(v.clone(), binder.clone());
            Formula::Forall(binder, Box::new(rename_in_scope(body, &inner, taken, claimed)))
        }
    }
}

/// Move negations down to the atoms (negation normal form).
///
/// Expects a formula without `→` or `↔`.
pub fn push_negations(formula: &Formula) -> Result<Formula, CnfError> {
    match formula {
        Formula::Atom(_) => Ok(formula.clone()),
        Formula::And(l, r) => Ok(Formula::and(push_negations(l)?, push_negations(r)?)),
        Formula::Or(l, r) => Ok(Formula::or(push_negations(l)?, push_negations(r)?)),
        Formula::Forall(v, body) => Ok(Formula::Forall(v.clone(), Box::new(push_negations(body)?))),
        Formula::Not(inner) => match inner.as_ref() {
            Formula::Atom(_) => Ok(formula.clone()),
            Formula::Not(double) => push_negations(double),
            Formula::And(l, r) => Ok(Formula::or(
                push_negations(&Formula::negation((**l).clone()))?,
                push_negations(&Formula::negation((**r).clone()))?,
            )),
            Formula::Or(l, r) => Ok(Formula::and(
                push_negations(&Formula::negation((**l).clone()))?,
                push_negations(&Formula::negation((**r).clone()))?,
            )),
            Formula::Forall(v, _) => Err(CnfError::NegatedUniversal(v.clone())),
            other => Err(CnfError::NotNormalized(other.to_string())),
        },
        other => Err(CnfError::NotNormalized(other.to_string())),
    }
}

/// Remove every `∀`, leaving its variables free.
pub fn drop_universals(formula: &Formula) -> Formula {
    match formula {
        Formula::Forall(_, body) => drop_universals(body),
        Formula::Not(inner) => Formula::negation(drop_universals(inner)),
        Formula::And(l, r) => Formula::and(drop_universals(l), drop_universals(r)),
        Formula::Or(l, r) => Formula::or(drop_universals(l), drop_universals(r)),
        Formula::Implies(l, r) => Formula::implies(drop_universals(l), drop_universals(r)),
        Formula::Iff(l, r) => Formula::iff(drop_universals(l), drop_universals(r)),
        Formula::Atom(_) => formula.clone(),
    }
}

/// Distribute `∨` over `∧` on a quantifier-free formula in negation normal
/// form and return its clauses.
pub fn distribute(formula: &Formula) -> Result<Vec<Clause>, CnfError> {
    match formula {
        Formula::Atom(p) => Ok(vec![Clause::unit(Literal::positive(p.clone()))]),
        Formula::Not(inner) => match inner.as_ref() {
            Formula::Atom(p) => Ok(vec![Clause::unit(Literal::negative(p.clone()))]),
            other => Err(CnfError::NotNormalized(format!("¬({})", other))),
        },
        Formula::And(l, r) => {
            let mut clauses = distribute(l)?;
            clauses.extend(distribute(r)?);
            Ok(clauses)
        }
        Formula::Or(l, r) => {
            let left = distribute(l)?;
            let right = distribute(r)?;
            let mut clauses = Vec::with_capacity(left.len() * right.len());
            for a in &left {
                for b in &right {
                    let mut literals = a.literals.clone();
                    literals.extend(b.literals.iter().cloned());
                    clauses.push(Clause::new(literals).deduplicated());
                }
            }
            Ok(clauses)
        }
        other => Err(CnfError::NotNormalized(other.to_string())),
    }
}

/// Convert a formula to clauses.
pub fn to_cnf(formula: &Formula) -> Result<Vec<Clause>, CnfError> {
    let no_implications = eliminate_implications(formula);
    let renamed = rename_bound_variables(&no_implications);
    let nnf = push_negations(&renamed)?;
    let matrix = drop_universals(&nnf);
    let clauses = distribute(&matrix)?;
    debug!(%formula, clauses = clauses.len(), "converted to CNF");
    Ok(clauses)
}

/// Convert several formulas and concatenate their clauses in order.
pub fn to_cnf_all(formulas: &[Formula]) -> Result<Vec<Clause>, CnfError> {
    let mut clauses = Vec::new();
    for formula in formulas {
        clauses.extend(to_cnf(formula)?);
    }
    Ok(clauses)
}

/// Rename variables so that no two clauses share one.
///
/// The first clause to use a name keeps it; later clauses get the name with
/// the smallest numeric suffix not yet taken anywhere.
pub fn standardize_apart(clauses: &[Clause]) -> Vec<Clause> {
    let mut taken: BTreeSet<String> = clauses
        .iter()
        .flat_map(|c| c.variables())
        .map(|v| v.name().to_string())
        .collect();
    let mut claimed: BTreeSet<String> = BTreeSet::new();

    clauses
        .iter()
        .map(|clause| {
            let mut renaming: BTreeMap<Var, Arg> = BTreeMap::new();
            for var in clause_vars_in_order(clause) {
                if claimed.insert(var.name().to_string()) {
                    continue;
                }
                let fresh = fresh_name(var.name(), &taken);
                taken.insert(fresh.clone());
                claimed.insert(fresh.clone());
                renaming.insert(var, Arg::var(fresh));
            }
            if renaming.is_empty() {
                clause.clone()
            } else {
                clause.apply_subst(&renaming.into_iter().collect::<Substitution>())
            }
        })
        .collect()
}

fn clause_vars_in_order(clause: &Clause) -> Vec<Var> {
    let mut out: Vec<Var> = Vec::new();
    for lit in &clause.literals {
        for arg in &lit.atom.args {
            if let Arg::Var(v) = arg {
                if !out.contains(v) {
                    out.push(v.clone());
                }
            }
        }
    }
    out
}

fn fresh_name(base: &str, taken: &BTreeSet<String>) -> String {
    (1..)
        .map(|n| format!("{}{}", base, n))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}
