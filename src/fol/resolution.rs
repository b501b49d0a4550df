//! Binary resolution and replay of caller-authored refutations.
//!
//! No proof search happens here: a [`Refutation`] lists which clauses to
//! resolve and under which substitution, and [`Refutation::replay`] checks
//! that every step is a valid resolution ending in the empty clause.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::syntax::{Clause, Literal};
use crate::unify::Substitution;

/// Error while resolving or replaying a refutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("no complementary literals between {left} and {right}")]
    NoComplementaryPair { left: Clause, right: Clause },
    #[error("step {step} refers to unknown clause ({clause})")]
    UnknownClause { step: usize, clause: usize },
    #[error("step {step} produced {found}, expected {expected}")]
    UnexpectedResolvent {
        step: usize,
        expected: Clause,
        found: Clause,
    },
    #[error("refutation ends in {last} rather than the empty clause")]
    NotRefuted { last: Clause },
}

/// Resolve two clauses after applying `subst` to both.
///
/// Uses the first literal of `left` whose complement occurs in `right`.
/// The resolvent keeps the remaining literals of `left`, then those of
/// `right`, without repeats.
pub fn resolve(left: &Clause, right: &Clause, subst: &Substitution) -> Result<Clause, ResolutionError> {
    let l = left.apply_subst(subst);
    let r = right.apply_subst(subst);

    let pair = l.literals.iter().enumerate().find_map(|(i, lit)| {
        r.literals
            .iter()
            .position(|other| lit.is_complementary(other))
            .map(|j| (i, j))
    });
    let Some((i, j)) = pair else {
        return Err(ResolutionError::NoComplementaryPair { left: l, right: r });
    };

    let literals: Vec<Literal> = l
        .literals
        .iter()
        .enumerate()
        .filter(|(k, _)| *k != i)
        .chain(r.literals.iter().enumerate().filter(|(k, _)| *k != j))
        .map(|(_, lit)| lit.clone())
        .collect();
    Ok(Clause::new(literals).deduplicated())
}

/// One authored resolution step.
///
/// Clause numbers are 1-based over the premises followed by the
/// resolvents of earlier steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefutationStep {
    pub left: usize,
    pub right: usize,
    pub substitution: Substitution,
    /// When present, replay checks the resolvent against it.
    pub expected: Option<Clause>,
}

impl RefutationStep {
    pub fn new(left: usize, right: usize, substitution: Substitution) -> Self {
        RefutationStep {
            left,
            right,
            substitution,
            expected: None,
        }
    }

    pub fn expecting(mut self, clause: Clause) -> Self {
        self.expected = Some(clause);
        self
    }
}

/// A refutation proof: premises, the negated goal and the steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Refutation {
    pub premises: Vec<Clause>,
    pub negated_goal: Clause,
    pub steps: Vec<RefutationStep>,
}

/// A replayed step with its computed resolvent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedStep {
    /// Number given to the resolvent.
    pub number: usize,
    pub left: usize,
    pub right: usize,
    pub left_clause: Clause,
    pub right_clause: Clause,
    pub substitution: Substitution,
    pub resolvent: Clause,
}

impl fmt::Display for ResolvedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}) resolve ({}) {} with ({}) {}",
            self.number, self.left, self.left_clause, self.right, self.right_clause
        )?;
        if !self.substitution.is_empty() {
            write!(f, " using {}", self.substitution)?;
        }
        write!(f, "\n      ⇒ {}", self.resolvent)
    }
}

/// Every clause of a replayed refutation, numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefutationTrace {
    pub clauses: Vec<Clause>,
    pub steps: Vec<ResolvedStep>,
}

impl Refutation {
    /// Number of the negated goal in the clause list.
    pub fn goal_number(&self) -> usize {
        self.premises.len() + 1
    }

    /// Recompute every step and confirm the last resolvent is `⊥`.
    pub fn replay(&self) -> Result<RefutationTrace, ResolutionError> {
        let mut clauses = self.premises.clone();
        clauses.push(self.negated_goal.clone());
        let mut steps = Vec::with_capacity(self.steps.len());

        for (index, step) in self.steps.iter().enumerate() {
            let step_no = index + 1;
            let left = clause_at(&clauses, step_no, step.left)?.clone();
            let right = clause_at(&clauses, step_no, step.right)?.clone();
            let resolvent = resolve(&left, &right, &step.substitution)?;

            if let Some(expected) = &step.expected {
                if expected != &resolvent {
                    return Err(ResolutionError::UnexpectedResolvent {
                        step: step_no,
                        expected: expected.clone(),
                        found: resolvent,
                    });
                }
            }

            debug!(step = step_no, %resolvent, "resolved");
            clauses.push(resolvent.clone());
            steps.push(ResolvedStep {
                number: clauses.len(),
                left: step.left,
                right: step.right,
                left_clause: left,
                right_clause: right,
                substitution: step.substitution.clone(),
                resolvent,
            });
        }

        let last = steps
            .last()
            .map_or_else(|| self.negated_goal.clone(), |s| s.resolvent.clone());
        if !last.is_empty() || steps.is_empty() {
            return Err(ResolutionError::NotRefuted { last });
        }
        info!(steps = steps.len(), "refutation complete");
        Ok(RefutationTrace { clauses, steps })
    }
}

fn clause_at(clauses: &[Clause], step: usize, number: usize) -> Result<&Clause, ResolutionError> {
    number
        .checked_sub(1)
        .and_then(|i| clauses.get(i))
        .ok_or(ResolutionError::UnknownClause {
            step,
            clause: number,
        })
}
