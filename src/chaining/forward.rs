//! Forward chaining to a fixed point.
//!
//! Each pass fires every rule against the current fact set. Bindings for a
//! rule body are built premise by premise, keeping every alternative, and
//! new facts from a rule are inserted only after its matching completes.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, trace, warn};

use super::knowledge_base::{KnowledgeBase, Rule};
use crate::syntax::Predicate;
use crate::unify::{unify_with, Substitution, UnifyResult};

/// Configuration for a forward-chaining run.
#[derive(Debug, Clone, Default)]
pub struct ChainingConfig {
    /// Maximum number of passes (None runs to the fixed point).
    pub max_passes: Option<usize>,
}

/// Record of one newly derived fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivationStep {
    pub rule: String,
    pub substitution: Substitution,
    pub premises: Vec<Predicate>,
    pub derived: Predicate,
    /// Pass (1-based) in which the fact was derived.
    pub pass: usize,
}

impl fmt::Display for DerivationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "rule {}", self.rule)?;
        writeln!(f, "  substitution: {}", self.substitution)?;
        writeln!(f, "  premises used:")?;
        for premise in &self.premises {
            writeln!(f, "   - {}", premise)?;
        }
        write!(f, "  derived: {}", self.derived)
    }
}

/// Result of a forward-chaining run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Derivation {
    pub steps: Vec<DerivationStep>,
    pub passes: usize,
    pub reached_fixpoint: bool,
}

impl Derivation {
    pub fn steps(&self) -> &[DerivationStep] {
        &self.steps
    }

    /// The derived facts in derivation order.
    pub fn derived_facts(&self) -> impl Iterator<Item = &Predicate> {
        self.steps.iter().map(|s| &s.derived)
    }

    /// The step that derived `fact`, if any.
    pub fn step_for(&self, fact: &Predicate) -> Option<&DerivationStep> {
        self.steps.iter().find(|s| &s.derived == fact)
    }
}

/// Run forward chaining until no rule adds a new fact.
pub fn forward_chain(kb: &mut KnowledgeBase, config: &ChainingConfig) -> Derivation {
    let initial = kb.fact_count();
    let rules: Vec<Rule> = kb.rules().to_vec();
    let mut steps = Vec::new();
    let mut passes = 0;
    let mut progress = true;

    info!(
        facts = initial,
        rules = rules.len(),
        "starting forward chaining"
    );

    while progress {
        if let Some(limit) = config.max_passes {
            if passes >= limit {
                warn!(
                    limit,
                    "forward chaining hit its pass limit before the fixed point"
                );
                break;
            }
        }
        progress = false;
        passes += 1;
        debug!(pass = passes, facts = kb.fact_count(), "forward chaining pass");

        for rule in &rules {
            let bindings = match_body(kb, &rule.body);
            trace!(rule = %rule.label, candidates = bindings.len(), "matched rule body");

            let mut fresh = Vec::new();
            for subst in bindings {
                let derived = subst.apply_to_predicate(&rule.head);
                if !derived.is_ground() {
                    warn!(
                        rule = %rule.label,
                        head = %derived,
                        "skipping non-ground head; rule is not range-restricted"
                    );
                    continue;
                }
                if kb.contains(&derived) || fresh.iter().any(|(f, _)| f == &derived) {
                    continue;
                }
                fresh.push((derived, subst));
            }

            for (derived, subst) in fresh {
                let premises = rule
                    .body
                    .iter()
                    .map(|p| subst.apply_to_predicate(p))
                    .collect();
                debug!(rule = %rule.label, fact = %derived, %subst, "derived fact");
                kb.insert_fact(derived.clone());
                steps.push(DerivationStep {
                    rule: rule.label.clone(),
                    substitution: subst,
                    premises,
                    derived,
                    pass: passes,
                });
                progress = true;
            }
        }
    }

    let reached_fixpoint = !progress;
    info!(
        passes,
        before = initial,
        after = kb.fact_count(),
        reached_fixpoint,
        "forward chaining completed"
    );

    Derivation {
        steps,
        passes,
        reached_fixpoint,
    }
}

/// All substitutions satisfying a conjunctive body against the current facts.
fn match_body(kb: &KnowledgeBase, body: &[Predicate]) -> Vec<Substitution> {
    let mut matches = vec![Substitution::empty()];
    for premise in body {
        let mut next = Vec::new();
        for m in &matches {
            let partial = m.apply_to_predicate(premise);
            for fact in kb.facts() {
                if let UnifyResult::Success(extended) = unify_with(&partial, fact, m) {
                    trace!(%premise, %fact, bindings = %extended, "premise matched");
                    next.push(extended);
                }
            }
        }
        matches = next;
        if matches.is_empty() {
            break;
        }
    }
    matches
}
