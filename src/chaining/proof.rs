//! Proof trees reconstructed from derivation steps.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::forward::DerivationStep;
use crate::syntax::Predicate;

/// Justification of a fact: the rule that derived it and the proofs of
/// its premises. Facts with no derivation are leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProofTree {
    pub fact: Predicate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ProofTree>,
}

impl ProofTree {
    /// Build the proof of `goal` by walking `steps` backwards.
    ///
    /// A goal with no recorded step becomes a leaf, whether or not it is a
    /// known fact.
    ///
    /// Steps recorded by [`forward_chain`](super::forward_chain) never cite a
    /// premise derived later, so they cannot form a cycle. Hand-built step
    /// lists can; a premise already on the path to the goal becomes a leaf.
    pub fn build(goal: &Predicate, steps: &[DerivationStep]) -> ProofTree {
        let by_fact: HashMap<&Predicate, &DerivationStep> =
            steps.iter().map(|s| (&s.derived, s)).collect();
        let mut path = Vec::new();
        build_node(goal, &by_fact, &mut path)
    }

    pub fn is_leaf(&self) -> bool {
        self.rule.is_none()
    }

    /// Number of derived (non-leaf) nodes.
    pub fn internal_count(&self) -> usize {
        let own = usize::from(!self.is_leaf());
        own + self.children.iter().map(ProofTree::internal_count).sum::<usize>()
    }

    /// Leaf facts, left to right.
    pub fn leaves(&self) -> Vec<&Predicate> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Predicate>) {
        if self.is_leaf() {
            out.push(&self.fact);
        }
        for child in &self.children {
            child.collect_leaves(out);
        }
    }

    /// Height of the tree; a single leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(ProofTree::depth).max().unwrap_or(0)
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        write!(f, "{}- {}", "  ".repeat(indent), self.fact)?;
        if let Some(rule) = &self.rule {
            write!(f, "  [derived by: {}]", rule)?;
        }
        writeln!(f)?;
        for child in &self.children {
            child.render(f, indent + 1)?;
        }
        Ok(())
    }
}

fn build_node<'a>(
    goal: &'a Predicate,
    by_fact: &HashMap<&'a Predicate, &'a DerivationStep>,
    path: &mut Vec<&'a Predicate>,
) -> ProofTree {
    // Only reachable with hand-built cyclic steps.
    let step = by_fact.get(goal).copied().filter(|_| !path.contains(&goal));
    match step {
        None => ProofTree {
            fact: goal.clone(),
            rule: None,
            children: Vec::new(),
        },
        Some(step) => {
            path.push(goal);
            let children = step
                .premises
                .iter()
                .map(|p| build_node(p, by_fact, path))
                .collect();
            path.pop();
            ProofTree {
                fact: goal.clone(),
                rule: Some(step.rule.clone()),
                children,
            }
        }
    }
}

impl fmt::Display for ProofTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0)
    }
}
