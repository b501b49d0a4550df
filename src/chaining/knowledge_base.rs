//! Knowledge base: a monotonic fact set plus an ordered rule list.

use std::fmt;

use indexmap::IndexSet;
use serde::Serialize;
use tracing::{debug, trace};

use crate::parser::ParseError;
use crate::syntax::Predicate;

/// A definite rule: `body₁ ∧ … ∧ bodyₙ → head`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    pub head: Predicate,
    pub body: Vec<Predicate>,
    pub label: String,
}

impl Rule {
    pub fn new(head: Predicate, body: Vec<Predicate>, label: impl Into<String>) -> Self {
        Rule {
            head,
            body,
            label: label.into(),
        }
    }

    /// Parse a rule from templates.
    pub fn parse(head: &str, body: &[&str], label: impl Into<String>) -> Result<Self, ParseError> {
        let head = Predicate::parse_template(head)?;
        let body = body
            .iter()
            .map(|b| Predicate::parse_template(b))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Rule::new(head, body, label))
    }

    /// Head variables that no body premise can bind.
    pub fn unbound_head_variables(&self) -> Vec<String> {
        let head_vars = self.head.variables();
        head_vars
            .into_iter()
            .filter(|v| !self.body.iter().any(|b| b.variables().contains(v)))
            .map(|v| v.name().to_string())
            .collect()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.label)?;
        for (i, premise) in self.body.iter().enumerate() {
            if i > 0 {
                write!(f, " ∧ ")?;
            }
            write!(f, "{}", premise)?;
        }
        write!(f, " → {}", self.head)
    }
}

/// Facts and rules for forward chaining.
///
/// Facts only grow. Insertion order is kept so traces are reproducible.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    facts: IndexSet<Predicate>,
    rules: Vec<Rule>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        KnowledgeBase::default()
    }

    /// Parse and add a ground fact. Returns whether it was new.
    pub fn add_fact(&mut self, source: &str) -> Result<bool, ParseError> {
        let fact = Predicate::parse_fact(source)?;
        Ok(self.insert_fact(fact))
    }

    /// Parse and add a rule.
    pub fn add_rule(
        &mut self,
        head: &str,
        body: &[&str],
        label: impl Into<String>,
    ) -> Result<(), ParseError> {
        let rule = Rule::parse(head, body, label)?;
        self.insert_rule(rule);
        Ok(())
    }

    /// Add an already-built fact. Returns whether it was new.
    pub fn insert_fact(&mut self, fact: Predicate) -> bool {
        trace!(%fact, "adding fact");
        self.facts.insert(fact)
    }

    pub fn insert_rule(&mut self, rule: Rule) {
        debug!(label = %rule.label, "adding rule");
        self.rules.push(rule);
    }

    /// Membership test for a textual ground query.
    pub fn query(&self, source: &str) -> Result<bool, ParseError> {
        let goal = Predicate::parse_fact(source)?;
        Ok(self.contains(&goal))
    }

    pub fn contains(&self, fact: &Predicate) -> bool {
        self.facts.contains(fact)
    }

    /// Facts in insertion order.
    pub fn facts(&self) -> impl Iterator<Item = &Predicate> {
        self.facts.iter()
    }

    /// Facts sorted by their rendering, for stable listings.
    pub fn sorted_facts(&self) -> Vec<&Predicate> {
        let mut facts: Vec<&Predicate> = self.facts.iter().collect();
        facts.sort_by_key(|f| f.to_string());
        facts
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn fact_count(&self) -> usize {
        self.facts.len()
    }
}
