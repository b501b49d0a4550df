use super::*;
use crate::samples;

// =============================================================================
// FORWARD CHAINING SEMANTIC PROPERTIES
// =============================================================================
//
// Forward chaining computes the least set of facts closed under the
// rules. The tests below check closure, monotonicity, soundness of every
// recorded step and the order in which the criminal scenario unfolds.

fn criminal() -> KnowledgeBase {
    samples::criminal_kb().unwrap()
}

// -------------------------------------------------------------------------
// Property: the criminal scenario derives its four facts in rule order
// -------------------------------------------------------------------------
#[test]
fn criminal_scenario_derivation_order() {
    let mut kb = criminal();
    let derivation = forward_chain(&mut kb, &ChainingConfig::default());
    let derived: Vec<String> = derivation.derived_facts().map(|f| f.to_string()).collect();
    assert_eq!(
        derived,
        vec!["Weapon(t1)", "Hostile(A)", "Sells(Robert, t1, A)", "Criminal(Robert)"]
    );
    let rules: Vec<&str> = derivation.steps().iter().map(|s| s.rule.as_str()).collect();
    assert_eq!(
        rules,
        vec!["R_missile_weapon", "R_enemy_hostile", "R_sells_by_robert", "R_crime"]
    );
    assert!(derivation.reached_fixpoint);
    assert_eq!(kb.fact_count(), 8);
    assert!(kb.query(samples::CRIMINAL_QUERY).unwrap());
}

#[test]
fn criminal_step_records_bindings_and_premises() {
    let mut kb = criminal();
    let derivation = forward_chain(&mut kb, &ChainingConfig::default());
    let step = derivation.step_for(&fact("Criminal(Robert)")).unwrap();
    assert_eq!(step.substitution.to_string(), "{p: Robert, q: t1, r: A}");
    let premises: Vec<String> = step.premises.iter().map(|p| p.to_string()).collect();
    assert_eq!(
        premises,
        vec!["American(Robert)", "Weapon(t1)", "Sells(Robert, t1, A)", "Hostile(A)"]
    );
}

// -------------------------------------------------------------------------
// Property: the result is a fixed point
//
// Chaining a second time over the saturated base derives nothing.
// -------------------------------------------------------------------------
#[test]
fn saturated_base_is_closed() {
    let mut kb = criminal();
    forward_chain(&mut kb, &ChainingConfig::default());
    let before = kb.sorted_facts().into_iter().cloned().collect::<Vec<_>>();
    let again = forward_chain(&mut kb, &ChainingConfig::default());
    assert!(again.steps().is_empty());
    assert_eq!(again.passes, 1);
    let after = kb.sorted_facts().into_iter().cloned().collect::<Vec<_>>();
    assert_eq!(before, after);
}

// -------------------------------------------------------------------------
// Property: every step is sound
//
// Its premises were known before it fired and its head instance under
// the recorded substitution is the derived fact.
// -------------------------------------------------------------------------
#[test]
fn every_step_is_justified() {
    let mut kb = criminal();
    let seeds: Vec<Predicate> = kb.facts().cloned().collect();
    let rules = kb.rules().to_vec();
    let derivation = forward_chain(&mut kb, &ChainingConfig::default());

    let mut known = seeds;
    for step in derivation.steps() {
        let rule = rules.iter().find(|r| r.label == step.rule).unwrap();
        assert_eq!(step.substitution.apply_to_predicate(&rule.head), step.derived);
        for premise in &step.premises {
            assert!(known.contains(premise), "{} used before it was known", premise);
        }
        assert!(!known.contains(&step.derived), "{} derived twice", step.derived);
        known.push(step.derived.clone());
    }
}

// -------------------------------------------------------------------------
// Property: chaining is monotone
//
// Seed facts never disappear and removing a seed never adds conclusions.
// -------------------------------------------------------------------------
#[test]
fn fewer_seeds_never_derive_more() {
    let mut full = criminal();
    forward_chain(&mut full, &ChainingConfig::default());

    let seeds: Vec<&str> = samples::CRIMINAL_FACTS
        .iter()
        .copied()
        .filter(|f| *f != "Enemy(A, America)")
        .collect();
    let mut partial = samples::criminal_kb_with(&seeds).unwrap();
    let derivation = forward_chain(&mut partial, &ChainingConfig::default());

    for f in partial.facts() {
        assert!(full.contains(f));
    }
    assert!(!partial.query("Hostile(A)").unwrap());
    assert!(!partial.query(samples::CRIMINAL_QUERY).unwrap());
    assert_eq!(derivation.steps().len(), 2);
}

#[test]
fn missing_citizenship_blocks_the_conclusion() {
    let seeds: Vec<&str> = samples::CRIMINAL_FACTS
        .iter()
        .copied()
        .filter(|f| *f != "American(Robert)")
        .collect();
    let mut kb = samples::criminal_kb_with(&seeds).unwrap();
    forward_chain(&mut kb, &ChainingConfig::default());
    assert!(kb.query("Sells(Robert, t1, A)").unwrap());
    assert!(!kb.query(samples::CRIMINAL_QUERY).unwrap());
}

// -------------------------------------------------------------------------
// Property: the fixed point does not depend on rule order
//
// With R_crime listed first it cannot fire until a later pass, but the
// saturated base is the same and no fact is derived twice.
// -------------------------------------------------------------------------
#[test]
fn rule_order_does_not_change_fixed_point() {
    let mut baseline = criminal();
    forward_chain(&mut baseline, &ChainingConfig::default());

    let by_label = |label: &str| {
        samples::CRIMINAL_RULES
            .iter()
            .find(|rule| rule.2 == label)
            .copied()
            .unwrap()
    };
    let conclusion_first: Vec<(&str, &[&str], &str)> =
        ["R_crime", "R_sells_by_robert", "R_missile_weapon", "R_enemy_hostile"]
            .into_iter()
            .map(by_label)
            .collect();
    let reversed: Vec<(&str, &[&str], &str)> =
        samples::CRIMINAL_RULES.iter().rev().copied().collect();

    for rules in [conclusion_first, reversed] {
        let mut kb = kb_from(samples::CRIMINAL_FACTS, &rules);
        let derivation = forward_chain(&mut kb, &ChainingConfig::default());
        assert!(derivation.reached_fixpoint);
        assert_eq!(kb.sorted_facts(), baseline.sorted_facts());

        let derived: Vec<String> = derivation.steps().iter().map(|s| s.derived.to_string()).collect();
        let distinct: std::collections::BTreeSet<&String> = derived.iter().collect();
        assert_eq!(derived.len(), 4);
        assert_eq!(distinct.len(), derived.len(), "fact derived twice: {:?}", derived);
        assert!(kb.query(samples::CRIMINAL_QUERY).unwrap());
    }
}

// -------------------------------------------------------------------------
// Property: the pass limit stops early and says so
// -------------------------------------------------------------------------
#[test]
fn pass_limit_is_reported() {
    let mut kb = kb_from(
        &["Edge(A, B)", "Edge(B, C)", "Edge(C, D)", "Edge(D, E)"],
        &[
            ("Path(x, y)", &["Edge(x, y)"], "R_edge"),
            ("Path(x, z)", &["Path(x, y)", "Edge(y, z)"], "R_extend"),
        ],
    );
    let derivation = forward_chain(&mut kb, &ChainingConfig { max_passes: Some(1) });
    assert_eq!(derivation.passes, 1);
    assert!(!derivation.reached_fixpoint);
    assert!(!kb.query("Path(A, E)").unwrap());

    let derivation = forward_chain(&mut kb, &ChainingConfig::default());
    assert!(derivation.reached_fixpoint);
    assert!(kb.query("Path(A, E)").unwrap());
}

// -------------------------------------------------------------------------
// Property: duplicate facts are stored once
// -------------------------------------------------------------------------
#[test]
fn duplicate_facts_are_idempotent() {
    let mut kb = KnowledgeBase::new();
    assert!(kb.add_fact("Missile(t1)").unwrap());
    assert!(!kb.add_fact("Missile(t1)").unwrap());
    assert_eq!(kb.fact_count(), 1);
}

#[test]
fn rules_with_unbound_head_variables_are_skipped() {
    let mut kb = kb_from(&["Missile(t1)"], &[("Owner(x, y)", &["Missile(x)"], "R_loose")]);
    assert_eq!(kb.rules()[0].unbound_head_variables(), vec!["y".to_string()]);
    let derivation = forward_chain(&mut kb, &ChainingConfig::default());
    assert!(derivation.steps().is_empty());
    assert!(derivation.reached_fixpoint);
}
