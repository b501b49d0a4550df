use std::collections::BTreeSet;

use super::*;
use crate::chaining::DerivationStep;
use crate::samples;

// =============================================================================
// PROOF TREE SEMANTIC PROPERTIES
// =============================================================================
//
// A proof tree is read back from the derivation steps. Each internal node
// must cite the rule that actually produced its fact, its children must
// be that step's premises, and its leaves must be seed facts.

fn criminal_proof() -> (KnowledgeBase, Vec<DerivationStep>, ProofTree) {
    let mut kb = samples::criminal_kb().unwrap();
    let derivation = forward_chain(&mut kb, &ChainingConfig::default());
    let tree = ProofTree::build(&fact(samples::CRIMINAL_QUERY), derivation.steps());
    (kb, derivation.steps, tree)
}

#[test]
fn criminal_proof_shape() {
    let (_, _, tree) = criminal_proof();
    assert_eq!(tree.rule.as_deref(), Some("R_crime"));
    assert_eq!(tree.children.len(), 4);
    assert_eq!(tree.internal_count(), 4);
    assert_eq!(tree.depth(), 3);
    // Missile(t1) supports both Weapon(t1) and the sale.
    assert_eq!(tree.leaves().len(), 5);
    let distinct: BTreeSet<String> = tree.leaves().iter().map(|f| f.to_string()).collect();
    let expected: BTreeSet<String> = samples::CRIMINAL_FACTS.iter().map(|f| f.to_string()).collect();
    assert_eq!(distinct, expected);
}

#[test]
fn criminal_proof_rendering() {
    let (_, _, tree) = criminal_proof();
    let expected = "\
- Criminal(Robert)  [derived by: R_crime]
  - American(Robert)
  - Weapon(t1)  [derived by: R_missile_weapon]
    - Missile(t1)
  - Sells(Robert, t1, A)  [derived by: R_sells_by_robert]
    - Missile(t1)
    - Owns(A, t1)
  - Hostile(A)  [derived by: R_enemy_hostile]
    - Enemy(A, America)
";
    assert_eq!(tree.to_string(), expected);
}

// -------------------------------------------------------------------------
// Property: internal nodes mirror derivation steps
// -------------------------------------------------------------------------
#[test]
fn internal_nodes_match_their_steps() {
    let (_, steps, tree) = criminal_proof();

    fn check(node: &ProofTree, steps: &[DerivationStep]) {
        if let Some(rule) = &node.rule {
            let step = steps.iter().find(|s| s.derived == node.fact).unwrap();
            assert_eq!(&step.rule, rule);
            let children: Vec<&Predicate> = node.children.iter().map(|c| &c.fact).collect();
            let premises: Vec<&Predicate> = step.premises.iter().collect();
            assert_eq!(children, premises);
        }
        for child in &node.children {
            check(child, steps);
        }
    }
    check(&tree, &steps);
}

// -------------------------------------------------------------------------
// Property: leaves are known facts that no step derived
// -------------------------------------------------------------------------
#[test]
fn leaves_are_seed_facts() {
    let (kb, steps, tree) = criminal_proof();
    for leaf in tree.leaves() {
        assert!(kb.contains(leaf));
        assert!(steps.iter().all(|s| &s.derived != leaf));
    }
}

// -------------------------------------------------------------------------
// Property: recorded steps only cite facts derived before them
//
// So a proof built from a real derivation never meets a cycle.
// -------------------------------------------------------------------------
#[test]
fn steps_cite_only_earlier_facts() {
    let (_, steps, _) = criminal_proof();
    for (i, step) in steps.iter().enumerate() {
        for premise in &step.premises {
            assert!(
                steps[i..].iter().all(|later| &later.derived != premise),
                "{} cites {} before it is derived",
                step.rule,
                premise
            );
        }
    }
}

#[test]
fn seed_fact_is_its_own_proof() {
    let (_, steps, _) = criminal_proof();
    let tree = ProofTree::build(&fact("Missile(t1)"), &steps);
    assert!(tree.is_leaf());
    assert_eq!(tree.depth(), 1);
    assert_eq!(tree.to_string(), "- Missile(t1)\n");
}

#[test]
fn proof_of_recursive_closure_follows_the_chain() {
    let mut kb = kb_from(
        &["Parent(Ann, Bob)", "Parent(Bob, Cid)"],
        &[
            ("Ancestor(x, y)", &["Parent(x, y)"], "R_base"),
            ("Ancestor(x, z)", &["Parent(x, y)", "Ancestor(y, z)"], "R_step"),
        ],
    );
    let derivation = forward_chain(&mut kb, &ChainingConfig::default());
    let tree = ProofTree::build(&fact("Ancestor(Ann, Cid)"), derivation.steps());
    assert_eq!(tree.rule.as_deref(), Some("R_step"));
    assert_eq!(tree.internal_count(), 2);
    let leaves: Vec<String> = tree.leaves().iter().map(|f| f.to_string()).collect();
    assert_eq!(leaves, vec!["Parent(Ann, Bob)", "Parent(Bob, Cid)"]);
}

#[test]
fn proof_serializes_without_empty_fields() {
    let (_, steps, _) = criminal_proof();
    let tree = ProofTree::build(&fact("Weapon(t1)"), &steps);
    let value = serde_json::to_value(&tree).unwrap();
    assert_eq!(value["rule"], "R_missile_weapon");
    let child = &value["children"][0];
    assert!(child.get("rule").is_none());
    assert!(child.get("children").is_none());
}
