use super::*;
use proptest::prelude::*;

use crate::propositional::{tt_entails, Prop};
use crate::search::{alpha_beta, minimax, GameTree};
use crate::unify::general::{resolve, unify_exprs, Expr};

// =============================================================================
// PROPERTY-BASED TESTS
// =============================================================================
//
// These use proptest to check that the properties above hold for
// arbitrary inputs rather than the hand-picked samples.

fn arb_constant() -> impl Strategy<Value = Arg> {
    "[A-Z][a-z0-9]{0,3}".prop_map(Arg::constant)
}

fn arb_ground_predicate() -> impl Strategy<Value = Predicate> {
    ("[A-Z][a-z]{0,4}", prop::collection::vec(arb_constant(), 0..=4))
        .prop_map(|(name, args)| Predicate::new(name, args))
}

/// A ground fact together with a pattern that abstracts some of its
/// positions into variables.
fn arb_fact_and_pattern() -> impl Strategy<Value = (Predicate, Predicate)> {
    arb_ground_predicate().prop_flat_map(|f| {
        let n = f.arity();
        (
            Just(f),
            prop::collection::vec(prop::option::of("[a-c]"), n..=n),
        )
            .prop_map(|(f, holes)| {
                let args = f
                    .args
                    .iter()
                    .zip(holes)
                    .map(|(arg, hole)| match hole {
                        Some(var) => Arg::var(var),
                        None => arg.clone(),
                    })
                    .collect();
                let p = Predicate::new(f.name.clone(), args);
                (f, p)
            })
    })
}

fn arb_expr(depth: u32) -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        "[X-Z]".prop_map(Expr::var),
        "[a-c]".prop_map(Expr::constant),
    ];
    leaf.prop_recursive(depth, 16, 3, |inner| {
        prop::collection::vec(inner, 1..=3).prop_map(Expr::list)
    })
}

fn arb_prop() -> impl Strategy<Value = Prop> {
    let leaf = "[P-S]".prop_map(Prop::symbol);
    leaf.prop_recursive(3, 12, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Prop::negation),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| Prop::and(a, b)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| Prop::or(a, b)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| Prop::implies(a, b)),
            (inner.clone(), inner).prop_map(|(a, b)| Prop::iff(a, b)),
        ]
    })
}

/// Complete binary game tree of the given depth over `leaves`.
fn game_tree(depth: u32, leaves: &[i64]) -> GameTree {
    fn build(tree: GameTree, name: String, depth: u32, leaves: &[i64], next: &mut usize) -> GameTree {
        if depth == 0 {
            let value = leaves[*next % leaves.len()];
            *next += 1;
            return tree.leaf(name, value);
        }
        let left = format!("{}0", name);
        let right = format!("{}1", name);
        let tree = tree.internal(name, &[left.as_str(), right.as_str()]);
        let tree = build(tree, left, depth - 1, leaves, next);
        build(tree, right, depth - 1, leaves, next)
    }
    let mut next = 0;
    build(GameTree::new(), "n".to_string(), depth, leaves, &mut next)
}

// -------------------------------------------------------------------------
// A pattern matches every fact it abstracts, and the match grounds it back
// -------------------------------------------------------------------------
proptest! {
    #[test]
    fn abstracted_pattern_matches_its_fact((f, p) in arb_fact_and_pattern()) {
        // Repeated variables may meet different constants, so only check
        // soundness when the match succeeds.
        match unify(&p, &f) {
            UnifyResult::Success(sigma) => {
                prop_assert_eq!(sigma.apply_to_predicate(&p), f);
            }
            UnifyResult::Failure(e) => {
                let repeated = matches!(e, UnifyError::InconsistentBinding { .. });
                prop_assert!(repeated, "unexpected failure: {}", e);
            }
        }
    }
}

// -------------------------------------------------------------------------
// Ground predicates match iff they are equal
// -------------------------------------------------------------------------
proptest! {
    #[test]
    fn ground_match_iff_equal(a in arb_ground_predicate(), b in arb_ground_predicate()) {
        let result = unify(&a, &b);
        prop_assert_eq!(result.is_success(), a == b);
        if let UnifyResult::Success(sigma) = result {
            prop_assert!(sigma.is_empty());
        }
    }
}

// -------------------------------------------------------------------------
// The fixed point does not depend on the order facts and rules were added
// -------------------------------------------------------------------------
proptest! {
    #[test]
    fn fixed_point_is_order_independent(
        edges in prop::collection::vec((0u8..5, 0u8..5), 0..8)
    ) {
        let facts: Vec<String> = edges
            .iter()
            .map(|(a, b)| format!("Edge(N{}, N{})", a, b))
            .collect();
        let rules: &[(&str, &[&str], &str)] = &[
            ("Path(x, y)", &["Edge(x, y)"], "R_edge"),
            ("Path(x, z)", &["Edge(x, y)", "Path(y, z)"], "R_extend"),
        ];

        let forward: Vec<&str> = facts.iter().map(String::as_str).collect();
        let backward: Vec<&str> = forward.iter().rev().copied().collect();

        let mut a = kb_from(&forward, rules);
        let reversed_rules: Vec<(&str, &[&str], &str)> = rules.iter().rev().copied().collect();
        let mut b = kb_from(&backward, &reversed_rules);
        let da = forward_chain(&mut a, &ChainingConfig::default());
        let db = forward_chain(&mut b, &ChainingConfig::default());

        prop_assert!(da.reached_fixpoint && db.reached_fixpoint);
        prop_assert_eq!(a.sorted_facts(), b.sorted_facts());
        for step in da.steps() {
            let proof = ProofTree::build(&step.derived, da.steps());
            for leaf in proof.leaves() {
                prop_assert_eq!(&leaf.name, "Edge");
            }
        }
    }
}

// -------------------------------------------------------------------------
// General unification: a unifier makes both sides equal, symmetrically
// -------------------------------------------------------------------------
proptest! {
    #[test]
    fn general_unifier_equalizes(x in arb_expr(3), y in arb_expr(3)) {
        let forward = unify_exprs(&x, &y);
        let backward = unify_exprs(&y, &x);
        prop_assert_eq!(forward.is_ok(), backward.is_ok());
        if let Ok(bindings) = forward {
            prop_assert_eq!(resolve(&x, &bindings), resolve(&y, &bindings));
        }
    }
}

// -------------------------------------------------------------------------
// Entailment basics: KB ⊨ KB, and KB ∧ Q ⊨ Q
// -------------------------------------------------------------------------
proptest! {
    #[test]
    fn entailment_is_reflexive_and_weakens(kb in arb_prop(), q in arb_prop()) {
        let symbols = ["P", "Q", "R", "S"];
        prop_assert!(tt_entails(&kb, &kb, &symbols[..]).unwrap().entails);
        let strengthened = Prop::and(kb.clone(), q.clone());
        prop_assert!(tt_entails(&strengthened, &q, &symbols[..]).unwrap().entails);
        let table = tt_entails(&kb, &q, &symbols[..]).unwrap();
        prop_assert_eq!(table.rows.len(), 16);
        prop_assert_eq!(table.entails, table.counterexamples().next().is_none());
    }
}

// -------------------------------------------------------------------------
// Alpha-beta agrees with plain minimax
// -------------------------------------------------------------------------
proptest! {
    #[test]
    fn alpha_beta_matches_minimax(
        depth in 1u32..=4,
        leaves in prop::collection::vec(-50i64..50, 1..16),
        maximizing in any::<bool>()
    ) {
        let tree = game_tree(depth, &leaves);
        let outcome = alpha_beta(&tree, "n", maximizing).unwrap();
        prop_assert_eq!(outcome.value, minimax(&tree, "n", maximizing).unwrap());
    }
}
