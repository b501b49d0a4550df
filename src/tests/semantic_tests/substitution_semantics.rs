use super::*;

// =============================================================================
// SUBSTITUTION PROPERTIES
// =============================================================================
//
// Substitutions map rule variables to constants. Application must leave
// constants and unbound variables alone, and must follow variable chains
// left behind by unification.

fn bind(var: &str, arg: Arg) -> Substitution {
    Substitution::singleton(Var::new(var), arg)
}

// -------------------------------------------------------------------------
// Property: the empty substitution changes nothing
// -------------------------------------------------------------------------
#[test]
fn empty_substitution_is_identity() {
    let p = pattern("Sells(p, q, r)");
    assert_eq!(Substitution::empty().apply_to_predicate(&p), p);
    assert!(Substitution::empty().is_empty());
}

// -------------------------------------------------------------------------
// Property: application only touches bound variables
// -------------------------------------------------------------------------
#[test]
fn application_preserves_constants_and_unbound_variables() {
    let p = pattern("Sells(Robert, x, r)");
    let s = bind("x", Arg::constant("t1"));
    let applied = s.apply_to_predicate(&p);
    assert_eq!(applied.args[0], Arg::constant("Robert"));
    assert_eq!(applied.args[1], Arg::constant("t1"));
    assert_eq!(applied.args[2], Arg::var("r"));
    assert!(!applied.is_ground());
}

// -------------------------------------------------------------------------
// Property: a substitution covering every variable grounds the predicate
// -------------------------------------------------------------------------
#[test]
fn full_substitution_grounds_pattern() {
    let p = pattern("Criminal(p)");
    let s = bind("p", Arg::constant("Robert"));
    assert_eq!(s.apply_to_predicate(&p), fact("Criminal(Robert)"));
}

// -------------------------------------------------------------------------
// Property: variable chains resolve to their final value
// -------------------------------------------------------------------------
#[test]
fn chains_resolve_to_final_value() {
    let s: Substitution = [
        (Var::new("x"), Arg::var("y")),
        (Var::new("y"), Arg::constant("Nono")),
    ]
    .into_iter()
    .collect();
    assert_eq!(s.resolve(&Var::new("x")), Arg::constant("Nono"));
    assert_eq!(s.lookup(&Var::new("x")), Some(&Arg::var("y")));
}

// -------------------------------------------------------------------------
// Property: cyclic chains terminate
// -------------------------------------------------------------------------
#[test]
fn cyclic_chain_terminates() {
    let s: Substitution = [
        (Var::new("x"), Arg::var("y")),
        (Var::new("y"), Arg::var("x")),
    ]
    .into_iter()
    .collect();
    assert!(s.resolve(&Var::new("x")).is_var());
}

// -------------------------------------------------------------------------
// Property: literals keep their polarity under substitution
// -------------------------------------------------------------------------
#[test]
fn literal_polarity_is_preserved() {
    let lit = Literal::neg("Enemy", vec![Arg::var("x"), Arg::constant("America")]);
    let applied = bind("x", Arg::constant("A")).apply_to_literal(&lit);
    assert_eq!(applied, Literal::neg("Enemy", vec![Arg::constant("A"), Arg::constant("America")]));
}

#[test]
fn display_lists_bindings_in_order() {
    let s: Substitution = [
        (Var::new("q"), Arg::constant("t1")),
        (Var::new("p"), Arg::constant("Robert")),
    ]
    .into_iter()
    .collect();
    assert_eq!(s.to_string(), "{p: Robert, q: t1}");
}
