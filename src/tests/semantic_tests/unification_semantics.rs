use super::*;

// =============================================================================
// PATTERN MATCHING SEMANTIC PROPERTIES
// =============================================================================
//
// Rule premises are matched one way against ground facts. A successful
// match must make the pattern equal to the fact, must be minimal, and
// must never contradict bindings carried in from earlier premises.

// -------------------------------------------------------------------------
// Property: a successful match makes the pattern equal to the fact
// -------------------------------------------------------------------------
#[test]
fn match_instantiates_pattern_to_fact() {
    let p = pattern("Sells(p, q, r)");
    let f = fact("Sells(Robert, t1, A)");
    let UnifyResult::Success(sigma) = unify(&p, &f) else {
        panic!("pattern should match");
    };
    assert_eq!(sigma.apply_to_predicate(&p), f);
}

// -------------------------------------------------------------------------
// Property: the substitution binds exactly the pattern's variables
// -------------------------------------------------------------------------
#[test]
fn match_is_minimal() {
    let p = pattern("Enemy(x, America)");
    let sigma = unify(&p, &fact("Enemy(A, America)")).ok().unwrap();
    let domain: Vec<&str> = sigma.bindings().map(|(v, _)| v.name()).collect();
    assert_eq!(domain, vec!["x"]);
}

// -------------------------------------------------------------------------
// Property: repeated variables must meet the same constant
// -------------------------------------------------------------------------
#[test]
fn repeated_variable_must_agree() {
    let p = pattern("Same(x, x)");
    assert!(unify(&p, &fact("Same(A, A)")).is_success());
    assert!(matches!(
        unify(&p, &fact("Same(A, B)")),
        UnifyResult::Failure(UnifyError::InconsistentBinding { .. })
    ));
}

// -------------------------------------------------------------------------
// Property: constants in the pattern are exact
// -------------------------------------------------------------------------
#[test]
fn pattern_constants_must_match() {
    let p = pattern("Enemy(x, America)");
    assert!(matches!(
        unify(&p, &fact("Enemy(A, Canada)")),
        UnifyResult::Failure(UnifyError::ConstantClash { .. })
    ));
}

#[test]
fn name_and_arity_are_checked_first() {
    assert!(matches!(
        unify(&pattern("Missile(x)"), &fact("Weapon(t1)")),
        UnifyResult::Failure(UnifyError::NameClash { .. })
    ));
    assert!(matches!(
        unify(&pattern("Owns(x)"), &fact("Owns(A, t1)")),
        UnifyResult::Failure(UnifyError::ArityMismatch { expected: 1, found: 2, .. })
    ));
}

// -------------------------------------------------------------------------
// Property: matching extends earlier bindings without contradicting them
// -------------------------------------------------------------------------
#[test]
fn extension_respects_existing_bindings() {
    let earlier = unify(&pattern("American(p)"), &fact("American(Robert)"))
        .ok()
        .unwrap();
    let extended = unify_with(&pattern("Sells(p, q, r)"), &fact("Sells(Robert, t1, A)"), &earlier)
        .ok()
        .unwrap();
    assert_eq!(extended.len(), 3);
    assert_eq!(extended.lookup(&Var::new("p")), Some(&Arg::constant("Robert")));

    let clash = unify_with(&pattern("Sells(p, q, r)"), &fact("Sells(West, t1, A)"), &earlier);
    assert!(clash.is_failure());
}

// -------------------------------------------------------------------------
// Property: a failed extension leaves the incoming substitution untouched
// -------------------------------------------------------------------------
#[test]
fn failed_extension_does_not_mutate_input() {
    let earlier = unify(&pattern("Weapon(q)"), &fact("Weapon(t1)")).ok().unwrap();
    let before = earlier.clone();
    let _ = unify_with(&pattern("Pair(z, q)"), &fact("Pair(A, t2)"), &earlier);
    assert_eq!(earlier, before);
}

// -------------------------------------------------------------------------
// Property: facts with variables are rejected
// -------------------------------------------------------------------------
#[test]
fn non_ground_fact_is_rejected() {
    let p = pattern("Owns(x, y)");
    let not_a_fact = pattern("Owns(A, z)");
    assert!(matches!(
        unify(&p, &not_a_fact),
        UnifyResult::Failure(UnifyError::NonGroundFact { .. })
    ));
}

#[test]
fn zero_arity_patterns_match_by_name() {
    let p = Predicate::prop("Raining");
    let sigma = unify(&p, &Predicate::prop("Raining")).ok().unwrap();
    assert!(sigma.is_empty());
    assert!(unify(&p, &Predicate::prop("Sunny")).is_failure());
}
