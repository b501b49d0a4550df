//! Bundled sample problems used by the command-line tool and the tests.

use crate::chaining::KnowledgeBase;
use crate::fol::{standardize_apart, to_cnf_all, CnfError, Refutation, RefutationStep};
use crate::parser::ParseError;
use crate::search::GameTree;
use crate::syntax::{Arg, Clause, Formula, Literal, Var};
use crate::unify::Substitution;

/// Seed facts of the criminal example.
pub const CRIMINAL_FACTS: &[&str] = &[
    "Owns(A, t1)",
    "Missile(t1)",
    "American(Robert)",
    "Enemy(A, America)",
];

/// Rules of the criminal example as `(head, body, label)`.
pub const CRIMINAL_RULES: &[(&str, &[&str], &str)] = &[
    ("Weapon(x)", &["Missile(x)"], "R_missile_weapon"),
    ("Hostile(x)", &["Enemy(x, America)"], "R_enemy_hostile"),
    (
        "Sells(Robert, x, A)",
        &["Missile(x)", "Owns(A, x)"],
        "R_sells_by_robert",
    ),
    (
        "Criminal(p)",
        &["American(p)", "Weapon(q)", "Sells(p, q, r)", "Hostile(r)"],
        "R_crime",
    ),
];

pub const CRIMINAL_QUERY: &str = "Criminal(Robert)";

/// The criminal knowledge base with every seed fact.
pub fn criminal_kb() -> Result<KnowledgeBase, ParseError> {
    criminal_kb_with(CRIMINAL_FACTS)
}

/// The criminal rules over a chosen set of seed facts.
pub fn criminal_kb_with(facts: &[&str]) -> Result<KnowledgeBase, ParseError> {
    let mut kb = KnowledgeBase::new();
    for fact in facts {
        kb.add_fact(fact)?;
    }
    for (head, body, label) in CRIMINAL_RULES {
        kb.add_rule(head, body, *label)?;
    }
    Ok(kb)
}

pub const PROP_KB: &str = "(Q -> P) ^ (P -> ~Q) ^ (Q v R)";
pub const PROP_SYMBOLS: &[&str] = &["P", "Q", "R"];
pub const PROP_QUERIES: &[&str] = &["R", "R -> P", "Q -> R"];

pub const UNIFY_LEFT: &str = "[f, X, [g, Y]]";
pub const UNIFY_RIGHT: &str = "[f, a, [g, b]]";

pub const GAME_ROOT: &str = "A";

/// Two-ply binary game tree with MAX to move at the root.
pub fn game_tree() -> GameTree {
    GameTree::new()
        .internal("A", &["B", "C"])
        .internal("B", &["D", "E"])
        .internal("C", &["F", "G"])
        .internal("D", &["L1", "L2"])
        .internal("E", &["L3", "L4"])
        .internal("F", &["L5", "L6"])
        .internal("G", &["L7", "L8"])
        .leaf("L1", 10)
        .leaf("L2", 9)
        .leaf("L3", 14)
        .leaf("L4", 18)
        .leaf("L5", 5)
        .leaf("L6", 4)
        .leaf("L7", 50)
        .leaf("L8", 3)
}

fn v(name: &str) -> Arg {
    Arg::var(name)
}

fn c(name: &str) -> Arg {
    Arg::constant(name)
}

fn atom(name: &str, args: Vec<Arg>) -> Formula {
    Formula::atom(name, args)
}

/// The "John likes peanuts" statements, labelled `a` to `h`.
pub fn peanuts_statements() -> Vec<(&'static str, Formula)> {
    vec![
        (
            "a",
            Formula::forall(
                "x",
                Formula::implies(
                    atom("food", vec![v("x")]),
                    atom("likes", vec![c("John"), v("x")]),
                ),
            ),
        ),
        (
            "b",
            Formula::and(
                atom("food", vec![c("Apple")]),
                atom("food", vec![c("Vegetables")]),
            ),
        ),
        (
            "c",
            Formula::forall_many(
                &["x", "y"],
                Formula::implies(
                    Formula::and(
                        atom("eats", vec![v("x"), v("y")]),
                        Formula::negation(atom("killed", vec![v("x")])),
                    ),
                    atom("food", vec![v("y")]),
                ),
            ),
        ),
        (
            "d",
            Formula::and(
                atom("eats", vec![c("Anil"), c("Peanuts")]),
                atom("alive", vec![c("Anil")]),
            ),
        ),
        (
            "e",
            Formula::forall(
                "x",
                Formula::implies(
                    atom("eats", vec![c("Anil"), v("x")]),
                    atom("eats", vec![c("Harry"), v("x")]),
                ),
            ),
        ),
        (
            "f",
            Formula::forall(
                "x",
                Formula::implies(
                    Formula::negation(atom("killed", vec![v("x")])),
                    atom("alive", vec![v("x")]),
                ),
            ),
        ),
        (
            "g",
            Formula::forall(
                "x",
                Formula::implies(
                    atom("alive", vec![v("x")]),
                    Formula::negation(atom("killed", vec![v("x")])),
                ),
            ),
        ),
        ("h", atom("likes", vec![c("John"), c("Peanuts")])),
    ]
}

/// Clauses of the peanuts statements, standardized apart.
pub fn peanuts_clauses() -> Result<Vec<Clause>, CnfError> {
    let formulas: Vec<Formula> = peanuts_statements().into_iter().map(|(_, f)| f).collect();
    Ok(standardize_apart(&to_cnf_all(&formulas)?))
}

fn bind(var: &str, value: &str) -> Substitution {
    Substitution::singleton(Var::new(var), c(value))
}

/// Refutation of `¬likes(John, Peanuts)` against [`peanuts_clauses`].
///
/// Clause numbers: 1 to 10 are the premises, 11 the negated goal, and
/// each step's resolvent takes the next number.
pub fn peanuts_refutation() -> Result<Refutation, CnfError> {
    let premises = peanuts_clauses()?;
    let negated_goal = Clause::unit(Literal::neg("likes", vec![c("John"), c("Peanuts")]));

    let steps = vec![
        // ¬likes(John, Peanuts) with ¬food(x) ∨ likes(John, x)
        RefutationStep::new(11, 1, bind("x", "Peanuts"))
            .expecting(Clause::unit(Literal::neg("food", vec![c("Peanuts")]))),
        // with ¬eats(x1, y) ∨ killed(x1) ∨ food(y)
        RefutationStep::new(12, 4, bind("y", "Peanuts")).expecting(Clause::new(vec![
            Literal::neg("eats", vec![v("x1"), c("Peanuts")]),
            Literal::pos("killed", vec![v("x1")]),
        ])),
        // with eats(Anil, Peanuts)
        RefutationStep::new(13, 5, bind("x1", "Anil"))
            .expecting(Clause::unit(Literal::pos("killed", vec![c("Anil")]))),
        // with ¬alive(x4) ∨ ¬killed(x4)
        RefutationStep::new(14, 9, bind("x4", "Anil"))
            .expecting(Clause::unit(Literal::neg("alive", vec![c("Anil")]))),
        // with alive(Anil)
        RefutationStep::new(15, 6, Substitution::empty()).expecting(Clause::empty()),
    ];

    Ok(Refutation {
        premises,
        negated_goal,
        steps,
    })
}
