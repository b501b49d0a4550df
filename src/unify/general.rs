//! General unification over nested expressions, with occurs-check.
//!
//! Separate from the flat predicate matcher used by forward chaining: both
//! sides may contain variables and lists nest arbitrarily.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::parser::{parse_expr, ParseError};

/// A nested expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Expr {
    Var(String),
    Const(String),
    List(Vec<Expr>),
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    pub fn constant(name: impl Into<String>) -> Self {
        Expr::Const(name.into())
    }

    pub fn list(items: Vec<Expr>) -> Self {
        Expr::List(items)
    }

    /// Read a bracketed expression such as `[f, X, [g, Y]]`.
    ///
    /// The head of each list is a functor constant; other atoms follow the
    /// template casing convention (lowercase-initial means variable).
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        parse_expr(source)
    }

    pub fn is_var(&self) -> bool {
        matches!(self, Expr::Var(_))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Var(name) | Expr::Const(name) => write!(f, "{}", name),
            Expr::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Triangular bindings: a bound value may mention other bound variables.
pub type Bindings = BTreeMap<String, Expr>;

/// Why two expressions failed to unify.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneralUnifyError {
    #[error("cannot unify {left} with {right}")]
    Clash { left: Expr, right: Expr },
    #[error("lists have different lengths: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
    #[error("occurs check failed: {var} occurs in {expr}")]
    OccursCheck { var: String, expr: Expr },
}

/// One step of a traced unification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnifyEvent {
    pub depth: usize,
    pub kind: UnifyEventKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum UnifyEventKind {
    Attempt { left: Expr, right: Expr },
    Identical,
    FollowBinding { var: String, value: Expr },
    Bind { var: String, value: Expr },
    LengthMismatch,
    OccursCheck { var: String, expr: Expr },
    Clash,
}

impl fmt::Display for UnifyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", "  ".repeat(self.depth))?;
        match &self.kind {
            UnifyEventKind::Attempt { left, right } => write!(f, "unify({}, {})", left, right),
            UnifyEventKind::Identical => write!(f, "identical, no change"),
            UnifyEventKind::FollowBinding { var, value } => {
                write!(f, "{} is bound, continue with {}", var, value)
            }
            UnifyEventKind::Bind { var, value } => write!(f, "bind {} -> {}", var, value),
            UnifyEventKind::LengthMismatch => write!(f, "lists have different lengths, fail"),
            UnifyEventKind::OccursCheck { var, expr } => {
                write!(f, "occurs check failed: {} occurs in {}", var, expr)
            }
            UnifyEventKind::Clash => write!(f, "different constants or structures, fail"),
        }
    }
}

/// Outcome of [`unify_traced`].
#[derive(Debug, Clone)]
pub struct UnifyTrace {
    pub result: Result<Bindings, GeneralUnifyError>,
    pub events: Vec<UnifyEvent>,
}

struct Unifier {
    bindings: Bindings,
    events: Vec<UnifyEvent>,
}

impl Unifier {
    fn record(&mut self, depth: usize, kind: UnifyEventKind) {
        self.events.push(UnifyEvent { depth, kind });
    }

    fn unify(&mut self, x: &Expr, y: &Expr, depth: usize) -> Result<(), GeneralUnifyError> {
        self.record(
            depth,
            UnifyEventKind::Attempt {
                left: x.clone(),
                right: y.clone(),
            },
        );

        if x == y {
            self.record(depth, UnifyEventKind::Identical);
            return Ok(());
        }

        match (x, y) {
            (Expr::Var(v), _) => self.unify_var(v, y, depth),
            (_, Expr::Var(v)) => self.unify_var(v, x, depth),
            (Expr::List(xs), Expr::List(ys)) => {
                if xs.len() != ys.len() {
                    self.record(depth, UnifyEventKind::LengthMismatch);
                    return Err(GeneralUnifyError::LengthMismatch {
                        left: xs.len(),
                        right: ys.len(),
                    });
                }
                for (xi, yi) in xs.iter().zip(ys) {
                    self.unify(xi, yi, depth + 1)?;
                }
                Ok(())
            }
            _ => {
                self.record(depth, UnifyEventKind::Clash);
                Err(GeneralUnifyError::Clash {
                    left: x.clone(),
                    right: y.clone(),
                })
            }
        }
    }

    fn unify_var(&mut self, var: &str, x: &Expr, depth: usize) -> Result<(), GeneralUnifyError> {
        if let Some(bound) = self.bindings.get(var).cloned() {
            self.record(
                depth,
                UnifyEventKind::FollowBinding {
                    var: var.to_string(),
                    value: bound.clone(),
                },
            );
            return self.unify(&bound, x, depth + 1);
        }

        if let Expr::Var(other) = x {
            if let Some(bound) = self.bindings.get(other).cloned() {
                self.record(
                    depth,
                    UnifyEventKind::FollowBinding {
                        var: other.clone(),
                        value: bound.clone(),
                    },
                );
                return self.unify(&Expr::var(var), &bound, depth + 1);
            }
        }

        if occurs(var, x, &self.bindings) {
            self.record(
                depth,
                UnifyEventKind::OccursCheck {
                    var: var.to_string(),
                    expr: x.clone(),
                },
            );
            return Err(GeneralUnifyError::OccursCheck {
                var: var.to_string(),
                expr: x.clone(),
            });
        }

        self.record(
            depth,
            UnifyEventKind::Bind {
                var: var.to_string(),
                value: x.clone(),
            },
        );
        self.bindings.insert(var.to_string(), x.clone());
        Ok(())
    }
}

/// Does `var` occur in `expr`, looking through existing bindings?
fn occurs(var: &str, expr: &Expr, bindings: &Bindings) -> bool {
    match expr {
        Expr::Var(v) if v == var => true,
        Expr::Var(v) => bindings.get(v).is_some_and(|b| occurs(var, b, bindings)),
        Expr::Const(_) => false,
        Expr::List(items) => items.iter().any(|e| occurs(var, e, bindings)),
    }
}

/// Unify two expressions, returning the bindings that make them equal.
pub fn unify_exprs(x: &Expr, y: &Expr) -> Result<Bindings, GeneralUnifyError> {
    unify_traced(x, y).result
}

/// Unify two expressions and keep every step for display.
pub fn unify_traced(x: &Expr, y: &Expr) -> UnifyTrace {
    let mut unifier = Unifier {
        bindings: Bindings::new(),
        events: Vec::new(),
    };
    let result = unifier.unify(x, y, 0).map(|()| unifier.bindings);
    UnifyTrace {
        result,
        events: unifier.events,
    }
}

/// Apply triangular bindings until no bound variable remains.
pub fn resolve(expr: &Expr, bindings: &Bindings) -> Expr {
    match expr {
        Expr::Var(v) => match bindings.get(v) {
            Some(bound) => resolve(bound, bindings),
            None => expr.clone(),
        },
        Expr::Const(_) => expr.clone(),
        Expr::List(items) => Expr::List(items.iter().map(|e| resolve(e, bindings)).collect()),
    }
}
