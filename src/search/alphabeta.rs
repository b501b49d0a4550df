//! Minimax with alpha-beta pruning over an explicit game tree.

use std::fmt;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use thiserror::Error;
use tracing::{debug, trace};

/// Error raised while walking a game tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameTreeError {
    #[error("unknown node {0}")]
    UnknownNode(String),
    #[error("internal node {0} has no children")]
    NoChildren(String),
    #[error("node {0} is its own ancestor")]
    Cycle(String),
}

/// A node: either a scored leaf or a list of child names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Node {
    Leaf(i64),
    Internal(Vec<String>),
}

/// A game tree keyed by node name. Children are explored in the order given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameTree {
    nodes: IndexMap<String, Node>,
}

impl GameTree {
    pub fn new() -> Self {
        GameTree::default()
    }

    pub fn leaf(mut self, name: impl Into<String>, value: i64) -> Self {
        self.nodes.insert(name.into(), Node::Leaf(value));
        self
    }

    pub fn internal(mut self, name: impl Into<String>, children: &[&str]) -> Self {
        let children = children.iter().map(|c| c.to_string()).collect();
        self.nodes.insert(name.into(), Node::Internal(children));
        self
    }

    pub fn node(&self, name: &str) -> Result<&Node, GameTreeError> {
        self.nodes
            .get(name)
            .ok_or_else(|| GameTreeError::UnknownNode(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Draw the tree below `root` with box-drawing branches, labelling
    /// internal nodes with the player to move.
    pub fn render_ascii(&self, root: &str, maximizing: bool) -> Result<String, GameTreeError> {
        let mut out = String::new();
        let mut path = Vec::new();
        self.render_node(root, maximizing, "", None, &mut path, &mut out)?;
        Ok(out)
    }

    fn render_node<'a>(
        &'a self,
        name: &'a str,
        maximizing: bool,
        prefix: &str,
        last: Option<bool>,
        path: &mut Vec<&'a str>,
        out: &mut String,
    ) -> Result<(), GameTreeError> {
        if path.contains(&name) {
            return Err(GameTreeError::Cycle(name.to_string()));
        }
        let branch = match last {
            None => "",
            Some(true) => "└── ",
            Some(false) => "├── ",
        };
        match self.node(name)? {
            Node::Leaf(value) => {
                out.push_str(&format!("{}{}{} = {}\n", prefix, branch, name, value));
            }
            Node::Internal(children) => {
                out.push_str(&format!(
                    "{}{}{} ({})\n",
                    prefix,
                    branch,
                    name,
                    Role::from(maximizing)
                ));
                let child_prefix = match last {
                    None => prefix.to_string(),
                    Some(true) => format!("{}    ", prefix),
                    Some(false) => format!("{}│   ", prefix),
                };
                path.push(name);
                for (i, child) in children.iter().enumerate() {
                    let is_last = i + 1 == children.len();
                    self.render_node(child, !maximizing, &child_prefix, Some(is_last), path, out)?;
                }
                path.pop();
            }
        }
        Ok(())
    }
}

/// Whose turn it is at a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Max,
    Min,
}

impl From<bool> for Role {
    fn from(maximizing: bool) -> Self {
        if maximizing {
            Role::Max
        } else {
            Role::Min
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Max => write!(f, "MAX"),
            Role::Min => write!(f, "MIN"),
        }
    }
}

/// A score extended with the two infinities used as initial α and β.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Bound {
    NegInf,
    Finite(i64),
    PosInf,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::NegInf => write!(f, "-inf"),
            Bound::Finite(v) => write!(f, "{}", v),
            Bound::PosInf => write!(f, "inf"),
        }
    }
}

impl Serialize for Bound {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Bound::Finite(v) => serializer.serialize_i64(*v),
            other => serializer.serialize_str(&other.to_string()),
        }
    }
}

/// One step of an alpha-beta search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchEvent {
    pub depth: usize,
    #[serde(flatten)]
    pub kind: SearchEventKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SearchEventKind {
    Visit {
        node: String,
        role: Role,
        alpha: Bound,
        beta: Bound,
    },
    Leaf {
        node: String,
        value: i64,
    },
    Update {
        node: String,
        role: Role,
        value: i64,
        alpha: Bound,
        beta: Bound,
    },
    Prune {
        node: String,
        role: Role,
        alpha: Bound,
        beta: Bound,
        skipped: Vec<String>,
    },
}

impl fmt::Display for SearchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", "  ".repeat(self.depth))?;
        match &self.kind {
            SearchEventKind::Visit {
                node,
                role,
                alpha,
                beta,
            } => write!(
                f,
                "exploring {} node {} (depth={}), α={}, β={}",
                role, node, self.depth, alpha, beta
            ),
            SearchEventKind::Leaf { node, value } => {
                write!(f, "reached leaf {} with value {}", node, value)
            }
            SearchEventKind::Update {
                node,
                role,
                value,
                alpha,
                beta,
            } => write!(
                f,
                "updated {} node {}: value={}, α={}, β={}",
                role, node, value, alpha, beta
            ),
            SearchEventKind::Prune {
                node,
                role,
                alpha,
                beta,
                skipped,
            } => {
                write!(
                    f,
                    "pruning at {} node {} (β={} ≤ α={})",
                    role, node, beta, alpha
                )?;
                if !skipped.is_empty() {
                    write!(f, ", skipping {}", skipped.join(", "))?;
                }
                Ok(())
            }
        }
    }
}

/// Result of an alpha-beta search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub value: i64,
    pub events: Vec<SearchEvent>,
    /// Children skipped by cutoffs, in the order they were cut.
    pub pruned: Vec<String>,
}

struct Search<'a> {
    tree: &'a GameTree,
    events: Vec<SearchEvent>,
    pruned: Vec<String>,
    path: Vec<&'a str>,
}

impl<'a> Search<'a> {
    fn record(&mut self, depth: usize, kind: SearchEventKind) {
        trace!(depth, ?kind, "alpha-beta event");
        self.events.push(SearchEvent { depth, kind });
    }

    fn alpha_beta(
        &mut self,
        name: &'a str,
        depth: usize,
        mut alpha: Bound,
        mut beta: Bound,
        maximizing: bool,
    ) -> Result<i64, GameTreeError> {
        let tree = self.tree;
        let children = match tree.node(name)? {
            Node::Leaf(value) => {
                self.record(
                    depth,
                    SearchEventKind::Leaf {
                        node: name.to_string(),
                        value: *value,
                    },
                );
                return Ok(*value);
            }
            Node::Internal(children) if children.is_empty() => {
                return Err(GameTreeError::NoChildren(name.to_string()))
            }
            Node::Internal(children) => children,
        };
        if self.path.contains(&name) {
            return Err(GameTreeError::Cycle(name.to_string()));
        }

        let role = Role::from(maximizing);
        self.record(
            depth,
            SearchEventKind::Visit {
                node: name.to_string(),
                role,
                alpha,
                beta,
            },
        );

        self.path.push(name);
        let mut best: Option<i64> = None;
        for (i, child) in children.iter().enumerate() {
            let value = self.alpha_beta(child, depth + 1, alpha, beta, !maximizing)?;
            let current = match (best, maximizing) {
                (None, _) => value,
                (Some(b), true) => b.max(value),
                (Some(b), false) => b.min(value),
            };
            best = Some(current);
            if maximizing {
                alpha = alpha.max(Bound::Finite(value));
            } else {
                beta = beta.min(Bound::Finite(value));
            }
            self.record(
                depth,
                SearchEventKind::Update {
                    node: name.to_string(),
                    role,
                    value: current,
                    alpha,
                    beta,
                },
            );

            if beta <= alpha {
                let skipped: Vec<String> = children[i + 1..].to_vec();
                if !skipped.is_empty() {
                    debug!(node = name, ?skipped, "alpha-beta cutoff");
                }
                self.pruned.extend(skipped.iter().cloned());
                self.record(
                    depth,
                    SearchEventKind::Prune {
                        node: name.to_string(),
                        role,
                        alpha,
                        beta,
                        skipped,
                    },
                );
                break;
            }
        }
        self.path.pop();

        best.ok_or_else(|| GameTreeError::NoChildren(name.to_string()))
    }
}

/// Evaluate `root` with alpha-beta pruning, recording every step.
pub fn alpha_beta(tree: &GameTree, root: &str, maximizing: bool) -> Result<SearchOutcome, GameTreeError> {
    let mut search = Search {
        tree,
        events: Vec::new(),
        pruned: Vec::new(),
        path: Vec::new(),
    };
    let value = search.alpha_beta(root, 0, Bound::NegInf, Bound::PosInf, maximizing)?;
    debug!(root, value, pruned = search.pruned.len(), "alpha-beta finished");
    Ok(SearchOutcome {
        value,
        events: search.events,
        pruned: search.pruned,
    })
}

/// Plain minimax without pruning.
pub fn minimax(tree: &GameTree, root: &str, maximizing: bool) -> Result<i64, GameTreeError> {
    let mut path = Vec::new();
    minimax_inner(tree, root, maximizing, &mut path)
}

fn minimax_inner<'a>(
    tree: &'a GameTree,
    name: &'a str,
    maximizing: bool,
    path: &mut Vec<&'a str>,
) -> Result<i64, GameTreeError> {
    match tree.node(name)? {
        Node::Leaf(value) => Ok(*value),
        Node::Internal(children) => {
            if path.contains(&name) {
                return Err(GameTreeError::Cycle(name.to_string()));
            }
            path.push(name);
            let mut values = Vec::with_capacity(children.len());
            for child in children {
                values.push(minimax_inner(tree, child, !maximizing, path)?);
            }
            path.pop();
            let best = if maximizing {
                values.into_iter().max()
            } else {
                values.into_iter().min()
            };
            best.ok_or_else(|| GameTreeError::NoChildren(name.to_string()))
        }
    }
}
