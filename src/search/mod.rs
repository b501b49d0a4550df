//! State-space search: adversarial (alpha-beta) and local (annealing).

mod alphabeta;
mod annealing;

pub use alphabeta::{
    alpha_beta, minimax, Bound, GameTree, GameTreeError, Node, Role, SearchEvent,
    SearchEventKind, SearchOutcome,
};
pub use annealing::{
    anneal, AnnealingConfig, AnnealingError, AnnealingOutcome, AnnealingStep, Board,
};
