//! Forward-chaining inference over definite rules.

mod forward;
mod knowledge_base;
mod proof;

pub use forward::{forward_chain, ChainingConfig, Derivation, DerivationStep};
pub use knowledge_base::{KnowledgeBase, Rule};
pub use proof::ProofTree;
