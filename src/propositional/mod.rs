//! Propositional logic: formulas and truth-table entailment.

mod formula;
mod truth_table;

pub use formula::{EvalError, Model, Prop};
pub use truth_table::{symbols_of, tt_entails, TruthRow, TruthTable, MAX_SYMBOLS};
